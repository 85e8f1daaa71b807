//! Node motion, key registry, and proximity graph construction for vanet.
//!
//! This crate owns the only mutable shared state of a simulation: the node
//! list and the proximity graph derived from it. Vehicles move each step and
//! reflect off the area boundary; road-side units stay put. After every
//! mutation the graph is rebuilt from scratch, so readers always observe a
//! consistent snapshot.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod graph;
pub mod keys;
pub mod model;
pub mod node;

pub use error::TopologyError;
pub use graph::ProximityGraph;
pub use keys::KeyRegistry;
pub use model::{ConnectivityModel, TopologyStats};
pub use node::{Node, NodeId, NodeKind, Position, Velocity};
