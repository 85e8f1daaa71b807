//! Network facade and scenario builders over the vanet core.
//!
//! [`Network`] bundles the connectivity model and the message protocol behind
//! the operations a simulation driver needs: add nodes, step time, make and
//! deliver messages. The [`scenario`] module populates networks, either with
//! a fixed demonstration layout or with seeded random placement.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod network;
pub mod scenario;

pub use network::{Network, NetworkReport};
pub use scenario::{demo, random_traffic, RandomScenario, DEMO_RANGE};

pub use vanet_crypto::{hash, mac, Digest, Tag};
pub use vanet_protocol::{DeliveryMode, DeliveryOutcome, DeliveryStats, Message, DEFAULT_TTL};
pub use vanet_routing::{BfsRouter, DropReason, HopPolicy, Path, Router};
pub use vanet_topology::{NodeId, NodeKind, Position, TopologyError, TopologyStats, Velocity};
