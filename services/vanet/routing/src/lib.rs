//! Shortest-hop path computation over the vanet proximity graph.
//!
//! Routes are computed on demand with a breadth-first search over the graph
//! snapshot owned by the connectivity model. An empty [`Path`] signals that
//! the destination is unreachable.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bfs;
pub mod path;
pub mod router;

pub use bfs::BfsRouter;
pub use path::Path;
pub use router::{DropReason, HopPolicy, Router};
