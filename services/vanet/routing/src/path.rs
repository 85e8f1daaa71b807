//! Routed paths

use serde::{Deserialize, Serialize};
use std::fmt;
use vanet_topology::NodeId;

/// Node sequence from source to destination, inclusive. Empty means no route.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Path(Vec<NodeId>);

impl Path {
    /// Wrap a node sequence
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self(nodes)
    }

    /// The "no route" path
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Direct path between two neighbors
    pub fn direct(source: NodeId, destination: NodeId) -> Self {
        Self(vec![source, destination])
    }

    /// Nodes on the path
    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    /// Whether this path signals a routing failure
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of nodes on the path
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Number of links traversed
    pub fn hop_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// First node
    pub fn source(&self) -> Option<NodeId> {
        self.0.first().copied()
    }

    /// Last node
    pub fn destination(&self) -> Option<NodeId> {
        self.0.last().copied()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

impl From<Vec<NodeId>> for Path {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self(nodes)
    }
}
