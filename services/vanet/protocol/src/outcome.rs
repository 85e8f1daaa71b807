//! Delivery outcomes

use serde::{Deserialize, Serialize};
use std::fmt;
use vanet_routing::{DropReason, Path};
use vanet_topology::NodeId;

/// Whether a delivered message needed relays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryMode {
    /// Source and destination were neighbors
    SingleHop,
    /// One or more relays were used
    MultiHop,
}

/// Terminal state of a delivery attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryOutcome {
    /// Every node on the path verified the tag
    Delivered {
        /// Single or multi hop
        mode: DeliveryMode,
        /// Realized path, source and destination inclusive
        path: Path,
        /// Links traversed
        hop_count: usize,
    },
    /// Verification failed on the path ([`DropReason::AuthFailure`])
    Dropped {
        /// Node where verification failed
        at: NodeId,
    },
    /// No admissible path to the destination ([`DropReason::NoRoute`])
    Failed,
}

impl DeliveryOutcome {
    pub(crate) fn delivered(path: Path) -> Self {
        let hop_count = path.hop_count();
        let mode = if hop_count <= 1 {
            DeliveryMode::SingleHop
        } else {
            DeliveryMode::MultiHop
        };
        DeliveryOutcome::Delivered {
            mode,
            path,
            hop_count,
        }
    }

    /// Whether the message reached its destination
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }

    /// Why the message did not arrive, if it did not
    pub fn drop_reason(&self) -> Option<DropReason> {
        match self {
            DeliveryOutcome::Delivered { .. } => None,
            DeliveryOutcome::Dropped { .. } => Some(DropReason::AuthFailure),
            DeliveryOutcome::Failed => Some(DropReason::NoRoute),
        }
    }

    /// Hops traversed, for delivered messages
    pub fn hop_count(&self) -> Option<usize> {
        match self {
            DeliveryOutcome::Delivered { hop_count, .. } => Some(*hop_count),
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryOutcome::Delivered {
                mode: DeliveryMode::SingleHop,
                path,
                ..
            } => write!(f, "delivered directly: {}", path),
            DeliveryOutcome::Delivered {
                mode: DeliveryMode::MultiHop,
                path,
                hop_count,
            } => write!(f, "delivered over {} hops: {}", hop_count, path),
            DeliveryOutcome::Dropped { at } => {
                write!(f, "dropped at node {}: {}", at, DropReason::AuthFailure)
            }
            DeliveryOutcome::Failed => write!(f, "failed: {}", DropReason::NoRoute),
        }
    }
}
