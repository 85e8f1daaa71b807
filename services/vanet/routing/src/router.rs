//! Router trait and routing policy types

use crate::path::Path;
use serde::{Deserialize, Serialize};
use std::fmt;
use vanet_topology::{NodeId, ProximityGraph};

/// Reason a message was not delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropReason {
    /// No path connects source and destination
    NoRoute,
    /// Authentication tag did not verify on the path
    AuthFailure,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::NoRoute => write!(f, "no route to destination"),
            DropReason::AuthFailure => write!(f, "authentication failure"),
        }
    }
}

/// How the hop budget of a message constrains the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HopPolicy {
    /// Explore the whole reachable component; the budget is carried but not enforced
    #[default]
    Unbounded,
    /// Never expand past `max_hops` hops from the source
    EnforceTtl,
}

impl fmt::Display for HopPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HopPolicy::Unbounded => write!(f, "unbounded"),
            HopPolicy::EnforceTtl => write!(f, "enforce_ttl"),
        }
    }
}

/// Path computation over a graph snapshot
pub trait Router {
    /// Compute a path from `source` to `destination`.
    ///
    /// Returns an empty path when the destination is unreachable.
    fn route(
        &self,
        graph: &ProximityGraph,
        source: NodeId,
        destination: NodeId,
        max_hops: u8,
    ) -> Path;

    /// Whether a path of `hops` links fits a budget of `max_hops`.
    ///
    /// Callers that pick a path without consulting [`Router::route`], such as
    /// a direct link to a neighbor, must check it here first.
    fn admits(&self, _hops: usize, _max_hops: u8) -> bool {
        true
    }
}
