//! Node definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node identity: sequential, 0-based, assigned at insertion
pub type NodeId = usize;

/// Kind of network participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Mobile node
    Vehicle,
    /// Stationary infrastructure node
    RoadSideUnit,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Vehicle => write!(f, "vehicle"),
            NodeKind::RoadSideUnit => write!(f, "rsu"),
        }
    }
}

/// Position in the simulation plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Position {
    /// Create a new position
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another position
    pub fn distance_sq(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another position
    pub fn distance(&self, other: &Position) -> f64 {
        self.distance_sq(other).sqrt()
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Velocity in units per time step
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// X component
    pub vx: f64,
    /// Y component
    pub vy: f64,
}

impl Velocity {
    /// Create a new velocity
    pub fn new(vx: f64, vy: f64) -> Self {
        Self { vx, vy }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.vx.is_finite() && self.vy.is_finite()
    }
}

/// A network participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node ID
    pub id: NodeId,
    /// Vehicle or road-side unit
    pub kind: NodeKind,
    /// Current position
    pub position: Position,
    /// Current velocity (always zero for road-side units)
    pub velocity: Velocity,
}

impl Node {
    /// Whether this node moves during a step
    pub fn is_mobile(&self) -> bool {
        self.kind == NodeKind::Vehicle
    }

    /// Integrate position over `dt` and reflect off the `[0, width] x [0, height]` box
    pub(crate) fn advance(&mut self, dt: f64, width: f64, height: f64) {
        if !self.is_mobile() {
            return;
        }

        self.position.x += self.velocity.vx * dt;
        self.position.y += self.velocity.vy * dt;

        reflect(&mut self.position.x, &mut self.velocity.vx, width);
        reflect(&mut self.position.y, &mut self.velocity.vy, height);
    }
}

/// Clamp a coordinate into `[0, limit]`, pointing the velocity back inward on a crossing
fn reflect(coord: &mut f64, velocity: &mut f64, limit: f64) {
    if *coord < 0.0 {
        *coord = 0.0;
        *velocity = velocity.abs();
    } else if *coord > limit {
        *coord = limit;
        *velocity = -velocity.abs();
    }
}
