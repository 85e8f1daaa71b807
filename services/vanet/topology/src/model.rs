//! Connectivity model: node list, motion integration, and graph rebuilds.

use crate::error::TopologyError;
use crate::graph::ProximityGraph;
use crate::keys::KeyRegistry;
use crate::node::{Node, NodeId, NodeKind, Position, Velocity};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Owner of node positions, keys, and the current proximity graph
#[derive(Debug, Clone)]
pub struct ConnectivityModel {
    /// Nodes indexed by their id
    nodes: Vec<Node>,
    /// Communication range
    range: f64,
    /// Squared communication range used for adjacency tests
    range_sq: f64,
    /// Graph for the current step
    graph: ProximityGraph,
    /// Per-node secret keys
    registry: KeyRegistry,
    /// Number of completed steps
    steps: u64,
}

impl ConnectivityModel {
    /// Create an empty model with the given communication range
    pub fn new(range: f64) -> Result<Self, TopologyError> {
        if !range.is_finite() || range < 0.0 {
            return Err(TopologyError::InvalidRange(range));
        }

        Ok(Self {
            nodes: Vec::new(),
            range,
            range_sq: range * range,
            graph: ProximityGraph::default(),
            registry: KeyRegistry::new(),
            steps: 0,
        })
    }

    /// Add a moving vehicle and register its key
    pub fn add_vehicle(
        &mut self,
        position: Position,
        velocity: Velocity,
        key: impl Into<Bytes>,
    ) -> Result<NodeId, TopologyError> {
        if !velocity.is_finite() {
            return Err(TopologyError::NonFinite("velocity"));
        }
        self.insert(NodeKind::Vehicle, position, velocity, key.into())
    }

    /// Add a stationary road-side unit and register its key
    pub fn add_road_side_unit(
        &mut self,
        position: Position,
        key: impl Into<Bytes>,
    ) -> Result<NodeId, TopologyError> {
        self.insert(NodeKind::RoadSideUnit, position, Velocity::default(), key.into())
    }

    fn insert(
        &mut self,
        kind: NodeKind,
        position: Position,
        velocity: Velocity,
        key: Bytes,
    ) -> Result<NodeId, TopologyError> {
        if !position.is_finite() {
            return Err(TopologyError::NonFinite("position"));
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            kind,
            position,
            velocity,
        });
        self.registry.register(id, key);

        info!(
            "Added {} {} at ({:.1}, {:.1})",
            kind, id, position.x, position.y
        );

        self.rebuild_graph();
        Ok(id)
    }

    /// Advance every vehicle by `dt`, reflecting at the area boundary, then rebuild the graph
    pub fn step(&mut self, dt: f64, width: f64, height: f64) -> Result<(), TopologyError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(TopologyError::InvalidTimeStep(dt));
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(TopologyError::InvalidArea { width, height });
        }

        for node in &mut self.nodes {
            node.advance(dt, width, height);
        }

        self.rebuild_graph();
        self.steps += 1;

        debug!(
            "Step {} complete: {} nodes, {} links",
            self.steps,
            self.nodes.len(),
            self.graph.edge_count()
        );
        Ok(())
    }

    /// Recompute the proximity graph from current positions
    pub fn rebuild_graph(&mut self) {
        self.graph = ProximityGraph::build(&self.nodes, self.range_sq);
    }

    /// Replace the key registered for a node
    pub fn register_key(&mut self, id: NodeId, key: impl Into<Bytes>) {
        self.registry.register(id, key);
    }

    /// Current proximity graph
    pub fn graph(&self) -> &ProximityGraph {
        &self.graph
    }

    /// Key registry
    pub fn key_registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// All nodes, indexed by id
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Neighbors of a node in the current graph
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.graph.neighbors(id)
    }

    /// Distance between two nodes, if both exist
    pub fn distance(&self, a: NodeId, b: NodeId) -> Option<f64> {
        let a = self.nodes.get(a)?;
        let b = self.nodes.get(b)?;
        Some(a.position.distance(&b.position))
    }

    /// Communication range
    pub fn range(&self) -> f64 {
        self.range
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the model has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of completed steps
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Snapshot statistics
    pub fn stats(&self) -> TopologyStats {
        let vehicles = self.nodes.iter().filter(|n| n.is_mobile()).count();
        TopologyStats {
            total_nodes: self.nodes.len(),
            vehicles,
            road_side_units: self.nodes.len() - vehicles,
            links: self.graph.edge_count(),
            steps: self.steps,
        }
    }
}

/// Connectivity model statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyStats {
    /// Total number of nodes
    pub total_nodes: usize,
    /// Number of vehicles
    pub vehicles: usize,
    /// Number of road-side units
    pub road_side_units: usize,
    /// Number of links in the current graph
    pub links: usize,
    /// Completed steps
    pub steps: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with_line() -> ConnectivityModel {
        let mut model = ConnectivityModel::new(50.0).unwrap();
        for x in [10.0, 40.0, 80.0, 120.0] {
            model
                .add_vehicle(Position::new(x, 10.0), Velocity::default(), format!("key-{}", x))
                .unwrap();
        }
        model
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut model = ConnectivityModel::new(50.0).unwrap();
        let a = model
            .add_vehicle(Position::new(0.0, 0.0), Velocity::new(1.0, 0.0), &b"a"[..])
            .unwrap();
        let b = model
            .add_road_side_unit(Position::new(5.0, 5.0), &b"b"[..])
            .unwrap();
        let c = model
            .add_vehicle(Position::new(9.0, 9.0), Velocity::default(), &b"c"[..])
            .unwrap();

        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(model.node(1).unwrap().kind, NodeKind::RoadSideUnit);
        assert_eq!(model.key_registry().lookup(2), Bytes::from_static(b"c"));
    }

    #[test]
    fn test_graph_refreshed_on_insert() {
        let model = model_with_line();
        assert_eq!(model.neighbors(1), &[0, 2]);
        assert_eq!(model.graph().node_count(), 4);
    }

    #[test]
    fn test_step_reflects_at_boundary() {
        let mut model = ConnectivityModel::new(50.0).unwrap();
        let id = model
            .add_vehicle(Position::new(795.0, 300.0), Velocity::new(40.0, 0.0), &b"k"[..])
            .unwrap();

        model.step(1.0, 800.0, 600.0).unwrap();

        let node = model.node(id).unwrap();
        assert_eq!(node.position.x, 800.0);
        assert_eq!(node.velocity.vx, -40.0);
        assert_eq!(model.steps(), 1);
    }

    #[test]
    fn test_step_rebuilds_graph() {
        let mut model = ConnectivityModel::new(50.0).unwrap();
        model
            .add_vehicle(Position::new(10.0, 10.0), Velocity::new(0.0, 0.0), &b"a"[..])
            .unwrap();
        model
            .add_vehicle(Position::new(70.0, 10.0), Velocity::new(-20.0, 0.0), &b"b"[..])
            .unwrap();
        assert!(!model.graph().are_adjacent(0, 1));

        model.step(1.0, 800.0, 600.0).unwrap();
        assert!(model.graph().are_adjacent(0, 1));
        assert_eq!(model.distance(0, 1), Some(40.0));
    }

    #[test]
    fn test_rsu_does_not_move() {
        let mut model = ConnectivityModel::new(50.0).unwrap();
        let rsu = model
            .add_road_side_unit(Position::new(60.0, 10.0), &b"rsu"[..])
            .unwrap();
        for _ in 0..5 {
            model.step(1.0, 800.0, 600.0).unwrap();
        }
        assert_eq!(model.node(rsu).unwrap().position, Position::new(60.0, 10.0));
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert_eq!(
            ConnectivityModel::new(-1.0).unwrap_err(),
            TopologyError::InvalidRange(-1.0)
        );
        assert!(ConnectivityModel::new(f64::NAN).is_err());

        let mut model = ConnectivityModel::new(50.0).unwrap();
        assert!(model.step(1.0, 0.0, 600.0).is_err());
        assert!(model.step(-1.0, 800.0, 600.0).is_err());
        assert_eq!(
            model
                .add_vehicle(Position::new(f64::INFINITY, 0.0), Velocity::default(), &b""[..])
                .unwrap_err(),
            TopologyError::NonFinite("position")
        );
        assert!(model
            .add_vehicle(Position::new(0.0, 0.0), Velocity::new(f64::NAN, 0.0), &b""[..])
            .is_err());
        assert!(model.is_empty());
        assert_eq!(model.steps(), 0);
    }

    #[test]
    fn test_stats() {
        let mut model = model_with_line();
        model
            .add_road_side_unit(Position::new(60.0, 10.0), &b"rsu"[..])
            .unwrap();
        model.step(1.0, 800.0, 600.0).unwrap();

        let stats = model.stats();
        assert_eq!(stats.total_nodes, 5);
        assert_eq!(stats.vehicles, 4);
        assert_eq!(stats.road_side_units, 1);
        assert_eq!(stats.steps, 1);
        // 0-1, 1-2, 2-3, plus the RSU reaching 0 (exactly 50), 1 and 2
        assert_eq!(stats.links, 6);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["road_side_units"], 1);
    }
}
