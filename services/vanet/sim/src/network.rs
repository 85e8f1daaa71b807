//! Network facade

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use vanet_protocol::{DeliveryOutcome, DeliveryStats, Message, MessageProtocol};
use vanet_routing::{BfsRouter, Router};
use vanet_topology::{
    ConnectivityModel, NodeId, Position, TopologyError, TopologyStats, Velocity,
};

/// Connectivity model plus message protocol.
///
/// Stepping takes `&mut self` and delivery borrows the model immutably, so a
/// delivery always sees the graph of one completed step.
#[derive(Debug, Clone)]
pub struct Network<R = BfsRouter> {
    model: ConnectivityModel,
    protocol: MessageProtocol<R>,
}

impl Network<BfsRouter> {
    /// Network with the default router; `seed` drives nonce generation
    pub fn new(range: f64, seed: u64) -> Result<Self, TopologyError> {
        Self::with_router(range, BfsRouter::new(), seed)
    }
}

impl<R: Router> Network<R> {
    /// Network with a custom router
    pub fn with_router(range: f64, router: R, seed: u64) -> Result<Self, TopologyError> {
        info!("Creating network with range {} (seed {})", range, seed);
        Ok(Self {
            model: ConnectivityModel::new(range)?,
            protocol: MessageProtocol::with_router(router, seed),
        })
    }

    /// Add a vehicle; returns its id
    pub fn add_vehicle(
        &mut self,
        position: Position,
        velocity: Velocity,
        key: impl Into<Bytes>,
    ) -> Result<NodeId, TopologyError> {
        self.model.add_vehicle(position, velocity, key)
    }

    /// Add a road-side unit; returns its id
    pub fn add_road_side_unit(
        &mut self,
        position: Position,
        key: impl Into<Bytes>,
    ) -> Result<NodeId, TopologyError> {
        self.model.add_road_side_unit(position, key)
    }

    /// Advance time by one step
    pub fn step(&mut self, dt: f64, width: f64, height: f64) -> Result<(), TopologyError> {
        self.model.step(dt, width, height)
    }

    /// Create a message tagged with the source's key
    pub fn make_message(
        &mut self,
        source: NodeId,
        destination: NodeId,
        payload: impl Into<Bytes>,
        ttl: u8,
    ) -> Message {
        self.protocol
            .make_message(self.model.key_registry(), source, destination, payload, ttl)
    }

    /// Check a message against the source's registered key
    pub fn verify_at_hop(&self, message: &Message) -> bool {
        self.protocol
            .verify_at_hop(self.model.key_registry(), message)
    }

    /// Deliver a message over the current graph
    pub fn deliver(&mut self, message: &Message) -> DeliveryOutcome {
        self.protocol.deliver(&self.model, message)
    }

    /// Create and deliver in one call
    pub fn send(
        &mut self,
        source: NodeId,
        destination: NodeId,
        payload: impl Into<Bytes>,
        ttl: u8,
    ) -> DeliveryOutcome {
        let message = self.make_message(source, destination, payload, ttl);
        self.deliver(&message)
    }

    /// Underlying connectivity model
    pub fn model(&self) -> &ConnectivityModel {
        &self.model
    }

    /// Mutable connectivity model, e.g. for re-keying a node
    pub fn model_mut(&mut self) -> &mut ConnectivityModel {
        &mut self.model
    }

    /// Delivery counters
    pub fn delivery_stats(&self) -> &DeliveryStats {
        self.protocol.stats()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.model.len()
    }

    /// Whether the network has no nodes
    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    /// Combined topology and delivery report
    pub fn report(&self) -> NetworkReport {
        NetworkReport {
            topology: self.model.stats(),
            delivery: self.protocol.stats().clone(),
        }
    }
}

/// End-of-run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkReport {
    /// Topology snapshot
    pub topology: TopologyStats,
    /// Delivery counters
    pub delivery: DeliveryStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanet_protocol::DeliveryMode;

    #[test]
    fn test_send_and_report() {
        let mut network = Network::new(50.0, 1).unwrap();
        network
            .add_vehicle(Position::new(10.0, 10.0), Velocity::default(), &b"a"[..])
            .unwrap();
        network
            .add_road_side_unit(Position::new(40.0, 10.0), &b"b"[..])
            .unwrap();

        let outcome = network.send(0, 1, &b"hello"[..], 4);
        assert!(matches!(
            outcome,
            DeliveryOutcome::Delivered {
                mode: DeliveryMode::SingleHop,
                hop_count: 1,
                ..
            }
        ));

        assert_eq!(network.model().range(), 50.0);

        let report = network.report();
        assert_eq!(report.topology.total_nodes, 2);
        assert_eq!(report.delivery.messages_created, 1);
        assert_eq!(report.delivery.delivered(), 1);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"delivered_single_hop\":1"));
    }

    #[test]
    fn test_rekey_through_model() {
        let mut network = Network::new(50.0, 1).unwrap();
        network
            .add_vehicle(Position::new(0.0, 0.0), Velocity::default(), &b"a"[..])
            .unwrap();
        let message = network.make_message(0, 0, &b"x"[..], 1);
        assert!(network.verify_at_hop(&message));

        network.model_mut().register_key(0, &b"z"[..]);
        assert!(!network.verify_at_hop(&message));
    }
}
