//! Message creation, per-hop verification, and delivery

use crate::message::{canonical_repr, Message};
use crate::outcome::DeliveryOutcome;
use crate::stats::DeliveryStats;
use bytes::Bytes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};
use vanet_crypto::mac;
use vanet_routing::{BfsRouter, Path, Router};
use vanet_topology::{ConnectivityModel, KeyRegistry, NodeId};

/// Creates authenticated messages and delivers them over the current graph
#[derive(Debug, Clone)]
pub struct MessageProtocol<R = BfsRouter> {
    /// Path computation for non-neighbor destinations
    router: R,
    /// Nonce source, explicitly seeded for reproducible runs
    rng: StdRng,
    /// Outcome counters
    stats: DeliveryStats,
}

impl MessageProtocol<BfsRouter> {
    /// Protocol with the default breadth-first router
    pub fn new(seed: u64) -> Self {
        Self::with_router(BfsRouter::new(), seed)
    }
}

impl<R: Router> MessageProtocol<R> {
    /// Protocol with a custom router
    pub fn with_router(router: R, seed: u64) -> Self {
        Self {
            router,
            rng: StdRng::seed_from_u64(seed),
            stats: DeliveryStats::new(),
        }
    }

    /// Build a message and tag it with the source's registered key
    pub fn make_message(
        &mut self,
        registry: &KeyRegistry,
        source: NodeId,
        destination: NodeId,
        payload: impl Into<Bytes>,
        ttl: u8,
    ) -> Message {
        let payload = payload.into();
        let nonce: u64 = self.rng.gen();
        let canonical = canonical_repr(source, destination, ttl, &payload, nonce);
        let tag = mac(&registry.lookup(source), &canonical);

        self.stats.messages_created += 1;
        debug!(
            "Created message {} -> {} (ttl {}, {} bytes, nonce {:016x})",
            source,
            destination,
            ttl,
            payload.len(),
            nonce
        );

        Message {
            source,
            destination,
            ttl,
            payload,
            nonce,
            tag,
        }
    }

    /// Recompute the tag from the source's key and compare it with the carried one.
    ///
    /// Nothing here depends on which relay runs the check, so the result is
    /// the same at every hop of a given message.
    pub fn verify_at_hop(&self, registry: &KeyRegistry, message: &Message) -> bool {
        let expected = mac(&registry.lookup(message.source), &message.canonical_bytes());
        expected == message.tag
    }

    /// Route a message through the current graph and verify it at every node on the path
    pub fn deliver(&mut self, model: &ConnectivityModel, message: &Message) -> DeliveryOutcome {
        let outcome = self.resolve(model, message);
        self.stats.record(&outcome);

        match &outcome {
            DeliveryOutcome::Delivered { .. } => {
                debug!("Message {} -> {} {}", message.source, message.destination, outcome)
            }
            _ => warn!("Message {} -> {} {}", message.source, message.destination, outcome),
        }
        outcome
    }

    fn resolve(&self, model: &ConnectivityModel, message: &Message) -> DeliveryOutcome {
        let graph = model.graph();

        let direct = graph.are_adjacent(message.source, message.destination)
            && self.router.admits(1, message.ttl);
        let path = if direct {
            Path::direct(message.source, message.destination)
        } else {
            self.router
                .route(graph, message.source, message.destination, message.ttl)
        };

        if path.is_empty() {
            return DeliveryOutcome::Failed;
        }

        let registry = model.key_registry();
        for &hop in path.nodes() {
            if !self.verify_at_hop(registry, message) {
                return DeliveryOutcome::Dropped { at: hop };
            }
            trace!("Node {} verified message from {}", hop, message.source);
        }

        DeliveryOutcome::delivered(path)
    }

    /// Outcome counters so far
    pub fn stats(&self) -> &DeliveryStats {
        &self.stats
    }

    /// Active router
    pub fn router(&self) -> &R {
        &self.router
    }
}
