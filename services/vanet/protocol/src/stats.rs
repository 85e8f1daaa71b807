//! Delivery statistics

use crate::outcome::{DeliveryMode, DeliveryOutcome};
use serde::{Deserialize, Serialize};

/// Counters across all messages handled by a protocol instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStats {
    /// Messages created
    pub messages_created: u64,
    /// Delivered without relays
    pub delivered_single_hop: u64,
    /// Delivered through one or more relays
    pub delivered_multi_hop: u64,
    /// Dropped for failed authentication
    pub dropped_auth_failure: u64,
    /// Failed for lack of a route
    pub failed_no_route: u64,
    /// Links traversed by delivered messages
    pub total_hops: u64,
}

impl DeliveryStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one delivery outcome
    pub fn record(&mut self, outcome: &DeliveryOutcome) {
        match outcome {
            DeliveryOutcome::Delivered {
                mode, hop_count, ..
            } => {
                match mode {
                    DeliveryMode::SingleHop => self.delivered_single_hop += 1,
                    DeliveryMode::MultiHop => self.delivered_multi_hop += 1,
                }
                self.total_hops += *hop_count as u64;
            }
            DeliveryOutcome::Dropped { .. } => self.dropped_auth_failure += 1,
            DeliveryOutcome::Failed => self.failed_no_route += 1,
        }
    }

    /// Messages that reached their destination
    pub fn delivered(&self) -> u64 {
        self.delivered_single_hop + self.delivered_multi_hop
    }

    /// Delivery attempts made
    pub fn attempts(&self) -> u64 {
        self.delivered() + self.dropped_auth_failure + self.failed_no_route
    }

    /// Fraction of attempts that were delivered, 0 when nothing was attempted
    pub fn delivery_ratio(&self) -> f64 {
        match self.attempts() {
            0 => 0.0,
            n => self.delivered() as f64 / n as f64,
        }
    }

    /// Mean hops per delivered message
    pub fn mean_hops(&self) -> f64 {
        match self.delivered() {
            0 => 0.0,
            n => self.total_hops as f64 / n as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vanet_routing::Path;

    #[test]
    fn test_record_outcomes() {
        let mut stats = DeliveryStats::new();
        stats.record(&DeliveryOutcome::delivered(Path::direct(0, 1)));
        stats.record(&DeliveryOutcome::delivered(Path::new(vec![0, 1, 2, 3])));
        stats.record(&DeliveryOutcome::Failed);
        stats.record(&DeliveryOutcome::Dropped { at: 0 });

        assert_eq!(stats.delivered_single_hop, 1);
        assert_eq!(stats.delivered_multi_hop, 1);
        assert_eq!(stats.failed_no_route, 1);
        assert_eq!(stats.dropped_auth_failure, 1);
        assert_eq!(stats.total_hops, 4);
        assert_eq!(stats.attempts(), 4);
        assert_eq!(stats.delivery_ratio(), 0.5);
        assert_eq!(stats.mean_hops(), 2.0);
    }

    #[test]
    fn test_empty_ratios() {
        let stats = DeliveryStats::new();
        assert_eq!(stats.delivery_ratio(), 0.0);
        assert_eq!(stats.mean_hops(), 0.0);
    }

    #[test]
    fn test_serializes() {
        let mut stats = DeliveryStats::new();
        stats.messages_created = 3;
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["messages_created"], 3);
        assert_eq!(json["failed_no_route"], 0);
    }
}
