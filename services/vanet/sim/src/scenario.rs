//! Scenario builders.

use crate::network::Network;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;
use vanet_routing::Router;
use vanet_topology::{NodeId, Position, TopologyError, Velocity};

/// Communication range of the demonstration layout
pub const DEMO_RANGE: f64 = 50.0;

/// Four stationary vehicles in a row plus one road-side unit between the
/// middle two.
///
/// ```text
/// id:  0      1         4     2         3
/// x:   10     40        60    80        120     (all at y = 10)
/// ```
///
/// Returns the populated network and the message pairs of the walkthrough:
/// a direct send, a relayed send, and a vehicle-to-infrastructure send.
pub fn demo(seed: u64) -> Result<(Network, Vec<(NodeId, NodeId)>), TopologyError> {
    let mut network = Network::new(DEMO_RANGE, seed)?;

    for x in [10.0, 40.0, 80.0, 120.0] {
        let id = network.len();
        network.add_vehicle(
            Position::new(x, 10.0),
            Velocity::default(),
            format!("vehicle-{}-secret", id),
        )?;
    }
    let rsu = network.len();
    network.add_road_side_unit(Position::new(60.0, 10.0), format!("rsu-{}-secret", rsu))?;

    Ok((network, vec![(0, 1), (0, 3), (2, rsu)]))
}

/// Seeded random placement of vehicles and road-side units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomScenario {
    /// Number of vehicles
    pub vehicles: usize,
    /// Number of road-side units
    pub road_side_units: usize,
    /// Area width
    pub width: f64,
    /// Area height
    pub height: f64,
    /// Upper bound on each velocity component's magnitude
    pub max_speed: f64,
}

impl Default for RandomScenario {
    fn default() -> Self {
        Self {
            vehicles: 20,
            road_side_units: 4,
            width: 800.0,
            height: 600.0,
            max_speed: 15.0,
        }
    }
}

impl RandomScenario {
    /// Add the configured nodes to `network`, drawing every random value from `rng`
    pub fn populate<R: Router, G: Rng>(
        &self,
        network: &mut Network<R>,
        rng: &mut G,
    ) -> Result<(), TopologyError> {
        let area_ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if !area_ok {
            return Err(TopologyError::InvalidArea {
                width: self.width,
                height: self.height,
            });
        }
        if !self.max_speed.is_finite() {
            return Err(TopologyError::NonFinite("velocity"));
        }
        let speed = self.max_speed.abs();

        for _ in 0..self.vehicles {
            let position = self.random_position(rng);
            let velocity = if speed > 0.0 {
                Velocity::new(rng.gen_range(-speed..=speed), rng.gen_range(-speed..=speed))
            } else {
                Velocity::default()
            };
            let key = random_key(rng);
            network.add_vehicle(position, velocity, key)?;
        }

        for _ in 0..self.road_side_units {
            let position = self.random_position(rng);
            let key = random_key(rng);
            network.add_road_side_unit(position, key)?;
        }

        info!(
            "Placed {} vehicles and {} road-side units in {}x{}",
            self.vehicles, self.road_side_units, self.width, self.height
        );
        Ok(())
    }

    fn random_position<G: Rng>(&self, rng: &mut G) -> Position {
        Position::new(
            rng.gen_range(0.0..=self.width),
            rng.gen_range(0.0..=self.height),
        )
    }
}

fn random_key<G: Rng>(rng: &mut G) -> Vec<u8> {
    let mut key = vec![0u8; 20];
    rng.fill(key.as_mut_slice());
    key
}

/// Pick `count` ordered source/destination pairs with distinct endpoints
pub fn random_traffic<G: Rng>(rng: &mut G, nodes: usize, count: usize) -> Vec<(NodeId, NodeId)> {
    if nodes < 2 {
        return Vec::new();
    }

    (0..count)
        .map(|_| {
            let source = rng.gen_range(0..nodes);
            // Skip over the source so the destination is uniform over the others
            let mut destination = rng.gen_range(0..nodes - 1);
            if destination >= source {
                destination += 1;
            }
            (source, destination)
        })
        .collect()
}
