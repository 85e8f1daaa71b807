//! Configuration handling for the simulator.
//!
//! Values come from the `simulation` section of a YAML file, then environment
//! variables, then command-line flags (applied by the caller).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use vanet_sim::{HopPolicy, RandomScenario, DEFAULT_TTL};

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Communication range
    pub range: f64,
    /// Area width
    pub width: f64,
    /// Area height
    pub height: f64,
    /// Time advanced per step
    pub dt: f64,
    /// Number of steps to run
    pub steps: u64,
    /// Seed for placement and nonces
    pub seed: u64,
    /// Vehicles placed by the random scenario
    pub vehicles: usize,
    /// Road-side units placed by the random scenario
    pub road_side_units: usize,
    /// Maximum velocity component magnitude
    pub max_speed: f64,
    /// Messages sent per step
    pub messages_per_step: usize,
    /// Hop budget attached to messages
    pub ttl: u8,
    /// Whether the hop budget limits route search
    pub hop_policy: HopPolicy,
    /// Wall-clock pause between steps
    #[serde(with = "duration_text")]
    pub tick_interval: Duration,
}

impl Default for SimConfig {
    fn default() -> Self {
        let scenario = RandomScenario::default();
        Self {
            range: 120.0,
            width: scenario.width,
            height: scenario.height,
            dt: 1.0,
            steps: 10,
            seed: 1,
            vehicles: scenario.vehicles,
            road_side_units: scenario.road_side_units,
            max_speed: scenario.max_speed,
            messages_per_step: 5,
            ttl: DEFAULT_TTL,
            hop_policy: HopPolicy::Unbounded,
            tick_interval: Duration::ZERO,
        }
    }
}

/// Root configuration structure (matches the YAML structure)
#[derive(Debug, Deserialize)]
struct RootConfig {
    simulation: Option<SimulationSection>,
}

#[derive(Debug, Deserialize)]
struct SimulationSection {
    range: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    dt: Option<f64>,
    steps: Option<u64>,
    seed: Option<u64>,
    vehicles: Option<usize>,
    road_side_units: Option<usize>,
    max_speed: Option<f64>,
    messages_per_step: Option<usize>,
    ttl: Option<u8>,
    hop_policy: Option<HopPolicy>,
    tick_interval: Option<String>,
}

impl SimConfig {
    /// Load configuration from file and environment variables
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let mut config = Self::default();

        match std::fs::read_to_string(&config_path) {
            Ok(content) => match serde_yaml::from_str::<RootConfig>(&content) {
                Ok(root) => {
                    if let Some(section) = root.simulation {
                        config.apply_section(section)?;
                    }
                    info!("Loaded configuration from {:?}", config_path.as_ref());
                }
                Err(e) => warn!(
                    "Failed to parse config file {:?} ({}), using defaults",
                    config_path.as_ref(),
                    e
                ),
            },
            Err(_) => warn!(
                "Config file {:?} not found, using defaults",
                config_path.as_ref()
            ),
        }

        config.apply_environment_overrides();

        info!(
            "Final configuration: range={}, area={}x{}, steps={}, seed={}, vehicles={}, rsus={}",
            config.range,
            config.width,
            config.height,
            config.steps,
            config.seed,
            config.vehicles,
            config.road_side_units
        );

        Ok(config)
    }

    fn apply_section(&mut self, section: SimulationSection) -> Result<()> {
        if let Some(range) = section.range {
            self.range = range;
        }
        if let Some(width) = section.width {
            self.width = width;
        }
        if let Some(height) = section.height {
            self.height = height;
        }
        if let Some(dt) = section.dt {
            self.dt = dt;
        }
        if let Some(steps) = section.steps {
            self.steps = steps;
        }
        if let Some(seed) = section.seed {
            self.seed = seed;
        }
        if let Some(vehicles) = section.vehicles {
            self.vehicles = vehicles;
        }
        if let Some(rsus) = section.road_side_units {
            self.road_side_units = rsus;
        }
        if let Some(max_speed) = section.max_speed {
            self.max_speed = max_speed;
        }
        if let Some(messages) = section.messages_per_step {
            self.messages_per_step = messages;
        }
        if let Some(ttl) = section.ttl {
            self.ttl = ttl;
        }
        if let Some(policy) = section.hop_policy {
            self.hop_policy = policy;
        }
        if let Some(interval) = section.tick_interval {
            self.tick_interval = humantime::parse_duration(&interval)
                .with_context(|| format!("invalid tick_interval {:?}", interval))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_environment_overrides(&mut self) {
        if let Some(seed) = env_parse::<u64>("VANET_SEED") {
            self.seed = seed;
            info!("Seed overridden by environment: {}", seed);
        }

        if let Some(range) = env_parse::<f64>("VANET_RANGE") {
            self.range = range;
            info!("Range overridden by environment: {}", range);
        }

        if let Some(steps) = env_parse::<u64>("VANET_STEPS") {
            self.steps = steps;
            info!("Steps overridden by environment: {}", steps);
        }

        if let Some(vehicles) = env_parse::<usize>("VANET_VEHICLES") {
            self.vehicles = vehicles;
            info!("Vehicle count overridden by environment: {}", vehicles);
        }
    }

    /// Random placement parameters derived from this configuration
    pub fn scenario(&self) -> RandomScenario {
        RandomScenario {
            vehicles: self.vehicles,
            road_side_units: self.road_side_units,
            width: self.width,
            height: self.height,
            max_speed: self.max_speed,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.parse().ok()
}

/// Serialize durations as humantime strings, e.g. "250ms"
mod duration_text {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.range, 120.0);
        assert_eq!(config.width, 800.0);
        assert_eq!(config.ttl, DEFAULT_TTL);
        assert_eq!(config.hop_policy, HopPolicy::Unbounded);
        assert_eq!(config.tick_interval, Duration::ZERO);
    }

    #[test]
    fn test_load_from_file() {
        let yaml_content = r#"
simulation:
  range: 75.5
  width: 1000
  steps: 3
  vehicles: 12
  ttl: 4
  hop_policy: enforce_ttl
  tick_interval: 250ms
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = SimConfig::load_from_file(temp_file.path()).unwrap();

        assert_eq!(config.range, 75.5);
        assert_eq!(config.width, 1000.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.vehicles, 12);
        assert_eq!(config.ttl, 4);
        assert_eq!(config.hop_policy, HopPolicy::EnforceTtl);
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.scenario().vehicles, 12);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = SimConfig::load_from_file("/nonexistent/vanet.yaml").unwrap();
        assert_eq!(config.width, SimConfig::default().width);
    }

    #[test]
    fn test_bad_tick_interval_is_an_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"simulation:\n  tick_interval: soon\n")
            .unwrap();
        assert!(SimConfig::load_from_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_serializes_tick_interval() {
        let config = SimConfig {
            tick_interval: Duration::from_millis(1500),
            ..SimConfig::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("tick_interval: 1s 500ms"));
    }
}
