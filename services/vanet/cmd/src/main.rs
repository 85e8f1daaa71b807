//! Vehicular ad-hoc network simulator.
//!
//! Drives the vanet core step by step: moves nodes, sends authenticated
//! messages between random pairs, and reports how each was resolved.

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vanet_sim::{
    demo, random_traffic, BfsRouter, DeliveryOutcome, HopPolicy, Network, NetworkReport, Router,
    Tag,
};

#[macro_use]
mod logging;
mod config;

use config::SimConfig;
use logging::VanetLogFormatter;

/// Mixed into the configured seed so placement and nonces draw from different streams
const PLACEMENT_SEED_SALT: u64 = 0x5eed_0f_9ace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Scenario {
    /// Fixed five-node layout: direct, relayed, and vehicle-to-RSU sends plus a forged tag
    Demo,
    /// Seeded random placement and traffic for the configured number of steps
    Random,
}

/// Vehicular ad-hoc network simulator
#[derive(Parser, Debug)]
#[command(name = "vanet", version, about = "Vehicular ad-hoc network simulator")]
struct Args {
    /// Scenario to run
    #[arg(long, value_enum, default_value_t = Scenario::Random)]
    scenario: Scenario,

    /// Configuration file path
    #[arg(long, default_value = "vanet.yaml")]
    config: PathBuf,

    /// Seed for placement and nonces (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of steps (overrides config)
    #[arg(long)]
    steps: Option<u64>,

    /// Communication range (overrides config)
    #[arg(long)]
    range: Option<f64>,

    /// Wall-clock pause between steps, e.g. 200ms (overrides config)
    #[arg(long)]
    tick_interval: Option<humantime::Duration>,

    /// Stop route search once a message's hop budget is exhausted
    #[arg(long)]
    enforce_ttl: bool,

    /// Print the final report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    scenario: Scenario,
    config: &'a SimConfig,
    report: NetworkReport,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::new("info")
        .add_directive(format!("vanet={}", args.log_level).parse()?)
        .add_directive(format!("vanet_sim={}", args.log_level).parse()?)
        .add_directive(format!("vanet_protocol={}", args.log_level).parse()?)
        .add_directive(format!("vanet_routing={}", args.log_level).parse()?)
        .add_directive(format!("vanet_topology={}", args.log_level).parse()?);

    let formatter = VanetLogFormatter::new("vanet".to_string(), logging::is_terminal());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .event_format(formatter)
        .init();

    info!("Starting vanet simulator v{}", env!("CARGO_PKG_VERSION"));

    let mut config = SimConfig::load_from_file(&args.config)?;
    apply_cli_overrides(&mut config, &args);

    let report = match args.scenario {
        Scenario::Demo => run_demo(&config)?,
        Scenario::Random => run_random(&config).await?,
    };

    let delivery = &report.delivery;
    info!(
        "Simulation finished: {} created, {} delivered ({} direct, {} relayed), {} no-route, {} auth failures, ratio {:.2}, mean hops {:.2}",
        delivery.messages_created,
        delivery.delivered(),
        delivery.delivered_single_hop,
        delivery.delivered_multi_hop,
        delivery.failed_no_route,
        delivery.dropped_auth_failure,
        delivery.delivery_ratio(),
        delivery.mean_hops()
    );

    if args.json {
        let summary = RunSummary {
            scenario: args.scenario,
            config: &config,
            report,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn apply_cli_overrides(config: &mut SimConfig, args: &Args) {
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    if let Some(range) = args.range {
        config.range = range;
    }
    if let Some(interval) = &args.tick_interval {
        config.tick_interval = **interval;
    }
    if args.enforce_ttl {
        config.hop_policy = HopPolicy::EnforceTtl;
    }
}

fn log_outcome(label: &str, outcome: &DeliveryOutcome) {
    if outcome.is_delivered() {
        component_info!("driver", "{}: {}", label, outcome);
    } else {
        component_warn!("driver", "{}: {}", label, outcome);
    }
}

/// Replay the fixed walkthrough layout, then show that a forged tag is refused
fn run_demo(config: &SimConfig) -> anyhow::Result<NetworkReport> {
    let (mut network, sends) = demo(config.seed)?;
    component_info!(
        "driver",
        "Demo network: {} nodes, {} links",
        network.len(),
        network.model().graph().edge_count()
    );

    for (source, destination) in sends {
        let outcome = network.send(source, destination, "hello", config.ttl);
        log_outcome(&format!("Message {} -> {}", source, destination), &outcome);
    }

    let mut forged = network.make_message(0, 3, "hello", config.ttl);
    let mut text = forged.tag.into_string();
    text.replace_range(0..1, if text.starts_with('0') { "1" } else { "0" });
    forged.tag = Tag::new(text);

    let outcome = network.deliver(&forged);
    log_outcome("Forged message 0 -> 3", &outcome);

    Ok(network.report())
}

/// Random placement, then `steps` rounds of motion and traffic
async fn run_random(config: &SimConfig) -> anyhow::Result<NetworkReport> {
    let router = BfsRouter::with_policy(config.hop_policy);
    let mut network = Network::with_router(config.range, router, config.seed)?;
    let mut rng = StdRng::seed_from_u64(config.seed ^ PLACEMENT_SEED_SALT);

    config.scenario().populate(&mut network, &mut rng)?;
    component_info!(
        "driver",
        "Running {} steps over {} nodes (range {}, hop policy {})",
        config.steps,
        network.len(),
        network.model().range(),
        config.hop_policy
    );

    let mut ticker = if config.tick_interval.is_zero() {
        None
    } else {
        Some(tokio::time::interval(config.tick_interval))
    };

    for step in 1..=config.steps {
        if let Some(ticker) = ticker.as_mut() {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tokio::signal::ctrl_c() => {
                    warn!("Interrupted before step {}, stopping", step);
                    break;
                }
            }
        }

        run_step(&mut network, &mut rng, config, step)?;
    }

    Ok(network.report())
}

fn run_step<R: Router>(
    network: &mut Network<R>,
    rng: &mut StdRng,
    config: &SimConfig,
    step: u64,
) -> anyhow::Result<()> {
    network.step(config.dt, config.width, config.height)?;

    let mut delivered = 0usize;
    let pairs = random_traffic(rng, network.len(), config.messages_per_step);
    let sent = pairs.len();

    for (source, destination) in pairs {
        let payload = format!("step {} beacon from {}", step, source);
        let outcome = network.send(source, destination, payload, config.ttl);
        if outcome.is_delivered() {
            delivered += 1;
        }
        component_debug!(
            "driver",
            "Step {}: message {} -> {} {}",
            step,
            source,
            destination,
            outcome
        );
    }

    component_info!(
        "driver",
        "Step {}: {} links, {}/{} messages delivered",
        step,
        network.model().graph().edge_count(),
        delivered,
        sent
    );
    Ok(())
}
