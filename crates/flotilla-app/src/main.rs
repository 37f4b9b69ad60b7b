//! Headless runner for the FLOTILLA simulation.
//!
//! Loads a scenario (built-in or TOML file), drives the engine tick by
//! tick, and logs helm events and periodic fleet status. With `--realtime`
//! the loop paces itself against the wall clock at the fixed tick rate.

mod game_loop;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flotilla_sim::engine::{SimConfig, SimulationEngine};
use flotilla_sim::scenario::{self, Scenario};

#[derive(Parser, Debug)]
#[command(name = "flotilla", about = "Headless ship-motion simulation runner")]
struct Args {
    /// TOML scenario file. Defaults to the built-in patrol exercise.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Run the built-in convoy scenario instead of the patrol exercise.
    /// Ignored when --scenario is given.
    #[arg(long)]
    convoy: bool,

    /// RNG seed (same seed = same simulation).
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Initial time-scale multiplier.
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 18_000)]
    ticks: u64,

    /// Pace ticks against the wall clock instead of free-running.
    #[arg(long)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None if args.convoy => scenario::convoy_run(),
        None => scenario::patrol_exercise(),
    };
    info!(
        name = %scenario.name,
        ships = scenario.ship_count(),
        orders = scenario.orders.len(),
        "scenario loaded"
    );

    let engine = SimulationEngine::new(SimConfig {
        seed: args.seed,
        time_scale: args.time_scale,
        scenario,
    })
    .context("scenario failed validation")?;

    game_loop::run(engine, args.ticks, args.realtime);
    Ok(())
}

fn load_scenario(path: &Path) -> anyhow::Result<Scenario> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading scenario file {}", path.display()))?;
    let scenario: Scenario = toml::from_str(&text)
        .with_context(|| format!("parsing scenario file {}", path.display()))?;
    Ok(scenario)
}
