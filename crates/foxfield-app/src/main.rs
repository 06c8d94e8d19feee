//! Foxfield simulation runner.

use anyhow::{Context, Result};
use foxfield_core::SimulationConfig;
use foxfield_world::Simulation;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional JSON config path; defaults otherwise
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str::<SimulationConfig>(&raw)
                .with_context(|| format!("parsing config file {path}"))?
        }
        None => SimulationConfig::default(),
    };

    info!(
        seed = config.seed,
        num_ticks = config.num_ticks,
        field_height = config.field.height,
        field_width = config.field.width,
        "Starting foxfield simulation"
    );

    let mut simulation = Simulation::new(config)?;
    let result = simulation.run()?;

    info!(
        ticks_run = result.ticks_run,
        births = result.births,
        deaths = result.deaths,
        "Simulation finished"
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
