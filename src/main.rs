//! Billiard Sim entry point
//!
//! Headless driver: builds a table (default layout or a JSON file given as the
//! first argument), breaks the rack with a single cue stroke, and runs until
//! the balls settle or the rack ends.

use std::process::ExitCode;

use glam::Vec2;

use billiard_sim::shot::{AimingCircle, cue_force};
use billiard_sim::sim::{StopReason, advance};
use billiard_sim::{Simulation, TableConfig};

/// Safety cap: one simulated minute at the default timestep
const MAX_TICKS: u64 = 12_000;

fn load_config() -> Result<TableConfig, billiard_sim::ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading table from {}", path);
            TableConfig::load(path)
        }
        None => Ok(TableConfig::default()),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let mut sim = Simulation::new(&config)?;
    log::info!("Billiard Sim starting ({} balls)", sim.registry().bodies().count());

    // Drag back from the cue ball away from the rack, with a touch of right side
    let cue_pos = sim.cue_ball().map(|b| b.pixel_pos()).unwrap_or(Vec2::ZERO);
    let force = cue_force(cue_pos, cue_pos - Vec2::new(150.0, 0.0)).unwrap_or(Vec2::ZERO);
    let aiming = AimingCircle::new(Vec2::new(150.0, 150.0));
    let contact = aiming.pick(Vec2::new(170.0, 150.0));
    sim.strike(force, contact)?;

    match advance(&mut sim, MAX_TICKS) {
        StopReason::Finished(outcome) => log::info!("{}", outcome.message()),
        StopReason::AtRest => log::info!("All balls at rest after {} ticks", sim.time_ticks()),
        StopReason::TickLimit => log::warn!("Stopped after {} ticks with balls still moving", MAX_TICKS),
    }
    log::info!("Total score: {}", sim.total_score());

    println!("{}", serde_json::to_string_pretty(&sim.snapshot())?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
