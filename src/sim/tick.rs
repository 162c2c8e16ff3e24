//! Fixed timestep simulation tick
//!
//! Advances the table by one `World::dt` and applies the end-of-rack rule.

use super::rules::{self, Outcome};
use super::state::{Phase, Simulation};

/// Why [`advance`] stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Finished(Outcome),
    AtRest,
    TickLimit,
}

/// Advance the simulation by one fixed timestep.
///
/// Does nothing once the rack is finished. Returns the outcome if this or an
/// earlier tick ended the rack.
pub fn tick(sim: &mut Simulation) -> Option<Outcome> {
    if let Phase::Finished(outcome) = sim.phase {
        return Some(outcome);
    }

    sim.time_ticks += 1;
    let dropped = sim.registry.tick(&sim.world, sim.tick_order);
    if !dropped.is_empty() {
        log::debug!("tick {}: pocketed {:?}", sim.time_ticks, dropped);
    }

    let outcome = rules::evaluate(sim.registry.pockets())?;
    sim.phase = Phase::Finished(outcome);
    log::info!(
        "rack finished after {} ticks: {} (score {})",
        sim.time_ticks,
        outcome.message(),
        sim.total_score()
    );
    Some(outcome)
}

/// Tick until the rack ends, every ball is at rest, or `max_ticks` pass.
///
/// At least one tick always runs so a freshly struck cue ball gets moving.
pub fn advance(sim: &mut Simulation, max_ticks: u64) -> StopReason {
    for n in 0..max_ticks {
        if let Some(outcome) = tick(sim) {
            return StopReason::Finished(outcome);
        }
        if n > 0 && sim.balls_at_rest() {
            return StopReason::AtRest;
        }
    }
    StopReason::TickLimit
}
