//! Simulation state
//!
//! Owns the world constants and the actor registry, and exposes what the
//! input and rendering layers need: the cue strike and a read-only snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::body::Body;
use super::boundary::Boundary;
use super::pocket::Pocket;
use super::registry::{Actor, Registry};
use super::resolver::CollisionResolver;
use super::rules::{self, Outcome};
use super::world::World;
use crate::config::{ConfigError, TableConfig, TickOrder};
use crate::consts::STROKE_READY_SPEED;

/// Errors from driving a running simulation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("the cue ball is no longer on the table")]
    MissingCueBall,
}

/// Whether the rack is still being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Running,
    Finished(Outcome),
}

/// A ball as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub id: u32,
    /// Center (px)
    pub pos: Vec2,
    /// Orientation (degrees)
    pub angle: f32,
    /// Radius (px)
    pub radius: f32,
}

impl From<&Body> for BallView {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id(),
            pos: body.pixel_pos(),
            angle: body.angle(),
            radius: body.pixel_radius(),
        }
    }
}

/// Read-only view of the table for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time_ticks: u64,
    pub balls: Vec<BallView>,
    pub pockets: Vec<Pocket>,
    pub total_score: u32,
    pub outcome: Option<Outcome>,
}

/// A billiard table in play
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) world: World,
    pub(crate) registry: Registry,
    pub(crate) tick_order: TickOrder,
    pub(crate) time_ticks: u64,
    pub(crate) phase: Phase,
}

impl Simulation {
    /// Build a table, registering cue ball, numbered balls, the collision
    /// resolver, cushions, then pockets.
    pub fn new(config: &TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = World::new(&config.world)?;

        let mut registry = Registry::new();
        for spec in &config.balls {
            let body = Body::new(spec.id, &config.material_for(spec), spec.pos)?;
            registry.push(Actor::Ball(body));
        }
        registry.push(Actor::Resolver(CollisionResolver::new()));
        for cushion in &config.cushions {
            registry.push(Actor::Cushion(Boundary::new(cushion)?));
        }
        for pocket in &config.pockets {
            registry.push(Actor::Pocket(Pocket::new(pocket)?));
        }

        log::debug!(
            "table ready: {} balls, {} cushions, {} pockets, {:?} tick order",
            config.balls.len(),
            config.cushions.len(),
            config.pockets.len(),
            config.tick_order
        );

        Ok(Self::from_parts(world, registry, config.tick_order))
    }

    /// Assemble a simulation from a hand-built registry
    pub fn from_parts(world: World, registry: Registry, tick_order: TickOrder) -> Self {
        Self {
            world,
            registry,
            tick_order,
            time_ticks: 0,
            phase: Phase::Running,
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[inline]
    pub fn tick_order(&self) -> TickOrder {
        self.tick_order
    }

    #[inline]
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Running => None,
            Phase::Finished(outcome) => Some(outcome),
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    pub fn cue_ball(&self) -> Option<&Body> {
        self.registry.cue_ball()
    }

    /// Strike the cue ball. `contact_point` is the lever arm in metres
    /// (see [`crate::shot::AimingCircle::lever_arm`]).
    pub fn strike(&mut self, force: Vec2, contact_point: Option<Vec2>) -> Result<(), SimError> {
        let cue = self.registry.cue_ball_mut().ok_or(SimError::MissingCueBall)?;
        cue.receive_force(force, contact_point);
        log::debug!("cue struck with force {} at {:?}", force, contact_point);
        Ok(())
    }

    /// True when every ball is slow enough to accept a new stroke
    pub fn balls_at_rest(&self) -> bool {
        self.registry
            .bodies()
            .all(|b| b.vel().length() <= STROKE_READY_SPEED)
    }

    pub fn total_score(&self) -> u32 {
        rules::total_score(self.registry.pockets())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_ticks: self.time_ticks,
            balls: self.registry.bodies().map(BallView::from).collect(),
            pockets: self.registry.pockets().cloned().collect(),
            total_score: self.total_score(),
            outcome: self.outcome(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CUE_BALL_ID;

    #[test]
    fn test_registration_order() {
        let sim = Simulation::new(&TableConfig::default()).unwrap();
        let actors = sim.registry().actors();
        assert_eq!(actors.len(), 11 + 1 + 4 + 6);
        assert_eq!(actors[0].as_body().map(Body::id), Some(CUE_BALL_ID));
        assert!(matches!(actors[11], Actor::Resolver(_)));
        assert!(matches!(actors[12], Actor::Cushion(_)));
        assert!(matches!(actors[16], Actor::Pocket(_)));
    }

    #[test]
    fn test_initial_state() {
        let sim = Simulation::new(&TableConfig::default()).unwrap();
        assert_eq!(sim.phase(), Phase::Running);
        assert!(sim.balls_at_rest());
        assert_eq!(sim.total_score(), 0);
        let cue = sim.cue_ball().unwrap();
        assert!((cue.pixel_pos() - Vec2::new(300.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_strike_accumulates_on_cue() {
        let mut sim = Simulation::new(&TableConfig::default()).unwrap();
        sim.strike(Vec2::new(60.0, 0.0), Some(Vec2::new(0.01, 0.0))).unwrap();
        let cue = sim.cue_ball().unwrap();
        assert_eq!(cue.accumulated_force(), Vec2::new(60.0, 0.0));
        assert!(cue.angular_acceleration() > 0.0);
    }

    #[test]
    fn test_strike_without_cue_fails() {
        let mut config = TableConfig::default();
        // Put the cue ball straight into a pocket
        config.balls[0].pos = config.pockets[0].center;
        let mut sim = Simulation::new(&config).unwrap();
        crate::sim::tick(&mut sim);
        assert_eq!(sim.strike(Vec2::X, None), Err(SimError::MissingCueBall));
    }

    #[test]
    fn test_snapshot_serializes() {
        let sim = Simulation::new(&TableConfig::default()).unwrap();
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.balls.len(), 11);
        assert_eq!(snapshot.pockets.len(), 6);
        assert_eq!(snapshot.balls[0].radius, 14.0);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"time_ticks\":0"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = TableConfig::default();
        config.pockets[0].radius = -1.0;
        assert!(matches!(Simulation::new(&config), Err(ConfigError::Invalid(_))));
    }
}
