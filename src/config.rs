//! Table layout and simulation constants
//!
//! Loaded from JSON so tables can be tuned without recompiling. Every
//! section is optional; missing sections fall back to the standard
//! 1200×600 table with a ten-ball rack.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a table layout.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read table config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse table config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

/// How a tick walks the actor registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickOrder {
    /// Visit members in registration order. Contact forces found after the
    /// bodies moved are consumed on the following tick.
    #[default]
    Registration,
    /// Force generators first, then bodies, then pockets
    Phased,
}

/// Global simulation constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Table size in pixels (width, height)
    pub size: Vec2,
    /// Fixed timestep (seconds)
    pub dt: f32,
    /// Rolling friction coefficient applied to every ball
    pub friction: f32,
    /// Gravity vector; only its magnitude enters the friction model
    pub gravity: Vec2,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(1200.0, 600.0),
            dt: 0.005,
            friction: 0.2,
            gravity: Vec2::new(9.81, 9.81),
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(invalid(format!("timestep must be positive, got {}", self.dt)));
        }
        if !(self.friction.is_finite() && self.friction >= 0.0) {
            return Err(invalid(format!(
                "friction coefficient must be non-negative, got {}",
                self.friction
            )));
        }
        if !self.gravity.is_finite() {
            return Err(invalid("gravity must be finite"));
        }
        if !(self.size.x > 0.0 && self.size.y > 0.0) {
            return Err(invalid(format!("table size must be positive, got {}", self.size)));
        }
        Ok(())
    }
}

/// Physical properties shared by a set of balls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallMaterial {
    /// Mass (kg)
    pub mass: f32,
    /// Physical radius (m)
    pub radius: f32,
    /// On-screen radius (px), used for every contact test
    pub pixel_radius: f32,
    pub restitution: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
    /// Per-tick multiplicative decay of angular velocity
    pub angular_damping: f32,
}

impl Default for BallMaterial {
    fn default() -> Self {
        Self {
            mass: BALL_MASS,
            radius: BALL_RADIUS,
            pixel_radius: BALL_PIXEL_RADIUS,
            restitution: BALL_RESTITUTION,
            static_friction: BALL_STATIC_FRICTION,
            dynamic_friction: BALL_DYNAMIC_FRICTION,
            angular_damping: BALL_ANGULAR_DAMPING,
        }
    }
}

impl BallMaterial {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(invalid(format!("ball mass must be positive, got {}", self.mass)));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid(format!("ball radius must be positive, got {}", self.radius)));
        }
        if !(self.pixel_radius.is_finite() && self.pixel_radius > 0.0) {
            return Err(invalid(format!(
                "ball pixel radius must be positive, got {}",
                self.pixel_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(invalid(format!(
                "restitution must lie in [0, 1], got {}",
                self.restitution
            )));
        }
        if !(0.0..=1.0).contains(&self.angular_damping) {
            return Err(invalid(format!(
                "angular damping must lie in [0, 1], got {}",
                self.angular_damping
            )));
        }
        if !(self.static_friction >= 0.0 && self.dynamic_friction >= 0.0) {
            return Err(invalid("ball friction coefficients must be non-negative"));
        }
        Ok(())
    }
}

/// A ball placed on the table at setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallSpec {
    /// Ball number; 0 is the cue ball
    pub id: u32,
    /// Initial position (px)
    pub pos: Vec2,
    /// Overrides the table-wide material
    #[serde(default)]
    pub material: Option<BallMaterial>,
}

impl BallSpec {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            material: None,
        }
    }
}

/// An interval along a cushion where the rail is cut away for a pocket.
/// Measured along the cushion in pixels: x for horizontal cushions, y for
/// vertical ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub from: f32,
    pub to: f32,
}

impl Gap {
    #[inline]
    pub fn contains(&self, along: f32) -> bool {
        along >= self.from && along <= self.to
    }
}

/// A straight cushion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CushionSpec {
    /// Outward normal, pointing off the playing surface
    pub normal: Vec2,
    /// Any point on the cushion line (px)
    pub point: Vec2,
    #[serde(default)]
    pub gaps: Vec<Gap>,
}

/// A pocket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PocketSpec {
    /// Center (px)
    pub center: Vec2,
    /// Absorption radius (px)
    pub radius: f32,
}

/// Complete table layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub world: WorldConfig,
    /// Default material for balls without an override
    pub material: BallMaterial,
    /// Balls in registration order; the cue ball first
    pub balls: Vec<BallSpec>,
    pub cushions: Vec<CushionSpec>,
    pub pockets: Vec<PocketSpec>,
    pub tick_order: TickOrder,
}

impl Default for TableConfig {
    fn default() -> Self {
        let world = WorldConfig::default();
        let (width, height) = (world.size.x, world.size.y);
        let center_gap = vec![Gap {
            from: 570.0,
            to: 630.0,
        }];

        Self {
            world,
            material: BallMaterial::default(),
            balls: standard_rack(Vec2::new(300.0, 300.0), Vec2::new(600.0, 320.0), 4),
            cushions: vec![
                CushionSpec {
                    normal: Vec2::new(0.0, -1.0),
                    point: Vec2::new(150.0, 75.0),
                    gaps: center_gap.clone(),
                },
                CushionSpec {
                    normal: Vec2::new(0.0, 1.0),
                    point: Vec2::new(150.0, height - 80.0),
                    gaps: center_gap,
                },
                CushionSpec {
                    normal: Vec2::new(-1.0, 0.0),
                    point: Vec2::new(150.0, 75.0),
                    gaps: Vec::new(),
                },
                CushionSpec {
                    normal: Vec2::new(1.0, 0.0),
                    point: Vec2::new(width - 150.0, 75.0),
                    gaps: Vec::new(),
                },
            ],
            pockets: vec![
                PocketSpec { center: Vec2::new(1100.0, 575.0), radius: 100.0 },
                PocketSpec { center: Vec2::new(100.0, 575.0), radius: 100.0 },
                PocketSpec { center: Vec2::new(1100.0, 25.0), radius: 100.0 },
                PocketSpec { center: Vec2::new(100.0, 25.0), radius: 100.0 },
                PocketSpec { center: Vec2::new(602.0, 15.0), radius: 75.0 },
                PocketSpec { center: Vec2::new(602.0, 585.0), radius: 75.0 },
            ],
            tick_order: TickOrder::Registration,
        }
    }
}

/// Cue ball plus a triangular rack of `rows` rows opening to the right.
///
/// Ball k of row n sits at `apex + (20n, 20n - 40k)` pixels, numbered
/// from 1 in row-major order.
pub fn standard_rack(cue_pos: Vec2, apex: Vec2, rows: u32) -> Vec<BallSpec> {
    let mut balls = vec![BallSpec::new(CUE_BALL_ID, cue_pos)];
    let mut number = 1;
    for n in 1..=rows {
        for k in 1..=n {
            let (n, k) = (n as f32, k as f32);
            let pos = apex + Vec2::new(20.0 * n, 20.0 * n - 40.0 * k);
            balls.push(BallSpec::new(number, pos));
            number += 1;
        }
    }
    balls
}

impl TableConfig {
    /// Parse and validate a JSON layout
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON layout from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Material for a ball, falling back to the table default
    pub fn material_for(&self, ball: &BallSpec) -> BallMaterial {
        ball.material.unwrap_or(self.material)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.material.validate()?;

        let mut seen = HashSet::new();
        for ball in &self.balls {
            if !seen.insert(ball.id) {
                return Err(invalid(format!("duplicate ball id {}", ball.id)));
            }
            if !ball.pos.is_finite() {
                return Err(invalid(format!("ball {} has a non-finite position", ball.id)));
            }
            if let Some(material) = &ball.material {
                material.validate()?;
            }
        }
        if !seen.contains(&CUE_BALL_ID) {
            return Err(invalid("layout has no cue ball (id 0)"));
        }

        for cushion in &self.cushions {
            if !(cushion.normal.is_finite() && cushion.normal.length_squared() > 0.0) {
                return Err(invalid("cushion normal must be a non-zero vector"));
            }
            if cushion.gaps.iter().any(|g| g.from > g.to) {
                return Err(invalid("cushion gap must have from <= to"));
            }
        }

        for pocket in &self.pockets {
            if !(pocket.radius.is_finite() && pocket.radius > 0.0) {
                return Err(invalid(format!(
                    "pocket radius must be positive, got {}",
                    pocket.radius
                )));
            }
        }

        Ok(())
    }
}
