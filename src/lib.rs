//! Billiard Sim - fixed-step physics for a pocket billiard table
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, contact forces, cushions, pockets)
//! - `config`: Data-driven table layout (JSON)
//! - `shot`: Cue gesture helpers for the input layer

pub mod config;
pub mod shot;
pub mod sim;

pub use config::{ConfigError, TableConfig};
pub use sim::{Outcome, Simulation, SimError, tick};

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Draw-space scale: pixels per physical metre
    pub const PIXELS_PER_METER: f32 = 350.0;

    /// Identifier reserved for the cue ball
    pub const CUE_BALL_ID: u32 = 0;

    /// Linear speed (m/s) below which a ball may be snapped to rest
    pub const REST_LINEAR_SPEED: f32 = 1e-2;
    /// Angular speed below which a ball may be snapped to rest
    pub const REST_ANGULAR_SPEED: f32 = 10.0;
    /// Speed (m/s) under which every ball counts as stopped for a new stroke
    pub const STROKE_READY_SPEED: f32 = 0.1;

    /// Friction magnitude at which spin coupling starts to push sideways
    pub const SPIN_SLIDE_THRESHOLD: f32 = 2.5;

    /// Default ball material (a standard pool ball)
    pub const BALL_MASS: f32 = 0.17;
    pub const BALL_RADIUS: f32 = 0.028;
    /// On-screen radius, fixed independently of the physical radius
    pub const BALL_PIXEL_RADIUS: f32 = 14.0;
    pub const BALL_RESTITUTION: f32 = 0.9;
    pub const BALL_STATIC_FRICTION: f32 = 0.2;
    pub const BALL_DYNAMIC_FRICTION: f32 = BALL_STATIC_FRICTION - 0.05;
    pub const BALL_ANGULAR_DAMPING: f32 = 0.98;
}

/// Convert a physical position (metres) to draw space (pixels)
#[inline]
pub fn to_pixels(meters: Vec2) -> Vec2 {
    meters * consts::PIXELS_PER_METER
}

/// Convert a draw-space position (pixels) to physical units (metres)
#[inline]
pub fn to_meters(pixels: Vec2) -> Vec2 {
    pixels / consts::PIXELS_PER_METER
}

/// Convert a single draw-space coordinate to metres
#[inline]
pub fn coord_to_meters(pixels: f32) -> f32 {
    pixels / consts::PIXELS_PER_METER
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unit_conversion() {
        let px = to_pixels(Vec2::new(1.0, 0.5));
        assert!((px.x - 350.0).abs() < 1e-4);
        assert!((px.y - 175.0).abs() < 1e-4);

        let m = to_meters(Vec2::new(300.0, 300.0));
        assert!((m.x - 300.0 / 350.0).abs() < 1e-6);
        assert!((coord_to_meters(520.0) - 520.0 / 350.0).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert!((wrap_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((wrap_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert_eq!(wrap_degrees(360.0), 0.0);
    }

    proptest! {
        #[test]
        fn wrapped_angle_stays_in_one_turn(angle in -1.0e6f32..1.0e6) {
            let w = wrap_degrees(angle);
            prop_assert!((0.0..360.0).contains(&w));
        }
    }
}
