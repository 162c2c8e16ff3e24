//! Cue stroke helpers for the input layer
//!
//! Turns a drag gesture into a cue force and a click on the aiming circle
//! into the contact-point lever arm passed to [`crate::Simulation::strike`].

use glam::Vec2;

use crate::consts::BALL_RADIUS;

/// Force applied for a zero-length stroke (N)
const BASE_FORCE: f32 = 50.0;
/// Drag distance (px) per extra newton
const PIXELS_PER_NEWTON: f32 = 7.5;

/// Cue force for a drag from `start` to `end` (px).
///
/// The cue is pulled back, so the ball is pushed opposite to the drag.
/// Returns `None` for a click without movement.
pub fn cue_force(start: Vec2, end: Vec2) -> Option<Vec2> {
    let drag = end - start;
    let direction = drag.try_normalize()?;
    Some(-direction * (BASE_FORCE + drag.length() / PIXELS_PER_NEWTON))
}

/// Magnified picture of the cue ball where the player picks the contact point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimingCircle {
    /// Center (px)
    pub center: Vec2,
    /// Radius (px)
    pub radius: f32,
}

impl AimingCircle {
    pub const DEFAULT_RADIUS: f32 = 100.0;

    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            radius: Self::DEFAULT_RADIUS,
        }
    }

    pub fn contains(&self, click: Vec2) -> bool {
        click.distance_squared(self.center) <= self.radius * self.radius
    }

    /// Lever arm (m) for a click, with y flipped so up is positive.
    ///
    /// The circle's radius maps onto the physical ball radius.
    pub fn lever_arm(&self, click: Vec2) -> Vec2 {
        let offset = click - self.center;
        Vec2::new(offset.x, -offset.y) * (BALL_RADIUS / self.radius)
    }

    /// Lever arm for a click, or `None` if it missed the circle
    pub fn pick(&self, click: Vec2) -> Option<Vec2> {
        self.contains(click).then(|| self.lever_arm(click))
    }
}
