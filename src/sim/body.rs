//! Ball bodies
//!
//! A ball keeps its position in physical units (metres). Draw-space position
//! is always derived through [`crate::to_pixels`], so the two can never drift
//! apart. Forces pushed in by other table members accumulate until the
//! ball's own update consumes them, then are cleared.

use glam::Vec2;

use super::collision::{friction_force, spin_friction_magnitude};
use super::world::World;
use crate::config::{BallMaterial, ConfigError};
use crate::consts::*;
use crate::{coord_to_meters, to_meters, to_pixels, wrap_degrees};

/// Which canonical cushion produced a [`WallContact`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallKind {
    /// Bottom cushion, outward normal (0, 1)
    Floor,
    /// Outward normal (1, 0)
    Right,
    /// Outward normal (-1, 0)
    Left,
    /// Outward normal (0, -1)
    Top,
}

impl WallKind {
    /// Identify an axis-aligned cushion from its unit outward normal
    pub fn from_normal(normal: Vec2) -> Option<Self> {
        const TOLERANCE: f32 = 1e-6;
        if normal.abs_diff_eq(Vec2::Y, TOLERANCE) {
            Some(WallKind::Floor)
        } else if normal.abs_diff_eq(Vec2::X, TOLERANCE) {
            Some(WallKind::Right)
        } else if normal.abs_diff_eq(Vec2::NEG_X, TOLERANCE) {
            Some(WallKind::Left)
        } else if normal.abs_diff_eq(Vec2::NEG_Y, TOLERANCE) {
            Some(WallKind::Top)
        } else {
            None
        }
    }

    /// True while `vel` still points into this cushion
    #[inline]
    pub fn is_approached_by(self, vel: Vec2) -> bool {
        match self {
            WallKind::Floor => vel.y > 0.0,
            WallKind::Right => vel.x > 0.0,
            WallKind::Left => vel.x < 0.0,
            WallKind::Top => vel.y < 0.0,
        }
    }
}

/// Deferred cushion correction, consumed during the ball's own integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    pub kind: WallKind,
    /// Cushion line coordinate in pixels (y for Floor/Top, x for Left/Right)
    pub coordinate: f32,
}

/// Semi-implicit Euler step: velocity first, then position from the new velocity
#[inline]
pub fn integrate_symplectic(pos: Vec2, vel: Vec2, force: Vec2, mass: f32, dt: f32) -> (Vec2, Vec2) {
    let vel_new = vel + force / mass * dt;
    let pos_new = pos + vel_new * dt;
    (pos_new, vel_new)
}

/// A ball on the table
#[derive(Debug, Clone)]
pub struct Body {
    id: u32,
    /// Physical radius (m)
    radius: f32,
    /// On-screen radius (px)
    pixel_radius: f32,
    mass: f32,
    restitution: f32,
    static_friction: f32,
    dynamic_friction: f32,
    angular_damping: f32,
    moment_of_inertia: f32,

    /// Position (m)
    pos: Vec2,
    /// Velocity (m/s)
    vel: Vec2,
    /// Orientation (degrees, [0, 360))
    angle: f32,
    angular_velocity: f32,
    angular_acceleration: f32,

    force: Vec2,
    messages: Vec<WallContact>,
}

impl Body {
    /// Create a ball at rest at `pixel_pos`
    pub fn new(id: u32, material: &BallMaterial, pixel_pos: Vec2) -> Result<Self, ConfigError> {
        material.validate()?;
        Ok(Self {
            id,
            radius: material.radius,
            pixel_radius: material.pixel_radius,
            mass: material.mass,
            restitution: material.restitution,
            static_friction: material.static_friction,
            dynamic_friction: material.dynamic_friction,
            angular_damping: material.angular_damping,
            // Solid sphere
            moment_of_inertia: 0.4 * material.mass * material.radius * material.radius,
            pos: to_meters(pixel_pos),
            vel: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            force: Vec2::ZERO,
            messages: Vec::new(),
        })
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn is_cue(&self) -> bool {
        self.id == CUE_BALL_ID
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn pixel_radius(&self) -> f32 {
        self.pixel_radius
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    #[inline]
    pub fn static_friction(&self) -> f32 {
        self.static_friction
    }

    #[inline]
    pub fn dynamic_friction(&self) -> f32 {
        self.dynamic_friction
    }

    #[inline]
    pub fn angular_damping(&self) -> f32 {
        self.angular_damping
    }

    #[inline]
    pub fn moment_of_inertia(&self) -> f32 {
        self.moment_of_inertia
    }

    /// Position in metres
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Position in pixels
    #[inline]
    pub fn pixel_pos(&self) -> Vec2 {
        to_pixels(self.pos)
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    pub fn set_velocity(&mut self, vel: Vec2) {
        self.vel = vel;
    }

    /// Orientation in degrees
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_velocity = angular_velocity;
    }

    #[inline]
    pub fn angular_acceleration(&self) -> f32 {
        self.angular_acceleration
    }

    /// Force accumulated since the last update
    #[inline]
    pub fn accumulated_force(&self) -> Vec2 {
        self.force
    }

    #[inline]
    pub fn pending_messages(&self) -> &[WallContact] {
        &self.messages
    }

    /// Add a force, with an optional contact point (m, relative to the center).
    ///
    /// Torque is approximated as `|F|·contact.x` rather than a full 2D
    /// cross product.
    pub fn receive_force(&mut self, force: Vec2, contact_point: Option<Vec2>) {
        self.force += force;
        if let Some(contact) = contact_point {
            let torque = force.length() * contact.x;
            self.angular_acceleration += torque / self.moment_of_inertia;
        }
    }

    /// Add a ball-ball contact force and couple it with spin.
    ///
    /// `sign` is the pair's shared spin comparator and
    /// `relative_angular_velocity` the first ball's spin minus the second's.
    /// Strong enough sliding friction also pushes the ball sideways,
    /// trading linear motion for rotation.
    pub fn receive_force_while_moving(
        &mut self,
        force: Vec2,
        sign: f32,
        relative_angular_velocity: f32,
        dt: f32,
    ) {
        self.force += force;

        let friction = spin_friction_magnitude(
            self.mass,
            self.radius,
            self.restitution,
            relative_angular_velocity,
            dt,
        );
        let torque = -friction * self.radius * sign;
        self.angular_acceleration += torque / self.moment_of_inertia;

        if friction >= SPIN_SLIDE_THRESHOLD {
            let lateral = force.perp().normalize_or_zero() * friction * sign;
            self.force -= lateral;
        }
    }

    pub fn receive_message(&mut self, msg: WallContact) {
        self.messages.push(msg);
    }

    /// Advance this ball by one timestep and discharge everything it received
    pub fn update(&mut self, world: &World) {
        self.apply_friction(world);
        self.advance(world.dt());
        self.settle();
        self.clear_accumulators();
    }

    fn apply_friction(&mut self, world: &World) {
        let friction = friction_force(world.friction(), world.gravity(), self.mass, self.vel);
        self.receive_force(friction, None);
    }

    fn advance(&mut self, dt: f32) {
        (self.pos, self.vel) = integrate_symplectic(self.pos, self.vel, self.force, self.mass, dt);

        self.angular_velocity += self.angular_acceleration * dt;
        self.angular_velocity *= self.angular_damping;
        self.angle = wrap_degrees(self.angle + (self.angular_velocity * dt).to_degrees());

        let messages = std::mem::take(&mut self.messages);
        for msg in messages {
            self.apply_wall_contact(msg);
        }
    }

    /// Snap the ball onto the cushion surface and bounce it, if still heading in
    fn apply_wall_contact(&mut self, msg: WallContact) {
        if !msg.kind.is_approached_by(self.vel) {
            return;
        }
        let wall = coord_to_meters(msg.coordinate);
        match msg.kind {
            WallKind::Floor => {
                self.pos.y = wall - self.radius;
                self.vel.y *= -self.restitution;
            }
            WallKind::Right => {
                self.pos.x = wall - self.radius;
                self.vel.x *= -self.restitution;
            }
            WallKind::Left => {
                self.pos.x = wall + self.radius;
                self.vel.x *= -self.restitution;
            }
            WallKind::Top => {
                self.pos.y = wall + self.radius;
                self.vel.y *= -self.restitution;
            }
        }
    }

    /// Rest clamp against floating-point friction residue
    fn settle(&mut self) {
        if self.vel.length() < REST_LINEAR_SPEED && self.angular_velocity.abs() < REST_ANGULAR_SPEED {
            self.vel = Vec2::ZERO;
            self.angular_velocity = 0.0;
        }
    }

    fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
        self.angular_acceleration = 0.0;
        self.messages.clear();
    }
}
