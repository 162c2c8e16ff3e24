//! Contact and friction force models
//!
//! Everything here is a pure function of body state. Collisions are resolved
//! as impulses spread over one timestep ("impulse-as-force"), so they add up
//! with friction and cue forces in each ball's force accumulator before the
//! next integration.

use glam::Vec2;

use super::body::Body;

/// Kinetic friction: constant magnitude `m·|g|·μ` opposing the velocity.
///
/// There is no static threshold; a slowly rolling ball keeps receiving the
/// full opposing force until the rest clamp stops it.
pub fn friction_force(friction: f32, gravity: Vec2, mass: f32, vel: Vec2) -> Vec2 {
    if vel.length_squared() > 0.0 {
        -vel.normalize() * (mass * gravity.length() * friction)
    } else {
        Vec2::ZERO
    }
}

/// Force on `a` from a ball-ball contact with `b` (apply the negation to `b`).
///
/// Overlap is tested in draw space against the on-screen radii. Returns `None`
/// when the balls don't touch, share a center, or are moving apart along
/// the line of centers.
pub fn impact_force_between(a: &Body, b: &Body, dt: f32) -> Option<Vec2> {
    let offset = b.pixel_pos() - a.pixel_pos();
    let distance = offset.length();
    if distance > a.pixel_radius() + b.pixel_radius() || distance == 0.0 {
        return None;
    }

    let normal = offset / distance;
    let va = a.vel().dot(normal);
    let vb = b.vel().dot(normal);
    if va < vb {
        return None;
    }

    let e = a.restitution() * b.restitution();
    let reduced_mass = 1.0 / (1.0 / a.mass() + 1.0 / b.mass());
    Some(normal * (-(e + 1.0) * va + (e + 1.0) * vb) * reduced_mass / dt)
}

/// Force from a fixed straight cushion with outward `normal` through `point` (px).
///
/// Fires when the ball reaches the line (using its on-screen radius) while
/// still moving outward.
pub fn impact_force_by_cushion(body: &Body, normal: Vec2, point: Vec2, dt: f32) -> Option<Vec2> {
    let penetration = normal.dot(body.pixel_pos() - point);
    let v = normal.dot(body.vel());
    if penetration + body.pixel_radius() > 0.0 && v > 0.0 {
        let e = body.restitution();
        Some(normal * (-(e + 1.0) * v) * body.mass() / dt)
    } else {
        None
    }
}

/// Sign shared by both balls of a contact when coupling spin: +1 if `a`
/// spins faster than `b`, else -1.
#[inline]
pub fn spin_sign(a: &Body, b: &Body) -> f32 {
    if a.angular_velocity() > b.angular_velocity() {
        1.0
    } else {
        -1.0
    }
}

/// Magnitude of the sliding friction produced while two spinning balls touch.
///
/// `5·m·r·|Δω| / (7·(1−e)·Δt) · π/180`. A perfectly elastic ball (e = 1)
/// has no sliding phase and yields zero.
pub fn spin_friction_magnitude(
    mass: f32,
    radius: f32,
    restitution: f32,
    relative_angular_velocity: f32,
    dt: f32,
) -> f32 {
    let inelastic = 1.0 - restitution;
    if inelastic <= f32::EPSILON {
        return 0.0;
    }
    5.0 * mass * radius * relative_angular_velocity.abs() / (7.0 * inelastic * dt)
        * (std::f32::consts::PI / 180.0)
}
