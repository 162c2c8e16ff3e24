//! Ball-ball collision resolver

use glam::Vec2;

use super::body::Body;
use super::collision::{impact_force_between, spin_sign};

/// A resolved ball-ball contact, ready to be pushed into both balls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairContact {
    /// Registry index of the first ball
    pub a: usize,
    /// Registry index of the second ball
    pub b: usize,
    /// Force on `a`; `b` receives the negation
    pub force: Vec2,
    /// Spin comparator shared by both balls
    pub sign: f32,
    /// `a`'s angular velocity minus `b`'s
    pub relative_angular_velocity: f32,
}

/// Checks every unordered pair of balls once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResolver;

impl CollisionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Find all touching, approaching pairs among `bodies` (registry index, ball).
    ///
    /// Contact forces depend only on positions and velocities, which force
    /// injection doesn't touch, so every pair can be found before any is applied.
    pub fn contacts(&self, bodies: &[(usize, &Body)], dt: f32) -> Vec<PairContact> {
        let mut contacts = Vec::new();
        for (i, &(ia, a)) in bodies.iter().enumerate() {
            for &(ib, b) in &bodies[i + 1..] {
                let Some(force) = impact_force_between(a, b, dt) else {
                    continue;
                };
                log::trace!("contact between ball {} and ball {}: {}", a.id(), b.id(), force);
                contacts.push(PairContact {
                    a: ia,
                    b: ib,
                    force,
                    sign: spin_sign(a, b),
                    relative_angular_velocity: a.angular_velocity() - b.angular_velocity(),
                });
            }
        }
        contacts
    }
}

impl PairContact {
    /// Push this contact into both balls
    pub fn apply(&self, a: &mut Body, b: &mut Body, dt: f32) {
        a.receive_force_while_moving(self.force, self.sign, self.relative_angular_velocity, dt);
        b.receive_force_while_moving(-self.force, self.sign, self.relative_angular_velocity, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BallMaterial;

    fn ball(id: u32, pixel_pos: Vec2, vel: Vec2) -> Body {
        Body::new(id, &BallMaterial::default(), pixel_pos)
            .unwrap()
            .with_velocity(vel)
    }

    #[test]
    fn test_finds_only_touching_pairs() {
        let a = ball(0, Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0));
        let b = ball(1, Vec2::new(120.0, 100.0), Vec2::ZERO);
        let c = ball(2, Vec2::new(400.0, 100.0), Vec2::ZERO);
        let bodies = vec![(0, &a), (1, &b), (5, &c)];

        let contacts = CollisionResolver::new().contacts(&bodies, 0.005);
        assert_eq!(contacts.len(), 1);
        assert_eq!((contacts[0].a, contacts[0].b), (0, 1));
        assert!(contacts[0].force.x < 0.0);
        assert_eq!(contacts[0].sign, -1.0);
    }

    #[test]
    fn test_apply_is_equal_and_opposite() {
        let mut a = ball(0, Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0));
        let mut b = ball(1, Vec2::new(120.0, 100.0), Vec2::ZERO);
        let contacts = CollisionResolver::new().contacts(&[(0, &a), (1, &b)], 0.005);
        let contact = contacts[0];
        contact.apply(&mut a, &mut b, 0.005);

        assert_eq!(a.accumulated_force(), contact.force);
        assert_eq!(b.accumulated_force(), -contact.force);
    }

    #[test]
    fn test_relative_spin_is_first_minus_second() {
        let mut a = ball(0, Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0));
        let b = ball(1, Vec2::new(120.0, 100.0), Vec2::ZERO);
        a.set_angular_velocity(40.0);
        let contacts = CollisionResolver::new().contacts(&[(0, &a), (1, &b)], 0.005);
        assert_eq!(contacts[0].relative_angular_velocity, 40.0);
        assert_eq!(contacts[0].sign, 1.0);
    }
}
