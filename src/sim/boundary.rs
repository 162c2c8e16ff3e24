//! Straight cushions
//!
//! A cushion acts in two phases: an impulse-as-force this tick, and a wall
//! message that lets the ball snap onto the cushion surface during its own
//! integration, so large timesteps can't carry it through the rail.

use glam::Vec2;

use super::body::{Body, WallContact, WallKind};
use super::collision::impact_force_by_cushion;
use crate::config::{ConfigError, CushionSpec, Gap};

/// Everything a cushion wants to push into one ball this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CushionContact {
    /// Registry index of the ball
    pub index: usize,
    pub force: Vec2,
    pub message: Option<WallContact>,
}

/// A straight cushion with optional pocket cut-outs
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    normal: Vec2,
    point: Vec2,
    gaps: Vec<Gap>,
    kind: Option<WallKind>,
}

impl Boundary {
    pub fn new(spec: &CushionSpec) -> Result<Self, ConfigError> {
        let normal = spec.normal.try_normalize().ok_or_else(|| {
            ConfigError::Invalid(format!("cushion normal {} cannot be normalized", spec.normal))
        })?;
        Ok(Self {
            normal,
            point: spec.point,
            gaps: spec.gaps.clone(),
            kind: WallKind::from_normal(normal),
        })
    }

    /// Unit outward normal
    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// A point on the cushion line (px)
    #[inline]
    pub fn point(&self) -> Vec2 {
        self.point
    }

    /// Canonical wall, if the cushion is axis-aligned
    #[inline]
    pub fn kind(&self) -> Option<WallKind> {
        self.kind
    }

    /// Whether a ball at `pixel_pos` sits over a pocket cut-out of this cushion
    pub fn in_gap(&self, pixel_pos: Vec2) -> bool {
        let along = if self.normal.y.abs() >= self.normal.x.abs() {
            pixel_pos.x
        } else {
            pixel_pos.y
        };
        self.gaps.iter().any(|gap| gap.contains(along))
    }

    fn message_for(&self, body: &Body) -> Option<WallContact> {
        let kind = self.kind?;
        if !kind.is_approached_by(body.vel()) {
            return None;
        }
        let coordinate = match kind {
            WallKind::Floor | WallKind::Top => self.point.y,
            WallKind::Left | WallKind::Right => self.point.x,
        };
        Some(WallContact { kind, coordinate })
    }

    /// Contacts for every ball reaching this cushion outside its gaps
    pub fn contacts(&self, bodies: &[(usize, &Body)], dt: f32) -> Vec<CushionContact> {
        bodies
            .iter()
            .filter(|(_, body)| !self.in_gap(body.pixel_pos()))
            .filter_map(|&(index, body)| {
                let force = impact_force_by_cushion(body, self.normal, self.point, dt)?;
                log::trace!("ball {} hit cushion {:?}", body.id(), self.kind);
                Some(CushionContact {
                    index,
                    force,
                    message: self.message_for(body),
                })
            })
            .collect()
    }
}

impl CushionContact {
    pub fn apply(&self, body: &mut Body) {
        body.receive_force(self.force, None);
        if let Some(msg) = self.message {
            body.receive_message(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BallMaterial;

    fn ball(pixel_pos: Vec2, vel: Vec2) -> Body {
        Body::new(3, &BallMaterial::default(), pixel_pos)
            .unwrap()
            .with_velocity(vel)
    }

    fn floor() -> Boundary {
        Boundary::new(&CushionSpec {
            normal: Vec2::new(0.0, 2.0),
            point: Vec2::new(150.0, 520.0),
            gaps: vec![Gap {
                from: 570.0,
                to: 630.0,
            }],
        })
        .unwrap()
    }

    #[test]
    fn test_normal_is_normalized() {
        let boundary = floor();
        assert_eq!(boundary.normal(), Vec2::Y);
        assert_eq!(boundary.kind(), Some(WallKind::Floor));
    }

    #[test]
    fn test_rejects_zero_normal() {
        let spec = CushionSpec {
            normal: Vec2::ZERO,
            point: Vec2::ZERO,
            gaps: Vec::new(),
        };
        assert!(Boundary::new(&spec).is_err());
    }

    #[test]
    fn test_contact_emits_force_and_message() {
        let b = ball(Vec2::new(300.0, 510.0), Vec2::new(0.2, 1.0));
        let contacts = floor().contacts(&[(4, &b)], 0.005);
        assert_eq!(contacts.len(), 1);
        let contact = contacts[0];
        assert_eq!(contact.index, 4);
        assert!(contact.force.y < 0.0);
        assert_eq!(
            contact.message,
            Some(WallContact {
                kind: WallKind::Floor,
                coordinate: 520.0
            })
        );
    }

    #[test]
    fn test_gap_lets_ball_through() {
        let b = ball(Vec2::new(600.0, 515.0), Vec2::new(0.0, 1.0));
        let boundary = floor();
        assert!(boundary.in_gap(b.pixel_pos()));
        assert!(boundary.contacts(&[(1, &b)], 0.005).is_empty());
    }

    #[test]
    fn test_vertical_cushion_gap_uses_y() {
        let boundary = Boundary::new(&CushionSpec {
            normal: Vec2::NEG_X,
            point: Vec2::new(150.0, 75.0),
            gaps: vec![Gap {
                from: 280.0,
                to: 320.0,
            }],
        })
        .unwrap();
        assert!(boundary.in_gap(Vec2::new(155.0, 300.0)));
        assert!(!boundary.in_gap(Vec2::new(300.0, 150.0)));
    }

    #[test]
    fn test_diagonal_cushion_sends_no_message() {
        let boundary = Boundary::new(&CushionSpec {
            normal: Vec2::new(1.0, 1.0),
            point: Vec2::new(500.0, 500.0),
            gaps: Vec::new(),
        })
        .unwrap();
        let b = ball(Vec2::new(495.0, 495.0), Vec2::new(1.0, 1.0));
        let contacts = boundary.contacts(&[(0, &b)], 0.005);
        assert_eq!(contacts.len(), 1);
        assert!(contacts[0].message.is_none());
    }

    #[test]
    fn test_apply_queues_message() {
        let mut b = ball(Vec2::new(300.0, 510.0), Vec2::new(0.0, 1.0));
        let contacts = floor().contacts(&[(0, &b)], 0.005);
        contacts[0].apply(&mut b);
        assert_eq!(b.pending_messages().len(), 1);
        assert_eq!(b.accumulated_force(), contacts[0].force);
    }
}
