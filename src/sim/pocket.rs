//! Pockets
//!
//! A pocket swallows any ball whose draw-space center comes within its
//! radius. It keeps its own score and the two end-of-rack flags.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, PocketSpec};
use crate::consts::CUE_BALL_ID;

/// A ball as seen by a pocket scan, copied out of the registry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallEntry {
    /// Registry index at the time of the scan
    pub index: usize,
    pub id: u32,
    pub pixel_pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pocket {
    center: Vec2,
    radius: f32,
    score: u32,
    cue_ball_fell: bool,
    all_balls_fell_except_cue: bool,
}

impl Pocket {
    pub fn new(spec: &PocketSpec) -> Result<Self, ConfigError> {
        if !(spec.radius.is_finite() && spec.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "pocket radius must be positive, got {}",
                spec.radius
            )));
        }
        Ok(Self {
            center: spec.center,
            radius: spec.radius,
            score: 0,
            cue_ball_fell: false,
            all_balls_fell_except_cue: false,
        })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Sum of the numbers of balls dropped here (cue excluded)
    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn cue_ball_fell(&self) -> bool {
        self.cue_ball_fell
    }

    #[inline]
    pub fn all_balls_fell_except_cue(&self) -> bool {
        self.all_balls_fell_except_cue
    }

    #[inline]
    pub fn captures(&self, pixel_pos: Vec2) -> bool {
        pixel_pos.distance(self.center) < self.radius
    }

    /// Score every ball of `snapshot` that fell in, returning their registry
    /// indices in scan order. The caller removes them from the registry.
    ///
    /// The cue ball only raises the cue flag. Numbered balls add their number;
    /// the one that leaves no numbered ball on the table also raises the
    /// all-balls flag.
    pub fn absorb(&mut self, snapshot: &[BallEntry]) -> Vec<usize> {
        let mut numbered_left = snapshot.iter().filter(|b| b.id != CUE_BALL_ID).count();
        let mut dropped = Vec::new();

        for ball in snapshot {
            if !self.captures(ball.pixel_pos) {
                continue;
            }
            if ball.id == CUE_BALL_ID {
                self.cue_ball_fell = true;
                log::debug!("cue ball fell into pocket at {}", self.center);
            } else {
                numbered_left -= 1;
                self.score += ball.id;
                if numbered_left == 0 {
                    self.all_balls_fell_except_cue = true;
                }
                log::debug!(
                    "ball {} fell into pocket at {} (pocket score {})",
                    ball.id,
                    self.center,
                    self.score
                );
            }
            dropped.push(ball.index);
        }

        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pocket() -> Pocket {
        Pocket::new(&PocketSpec {
            center: Vec2::new(100.0, 25.0),
            radius: 100.0,
        })
        .unwrap()
    }

    fn entry(index: usize, id: u32, x: f32, y: f32) -> BallEntry {
        BallEntry {
            index,
            id,
            pixel_pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let spec = PocketSpec {
            center: Vec2::ZERO,
            radius: 0.0,
        };
        assert!(Pocket::new(&spec).is_err());
    }

    #[test]
    fn test_numbered_ball_scores() {
        let mut p = pocket();
        let snapshot = [
            entry(0, 0, 300.0, 300.0),
            entry(1, 4, 120.0, 40.0),
            entry(2, 7, 600.0, 300.0),
        ];
        assert_eq!(p.absorb(&snapshot), vec![1]);
        assert_eq!(p.score(), 4);
        assert!(!p.cue_ball_fell());
        assert!(!p.all_balls_fell_except_cue());
    }

    #[test]
    fn test_cue_ball_sets_flag_without_scoring() {
        let mut p = pocket();
        let snapshot = [entry(0, 0, 110.0, 30.0), entry(1, 3, 600.0, 300.0)];
        assert_eq!(p.absorb(&snapshot), vec![0]);
        assert_eq!(p.score(), 0);
        assert!(p.cue_ball_fell());
    }

    #[test]
    fn test_last_numbered_ball_ends_rack() {
        let mut p = pocket();
        let snapshot = [entry(0, 0, 300.0, 300.0), entry(1, 9, 100.0, 30.0)];
        assert_eq!(p.absorb(&snapshot), vec![1]);
        assert_eq!(p.score(), 9);
        assert!(p.all_balls_fell_except_cue());
        assert!(!p.cue_ball_fell());
    }

    #[test]
    fn test_two_last_balls_same_tick() {
        let mut p = pocket();
        let snapshot = [
            entry(0, 0, 300.0, 300.0),
            entry(1, 2, 100.0, 30.0),
            entry(2, 5, 90.0, 20.0),
        ];
        assert_eq!(p.absorb(&snapshot), vec![1, 2]);
        assert_eq!(p.score(), 7);
        assert!(p.all_balls_fell_except_cue());
    }

    #[test]
    fn test_boundary_distance_is_not_captured() {
        let p = pocket();
        assert!(!p.captures(Vec2::new(200.0, 25.0)));
        assert!(p.captures(Vec2::new(199.9, 25.0)));
    }
}
