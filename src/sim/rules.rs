//! End-of-rack rule

use serde::{Deserialize, Serialize};

use super::pocket::Pocket;

/// How a rack finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The cue ball was pocketed
    CueBallFell,
    /// Every numbered ball was pocketed
    AllBallsPocketed,
}

impl Outcome {
    /// Text shown to the player
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::CueBallFell => "Cue Ball Fell! Game Over!",
            Outcome::AllBallsPocketed => "All Balls Fell! Good Job!",
        }
    }
}

/// Check pockets in registration order; within a pocket a fallen cue ball
/// takes precedence.
pub fn evaluate<'a>(pockets: impl IntoIterator<Item = &'a Pocket>) -> Option<Outcome> {
    for pocket in pockets {
        if pocket.cue_ball_fell() {
            return Some(Outcome::CueBallFell);
        }
        if pocket.all_balls_fell_except_cue() {
            return Some(Outcome::AllBallsPocketed);
        }
    }
    None
}

/// Combined score of all pockets
pub fn total_score<'a>(pockets: impl IntoIterator<Item = &'a Pocket>) -> u32 {
    pockets.into_iter().map(Pocket::score).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PocketSpec;
    use crate::sim::pocket::BallEntry;
    use glam::Vec2;

    fn pocket_with(fallen: &[(u32, bool)]) -> Pocket {
        let mut pocket = Pocket::new(&PocketSpec {
            center: Vec2::ZERO,
            radius: 10.0,
        })
        .unwrap();
        // One entry per ball; `true` means it lies inside the pocket
        let snapshot: Vec<BallEntry> = fallen
            .iter()
            .enumerate()
            .map(|(index, &(id, inside))| BallEntry {
                index,
                id,
                pixel_pos: if inside { Vec2::ZERO } else { Vec2::splat(500.0) },
            })
            .collect();
        pocket.absorb(&snapshot);
        pocket
    }

    #[test]
    fn test_no_outcome_while_playing() {
        let pockets = [pocket_with(&[(0, false), (3, true), (4, false)])];
        assert_eq!(evaluate(&pockets), None);
        assert_eq!(total_score(&pockets), 3);
    }

    #[test]
    fn test_first_flagged_pocket_wins() {
        let pockets = [
            pocket_with(&[(0, false), (3, true)]),
            pocket_with(&[(0, true), (1, false)]),
        ];
        assert_eq!(evaluate(&pockets), Some(Outcome::AllBallsPocketed));

        let pockets = [
            pocket_with(&[(0, true), (1, false)]),
            pocket_with(&[(0, false), (3, true)]),
        ];
        assert_eq!(evaluate(&pockets), Some(Outcome::CueBallFell));
    }

    #[test]
    fn test_cue_takes_precedence_within_pocket() {
        let pockets = [pocket_with(&[(0, true), (7, true)])];
        assert_eq!(evaluate(&pockets), Some(Outcome::CueBallFell));
        assert_eq!(total_score(&pockets), 7);
    }

    #[test]
    fn test_messages() {
        assert!(Outcome::CueBallFell.message().contains("Cue Ball"));
        assert!(Outcome::AllBallsPocketed.message().contains("Good Job"));
    }
}
