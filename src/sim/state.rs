//! Round state and outcome rules
//!
//! Everything needed to restore a round lives in [`RoundState`].

use serde::{Deserialize, Serialize};

use crate::consts::{INITIAL_TIME, TARGET_COUNT};

/// Result of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Clock running, targets left
    #[default]
    InProgress,
    /// Every target destroyed
    Won,
    /// Clock ran out with targets left
    Lost,
}

impl Outcome {
    /// Won and Lost are terminal
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Decide the outcome for a given clock and target count.
///
/// A cleared board wins even when the clock reads exactly zero, so a last
/// target destroyed on the final frame counts as a win.
pub fn evaluate_outcome(time_left: f64, targets_remaining: u32) -> Outcome {
    if targets_remaining == 0 {
        Outcome::Won
    } else if time_left <= 0.0 {
        Outcome::Lost
    } else {
        Outcome::InProgress
    }
}

/// Authoritative round clock and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    /// Seconds left on the clock (never negative)
    pub time_left: f64,
    /// Seconds played so far (never decreases)
    pub elapsed_time: f64,
    /// Targets still on the board
    pub targets_remaining: u32,
    pub outcome: Outcome,
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(TARGET_COUNT, INITIAL_TIME)
    }
}

impl RoundState {
    pub fn new(target_count: u32, initial_time: f64) -> Self {
        Self {
            time_left: initial_time.max(0.0),
            elapsed_time: 0.0,
            targets_remaining: target_count,
            outcome: Outcome::InProgress,
        }
    }

    /// Summary for the game-over screen, once the round has ended
    pub fn summary(&self) -> Option<RoundSummary> {
        match self.outcome {
            Outcome::InProgress => None,
            Outcome::Won => Some(RoundSummary {
                won: true,
                elapsed: self.elapsed_time,
            }),
            Outcome::Lost => Some(RoundSummary {
                won: false,
                elapsed: self.elapsed_time,
            }),
        }
    }
}

/// What the game-over screen shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub won: bool,
    /// Seconds played
    pub elapsed: f64,
}
