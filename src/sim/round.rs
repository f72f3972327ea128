//! Round controller
//!
//! Sole owner of [`RoundState`]. The host calls [`RoundController::advance`]
//! once per frame and [`RoundController::apply_hit_event`] for each
//! cannonball contact, always from the same thread and never mid-frame.

use serde::{Deserialize, Serialize};

use super::entity::{EntityId, TargetSize};
use super::state::{Outcome, RoundState, RoundSummary, evaluate_outcome};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::BLOCKER_TIME_PENALTY;

/// What the cannonball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitCategory {
    Blocker,
    Target(TargetSize),
    Wall,
}

/// A cannonball contact reported by the physics engine, consumed once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitEvent {
    pub category: HitCategory,
    /// Struck entity; `None` for the scene border
    pub entity: Option<EntityId>,
}

impl HitEvent {
    pub fn wall() -> Self {
        Self {
            category: HitCategory::Wall,
            entity: None,
        }
    }

    pub fn blocker(id: EntityId) -> Self {
        Self {
            category: HitCategory::Blocker,
            entity: Some(id),
        }
    }

    pub fn target(id: EntityId, size: TargetSize) -> Self {
        Self {
            category: HitCategory::Target(size),
            entity: Some(id),
        }
    }
}

/// Work the caller must carry out after a hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResponse {
    pub outcome: Outcome,
    /// Remove the projectile and clear the cannon's in-flight flag
    pub ball_consumed: bool,
    /// Target to remove from the scene
    pub removed_target: Option<EntityId>,
    /// Net change applied to the clock
    pub time_delta: f64,
}

/// Result of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceReport {
    pub outcome: Outcome,
    /// Formatted clock for the HUD
    pub time_label: String,
}

/// Format seconds for the time-remaining label
pub fn format_time_left(time_left: f64) -> String {
    format!("{time_left:.2} seconds")
}

/// Round clock and scoring
#[derive(Debug, Clone, Default)]
pub struct RoundController {
    state: RoundState,
}

impl RoundController {
    pub fn new(target_count: u32, initial_time: f64) -> Self {
        let mut controller = Self::default();
        controller.initialize(target_count, initial_time);
        controller
    }

    /// Resume a saved round exactly as stored
    pub fn from_state(state: RoundState) -> Self {
        Self { state }
    }

    /// Start (or restart) a round
    pub fn initialize(&mut self, target_count: u32, initial_time: f64) {
        self.state = RoundState::new(target_count, initial_time);
        log::info!(
            "round start: {} targets, {:.2}s on the clock",
            target_count,
            self.state.time_left
        );
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    pub fn time_left(&self) -> f64 {
        self.state.time_left
    }

    pub fn elapsed_time(&self) -> f64 {
        self.state.elapsed_time
    }

    pub fn targets_remaining(&self) -> u32 {
        self.state.targets_remaining
    }

    pub fn summary(&self) -> Option<RoundSummary> {
        self.state.summary()
    }

    pub fn time_label(&self) -> String {
        format_time_left(self.state.time_left)
    }

    /// Advance the clock by one frame.
    ///
    /// Negative or non-finite deltas are treated as 0. Once the round is
    /// over the clock is frozen and the terminal outcome is reported again.
    pub fn advance(&mut self, delta_seconds: f64) -> AdvanceReport {
        if !self.state.outcome.is_terminal() {
            let delta = sanitize_delta(delta_seconds);
            self.state.elapsed_time += delta;
            self.state.time_left = (self.state.time_left - delta).max(0.0);
            self.settle();
        }

        AdvanceReport {
            outcome: self.state.outcome,
            time_label: self.time_label(),
        }
    }

    /// Apply a cannonball contact
    pub fn apply_hit_event(&mut self, event: &HitEvent, audio: &mut impl AudioSink) -> HitResponse {
        let mut response = HitResponse {
            outcome: self.state.outcome,
            ball_consumed: true,
            removed_target: None,
            time_delta: 0.0,
        };

        if self.state.outcome.is_terminal() {
            return response;
        }

        let before = self.state.time_left;
        match event.category {
            HitCategory::Wall => {}
            HitCategory::Blocker => {
                audio.play(SoundEffect::BlockerHit);
                self.state.time_left = (self.state.time_left - BLOCKER_TIME_PENALTY).max(0.0);
                log::debug!("blocker hit: -{BLOCKER_TIME_PENALTY:.1}s");
            }
            HitCategory::Target(size) => {
                self.state.targets_remaining = self.state.targets_remaining.saturating_sub(1);
                response.removed_target = event.entity;
                audio.play(SoundEffect::TargetHit);
                self.state.time_left += size.time_bonus();
                log::debug!(
                    "target hit ({:?}): +{:.1}s, {} left",
                    size,
                    size.time_bonus(),
                    self.state.targets_remaining
                );
            }
        }

        self.settle();
        response.time_delta = self.state.time_left - before;
        response.outcome = self.state.outcome;
        response
    }

    /// Re-evaluate the outcome after a mutation
    fn settle(&mut self) {
        let outcome = evaluate_outcome(self.state.time_left, self.state.targets_remaining);
        if outcome != self.state.outcome {
            log::info!(
                "round over: {:?} after {:.2}s",
                outcome,
                self.state.elapsed_time
            );
            self.state.outcome = outcome;
        }
    }
}

fn sanitize_delta(delta: f64) -> f64 {
    if delta.is_finite() && delta >= 0.0 {
        delta
    } else {
        log::warn!("rejected frame delta {delta}, using 0");
        0.0
    }
}

/// Turns host timestamps into frame deltas.
///
/// The first timestamp after a (re)start yields 0 so the round does not
/// lose however long the scene took to appear.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    previous: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous timestamp
    pub fn delta(&mut self, now: f64) -> f64 {
        let delta = match self.previous {
            Some(previous) => now - previous,
            None => 0.0,
        };
        self.previous = Some(now);
        delta
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fresh() -> RoundController {
        RoundController::new(9, 10.0)
    }

    #[test]
    fn test_zero_advance_keeps_fresh_round() {
        let mut round = fresh();
        let report = round.advance(0.0);
        assert_eq!(report.outcome, Outcome::InProgress);
        assert_eq!(round.time_left(), 10.0);
        assert_eq!(round.targets_remaining(), 9);
        assert_eq!(report.time_label, "10.00 seconds");
    }

    #[test]
    fn test_clock_runs_out() {
        let mut round = fresh();
        for _ in 0..9 {
            assert_eq!(round.advance(1.0).outcome, Outcome::InProgress);
        }
        let report = round.advance(1.0);
        assert_eq!(report.outcome, Outcome::Lost);
        assert_eq!(round.time_left(), 0.0);

        // Terminal state is sticky
        let report = round.advance(1.0);
        assert_eq!(report.outcome, Outcome::Lost);
        assert_eq!(report.time_label, "0.00 seconds");
        assert_eq!(round.time_left(), 0.0);
        assert_eq!(round.elapsed_time(), 10.0);
    }

    #[test]
    fn test_overshoot_clamps_to_zero() {
        let mut round = fresh();
        round.advance(12.5);
        assert_eq!(round.time_left(), 0.0);
        assert_eq!(round.elapsed_time(), 12.5);
        assert_eq!(round.outcome(), Outcome::Lost);
    }

    #[test]
    fn test_negative_delta_is_clamped() {
        let mut round = fresh();
        round.advance(-3.0);
        round.advance(f64::NAN);
        assert_eq!(round.time_left(), 10.0);
        assert_eq!(round.elapsed_time(), 0.0);
        assert_eq!(round.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_blocker_penalty() {
        let mut round = fresh();
        let mut sounds: Vec<SoundEffect> = Vec::new();
        let response = round.apply_hit_event(&HitEvent::blocker(EntityId(1)), &mut sounds);
        assert_eq!(round.time_left(), 9.0);
        assert_eq!(response.time_delta, -1.0);
        assert!(response.ball_consumed);
        assert_eq!(response.removed_target, None);
        assert_eq!(sounds, vec![SoundEffect::BlockerHit]);
    }

    #[test]
    fn test_blocker_penalty_floors_at_zero() {
        let mut round = fresh();
        round.advance(9.5);
        let mut sounds: Vec<SoundEffect> = Vec::new();
        let response = round.apply_hit_event(&HitEvent::blocker(EntityId(1)), &mut sounds);
        assert_eq!(round.time_left(), 0.0);
        assert_eq!(response.outcome, Outcome::Lost);
        assert!((response.time_delta + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_large_target_bonus() {
        let mut round = RoundController::new(5, 4.0);
        let mut sounds: Vec<SoundEffect> = Vec::new();
        let response =
            round.apply_hit_event(&HitEvent::target(EntityId(3), TargetSize::Large), &mut sounds);
        assert_eq!(round.targets_remaining(), 4);
        assert_eq!(round.time_left(), 5.0);
        assert_eq!(response.outcome, Outcome::InProgress);
        assert_eq!(response.removed_target, Some(EntityId(3)));
        assert_eq!(sounds, vec![SoundEffect::TargetHit]);
    }

    #[test]
    fn test_last_target_wins_on_expired_clock() {
        let mut round = RoundController::from_state(RoundState {
            time_left: 0.0,
            elapsed_time: 10.0,
            targets_remaining: 1,
            outcome: Outcome::InProgress,
        });
        let response = round.apply_hit_event(
            &HitEvent::target(EntityId(9), TargetSize::Small),
            &mut Vec::<SoundEffect>::new(),
        );
        assert_eq!(round.targets_remaining(), 0);
        assert_eq!(response.outcome, Outcome::Won);
        assert_eq!(
            round.summary(),
            Some(RoundSummary {
                won: true,
                elapsed: 10.0
            })
        );
    }

    #[test]
    fn test_wall_hit_only_consumes_ball() {
        let mut round = fresh();
        let mut sounds: Vec<SoundEffect> = Vec::new();
        let response = round.apply_hit_event(&HitEvent::wall(), &mut sounds);
        assert!(response.ball_consumed);
        assert_eq!(response.time_delta, 0.0);
        assert_eq!(round.time_left(), 10.0);
        assert!(sounds.is_empty());
    }

    #[test]
    fn test_hits_after_round_over_change_nothing() {
        let mut round = fresh();
        round.advance(10.0);
        let mut sounds: Vec<SoundEffect> = Vec::new();
        let response = round.apply_hit_event(
            &HitEvent::target(EntityId(2), TargetSize::Small),
            &mut sounds,
        );
        assert_eq!(response.outcome, Outcome::Lost);
        assert!(response.ball_consumed);
        assert_eq!(response.removed_target, None);
        assert_eq!(round.targets_remaining(), 9);
        assert_eq!(round.time_left(), 0.0);
        assert!(sounds.is_empty());
    }

    #[test]
    fn test_initialize_resets() {
        let mut round = fresh();
        round.advance(10.0);
        round.initialize(3, 6.0);
        assert_eq!(round.state(), &RoundState::new(3, 6.0));
    }

    #[test]
    fn test_frame_clock_first_delta_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1234.5), 0.0);
        assert!((clock.delta(1235.0) - 0.5).abs() < 1e-9);
        clock.reset();
        assert_eq!(clock.delta(2000.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_clock_invariants(deltas in prop::collection::vec(-1.0f64..2.0, 0..64)) {
            let mut round = fresh();
            let mut last_elapsed = 0.0;
            for delta in deltas {
                let before = round.outcome();
                round.advance(delta);
                prop_assert!(round.time_left() >= 0.0);
                prop_assert!(round.elapsed_time() >= last_elapsed);
                if before.is_terminal() {
                    prop_assert_eq!(round.outcome(), before);
                    prop_assert_eq!(round.elapsed_time(), last_elapsed);
                }
                last_elapsed = round.elapsed_time();
            }
        }

        #[test]
        fn prop_outcome_matches_rule(hits in prop::collection::vec(0u8..4, 0..20), deltas in prop::collection::vec(0.0f64..1.5, 0..20)) {
            let mut round = RoundController::new(4, 5.0);
            let mut sounds: Vec<SoundEffect> = Vec::new();
            for (i, delta) in deltas.iter().enumerate() {
                round.advance(*delta);
                if let Some(hit) = hits.get(i) {
                    let event = match hit {
                        0 => HitEvent::wall(),
                        1 => HitEvent::blocker(EntityId(1)),
                        2 => HitEvent::target(EntityId(i as u32), TargetSize::Small),
                        _ => HitEvent::target(EntityId(i as u32), TargetSize::Large),
                    };
                    round.apply_hit_event(&event, &mut sounds);
                }
                let state = round.state();
                if state.targets_remaining == 0 {
                    prop_assert_eq!(state.outcome, Outcome::Won);
                } else if state.outcome == Outcome::InProgress {
                    prop_assert!(state.time_left > 0.0);
                }
            }
        }
    }
}
