//! Scene layout and game composition
//!
//! [`Game`] wires the round controller, the cannon and the live entities
//! together. The host engine owns bodies and sprites; it feeds timestamps,
//! taps and contacts in, and reads spawns, removals and sound cues out.

use glam::Vec2;

use super::cannon::{Cannon, Projectile};
use super::contact::{ContactBody, classify_contact};
use super::entity::{BlockerSize, EntityId, EntitySpec, spawn_blocker, spawn_target};
use super::rng::{PcgSource, RandomSource};
use super::round::{AdvanceReport, FrameClock, HitEvent, HitResponse, RoundController};
use super::state::{Outcome, RoundSummary};
use crate::audio::AudioManager;
use crate::consts::*;
use crate::error::CannonError;
use crate::settings::{DeviceIdiom, RoundConfig};

/// Scene size and the speed scale derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    pub size: Vec2,
    /// Scales every impulse so play feels the same across aspect ratios
    pub velocity_multiplier: f32,
}

impl SceneLayout {
    pub fn new(size: Vec2, device: DeviceIdiom) -> Self {
        Self {
            size,
            velocity_multiplier: size.x / size.y * device.velocity_boost(),
        }
    }

    /// Cannon sits on the left edge, vertically centered
    pub fn cannon_position(&self) -> Vec2 {
        Vec2::new(0.0, self.size.y / 2.0)
    }

    pub fn blocker_position(&self) -> Vec2 {
        Vec2::new(
            self.size.x * BLOCKER_X_PERCENT,
            self.size.y * BLOCKER_Y_PERCENT,
        )
    }

    /// Position of the first target; the rest follow to its right
    pub fn first_target_position(&self) -> Vec2 {
        Vec2::new(
            self.size.x * TARGET_X_PERCENT,
            self.size.y * TARGET_Y_PERCENT,
        )
    }
}

/// One round of play
#[derive(Debug)]
pub struct Game<R: RandomSource = PcgSource> {
    pub layout: SceneLayout,
    pub round: RoundController,
    pub cannon: Cannon,
    pub blockers: Vec<EntitySpec>,
    /// Live targets (sorted by id)
    pub targets: Vec<EntitySpec>,
    /// Cannonball currently in flight
    pub projectile: Option<Projectile>,
    pub audio: AudioManager,
    config: RoundConfig,
    clock: FrameClock,
    rng: R,
    next_id: u32,
}

impl<R: RandomSource> Game<R> {
    /// Validate the config, spawn the scene and start the clock
    pub fn start(
        layout: SceneLayout,
        config: RoundConfig,
        audio: AudioManager,
        rng: R,
    ) -> Result<Self, CannonError> {
        config.validate()?;
        let mut game = Self {
            layout,
            round: RoundController::default(),
            cannon: Cannon::new(
                layout.size,
                layout.cannon_position(),
                layout.velocity_multiplier,
            ),
            blockers: Vec::new(),
            targets: Vec::new(),
            projectile: None,
            audio,
            config,
            clock: FrameClock::new(),
            rng,
            next_id: 1,
        };
        game.reset_round();
        Ok(game)
    }

    /// Throw away the current round and start a fresh one
    pub fn restart(&mut self) {
        self.reset_round();
    }

    fn reset_round(&mut self) {
        self.blockers.clear();
        self.targets.clear();
        self.projectile = None;
        self.cannon.consume_ball();
        self.clock.reset();
        self.spawn_entities();
        self.round
            .initialize(self.config.target_count, self.config.initial_time);
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn spawn_entities(&mut self) {
        let layout = self.layout;

        let id = self.next_entity_id();
        self.blockers.push(spawn_blocker(
            id,
            layout.size,
            BlockerSize::Medium,
            layout.blocker_position(),
            layout.velocity_multiplier,
        ));

        let mut position = layout.first_target_position();
        for _ in 0..self.config.target_count {
            let id = self.next_entity_id();
            let target = spawn_target(
                id,
                layout.size,
                position,
                layout.velocity_multiplier,
                &mut self.rng,
            );
            position.x += target.size.x + TARGET_SPACING;
            self.targets.push(target);
        }
    }

    /// Player tapped `point` (scene coordinates)
    pub fn tap(&mut self, point: Vec2) -> Option<Projectile> {
        if self.round.outcome().is_terminal() {
            return None;
        }
        let aim = point - self.cannon.position;
        let projectile = self.cannon.fire_at(aim, &mut self.audio)?;
        self.projectile = Some(projectile);
        Some(projectile)
    }

    /// Per-frame update with the host's absolute timestamp (seconds)
    pub fn update(&mut self, timestamp: f64) -> AdvanceReport {
        let delta = self.clock.delta(timestamp);
        self.round.advance(delta)
    }

    /// Apply a classified cannonball contact
    pub fn handle_hit(&mut self, event: &HitEvent) -> HitResponse {
        let response = self.round.apply_hit_event(event, &mut self.audio);
        if response.ball_consumed {
            self.cannon.consume_ball();
            self.projectile = None;
        }
        if let Some(id) = response.removed_target {
            self.targets.retain(|t| t.id != id);
        }
        response
    }

    /// Classify a raw contact pair and apply it
    pub fn handle_contact(&mut self, a: &ContactBody, b: &ContactBody) -> Option<HitResponse> {
        let event = classify_contact(a, b)?;
        Some(self.handle_hit(&event))
    }

    pub fn target(&self, id: EntityId) -> Option<&EntitySpec> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn outcome(&self) -> Outcome {
        self.round.outcome()
    }

    pub fn summary(&self) -> Option<RoundSummary> {
        self.round.summary()
    }
}
