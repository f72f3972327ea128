//! Deterministic round logic
//!
//! All gameplay rules live here. This module must stay engine-free:
//! - Time only advances through `RoundController::advance`
//! - Randomness only through an injected `RandomSource`
//! - Sound only through an injected `AudioSink`
//! - No rendering, physics or platform dependencies

pub mod cannon;
pub mod contact;
pub mod entity;
pub mod rng;
pub mod round;
pub mod scene;
pub mod state;

pub use cannon::{Cannon, Projectile};
pub use contact::{ContactBody, category, classify_contact};
pub use entity::{
    BlockerSize, BodyMaterial, Category, EntityId, EntityKind, EntitySpec, TargetColor, TargetSize,
    blocker_impulse, spawn_blocker, spawn_target, target_impulse,
};
pub use rng::{PcgSource, RandomSource, RngState};
pub use round::{
    AdvanceReport, FrameClock, HitCategory, HitEvent, HitResponse, RoundController,
    format_time_left,
};
pub use scene::{Game, SceneLayout};
pub use state::{Outcome, RoundState, RoundSummary, evaluate_outcome};
