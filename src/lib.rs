//! Cannon Round - a timed cannon arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic round logic (clock, scoring, spawns, cannon)
//! - `audio`: Fire-and-forget sound cues for the host to play
//! - `settings`: Player preferences and round tuning
//! - `error`: Input validation errors
//!
//! Rendering, rigid-body physics and touch input belong to the host engine.
//! The host reports collisions as [`sim::HitEvent`]s and calls
//! [`sim::Game::update`] once per rendered frame.

pub mod audio;
pub mod error;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, AudioSink, SoundEffect};
pub use error::CannonError;
pub use settings::{DeviceIdiom, RoundConfig, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Round length in seconds
    pub const INITIAL_TIME: f64 = 10.0;
    /// Targets spawned per round
    pub const TARGET_COUNT: u32 = 9;

    /// Seconds lost when the cannonball strikes a blocker
    pub const BLOCKER_TIME_PENALTY: f64 = 1.0;

    /// Blocker impulse base speed (scaled by size and velocity multiplier)
    pub const BLOCKER_SPEED: f32 = 5.0;
    /// Target impulse base speed; a random term in [0, TARGET_SPEED + 5) is added
    pub const TARGET_SPEED: f32 = 2.0;
    /// Exclusive upper bound of the extra random target speed
    pub const TARGET_SPEED_SPREAD: u32 = TARGET_SPEED as u32 + 5;
    /// Cannonball speed as a fraction of the velocity multiplier
    pub const CANNONBALL_SPEED_FACTOR: f32 = 0.15;

    /// Velocity multiplier boost on tablets
    pub const PAD_VELOCITY_BOOST: f32 = 6.0;

    /// Entity sizes as fractions of the scene size
    pub const BLOCKER_WIDTH_PERCENT: f32 = 0.025;
    pub const BLOCKER_HEIGHT_PERCENT: f32 = 0.125;
    pub const TARGET_WIDTH_PERCENT: f32 = 0.025;
    pub const TARGET_HEIGHT_PERCENT: f32 = 0.1;
    pub const CANNON_SIZE_PERCENT: f32 = 0.15;
    pub const CANNONBALL_SIZE_PERCENT: f32 = 0.075;
    pub const BARREL_WIDTH_PERCENT: f32 = 0.075;
    pub const BARREL_LENGTH_PERCENT: f32 = 0.15;

    /// Spawn placement as fractions of the scene size
    pub const BLOCKER_X_PERCENT: f32 = 0.5;
    pub const BLOCKER_Y_PERCENT: f32 = 0.25;
    pub const TARGET_X_PERCENT: f32 = 0.6;
    pub const TARGET_Y_PERCENT: f32 = 0.5;
    /// Horizontal gap between neighbouring targets (scene units)
    pub const TARGET_SPACING: f32 = 5.0;
}

/// Unit direction for an angle in radians
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle of a vector measured from +x, in (-π, π]
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_direction_is_unit() {
        for angle in [0.0, FRAC_PI_2, PI, -FRAC_PI_2, 1.234] {
            assert!((direction(angle).length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_angle_of_roundtrips_direction() {
        let angle = 0.75;
        assert!((angle_of(direction(angle)) - angle).abs() < 1e-6);
        assert!((angle_of(Vec2::new(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_target_speed_spread() {
        assert_eq!(consts::TARGET_SPEED_SPREAD, 7);
    }
}
