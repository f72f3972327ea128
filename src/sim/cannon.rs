//! The player's cannon
//!
//! At most one cannonball is in flight. Aiming always turns the barrel;
//! firing only spawns a projectile when the previous ball is gone.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::BodyMaterial;
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::*;
use crate::{angle_of, direction};

/// A freshly fired cannonball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Spawn position at the barrel mouth
    pub position: Vec2,
    /// One-shot impulse along the barrel
    pub impulse: Vec2,
    pub diameter: f32,
    pub material: BodyMaterial,
}

/// Cannon geometry and firing state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cannon {
    /// Barrel pivot in scene coordinates
    pub position: Vec2,
    pub barrel_length: f32,
    pub barrel_width: f32,
    pub base_size: f32,
    pub ball_diameter: f32,
    /// Cannonball speed (already scaled by the velocity multiplier)
    pub ball_speed: f32,
    barrel_angle: f32,
    ball_in_flight: bool,
}

impl Cannon {
    pub fn new(scene_size: Vec2, position: Vec2, velocity_multiplier: f32) -> Self {
        Self {
            position,
            barrel_length: scene_size.y * BARREL_LENGTH_PERCENT,
            barrel_width: scene_size.y * BARREL_WIDTH_PERCENT,
            base_size: scene_size.y * CANNON_SIZE_PERCENT,
            ball_diameter: scene_size.y * CANNONBALL_SIZE_PERCENT,
            ball_speed: velocity_multiplier * CANNONBALL_SPEED_FACTOR,
            barrel_angle: 0.0,
            ball_in_flight: false,
        }
    }

    /// Current barrel angle (radians)
    pub fn barrel_angle(&self) -> f32 {
        self.barrel_angle
    }

    pub fn ball_in_flight(&self) -> bool {
        self.ball_in_flight
    }

    /// Turn the barrel toward `aim`, given relative to the cannon
    pub fn aim(&mut self, aim: Vec2) -> f32 {
        self.barrel_angle = angle_of(aim);
        self.barrel_angle
    }

    /// Aim and, if no ball is in flight, fire.
    ///
    /// `aim` is relative to the cannon. Plays the fire sound on spawn.
    pub fn fire_at(&mut self, aim: Vec2, audio: &mut impl AudioSink) -> Option<Projectile> {
        self.aim(aim);
        if self.ball_in_flight {
            log::debug!("fire ignored: ball already in flight");
            return None;
        }

        let dir = direction(self.barrel_angle);
        let projectile = Projectile {
            position: self.position + dir * self.barrel_length,
            impulse: dir * self.ball_speed,
            diameter: self.ball_diameter,
            material: BodyMaterial::default(),
        };
        self.ball_in_flight = true;
        audio.play(SoundEffect::CannonFire);
        log::debug!(
            "fire at {:.3} rad from {}",
            self.barrel_angle,
            projectile.position
        );
        Some(projectile)
    }

    /// The ball hit something and has been removed
    pub fn consume_ball(&mut self) {
        self.ball_in_flight = false;
    }
}
