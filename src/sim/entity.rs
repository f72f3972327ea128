//! Blocker and target spawn parameters
//!
//! Entities are plain data. Size and impulse are fixed at spawn; position
//! afterwards belongs to the host physics engine.

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::*;
use crate::error::CannonError;

/// Unique identifier for a spawned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Blocker size, chosen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockerSize {
    Small,
    Medium,
    Large,
}

impl BlockerSize {
    /// Height and speed multiplier
    pub fn scale(self) -> f32 {
        match self {
            BlockerSize::Small => 1.0,
            BlockerSize::Medium => 2.0,
            BlockerSize::Large => 3.0,
        }
    }
}

impl TryFrom<f32> for BlockerSize {
    type Error = CannonError;

    fn try_from(scale: f32) -> Result<Self, Self::Error> {
        [BlockerSize::Small, BlockerSize::Medium, BlockerSize::Large]
            .into_iter()
            .find(|size| size.scale() == scale)
            .ok_or(CannonError::InvalidBlockerSize(scale))
    }
}

/// Target size, random at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSize {
    Small,
    Medium,
    Large,
}

impl TargetSize {
    pub const ALL: [TargetSize; 3] = [TargetSize::Small, TargetSize::Medium, TargetSize::Large];

    /// Height and speed multiplier
    pub fn scale(self) -> f32 {
        match self {
            TargetSize::Small => 1.0,
            TargetSize::Medium => 1.5,
            TargetSize::Large => 2.0,
        }
    }

    /// Seconds added to the clock when destroyed; small targets are worth more
    pub fn time_bonus(self) -> f64 {
        match self {
            TargetSize::Small => 3.0,
            TargetSize::Medium => 2.0,
            TargetSize::Large => 1.0,
        }
    }

    pub fn from_index(index: u32) -> Result<Self, CannonError> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(CannonError::InvalidSizeIndex(index))
    }

    pub fn random(rng: &mut impl RandomSource) -> Self {
        Self::ALL[rng.next_below(Self::ALL.len() as u32) as usize]
    }
}

impl TryFrom<f32> for TargetSize {
    type Error = CannonError;

    fn try_from(scale: f32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.scale() == scale)
            .ok_or(CannonError::InvalidTargetSize(scale))
    }
}

/// Target texture variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetColor {
    Red,
    Green,
    Blue,
}

impl TargetColor {
    pub const ALL: [TargetColor; 3] = [TargetColor::Red, TargetColor::Green, TargetColor::Blue];

    pub fn texture_name(self) -> &'static str {
        match self {
            TargetColor::Red => "target_red",
            TargetColor::Green => "target_green",
            TargetColor::Blue => "target_blue",
        }
    }

    pub fn from_index(index: u32) -> Result<Self, CannonError> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(CannonError::InvalidSizeIndex(index))
    }

    pub fn random(rng: &mut impl RandomSource) -> Self {
        Self::ALL[rng.next_below(Self::ALL.len() as u32) as usize]
    }
}

impl FromStr for TargetColor {
    type Err = CannonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" | "target_red" => Ok(TargetColor::Red),
            "green" | "target_green" => Ok(TargetColor::Green),
            "blue" | "target_blue" => Ok(TargetColor::Blue),
            _ => Err(CannonError::InvalidTargetColor(s.to_string())),
        }
    }
}

/// Broad entity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Blocker,
    Target,
}

/// Category plus the per-category variant data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Blocker(BlockerSize),
    Target { size: TargetSize, color: TargetColor },
}

impl EntityKind {
    pub fn category(&self) -> Category {
        match self {
            EntityKind::Blocker(_) => Category::Blocker,
            EntityKind::Target { .. } => Category::Target,
        }
    }

    pub fn scale(&self) -> f32 {
        match self {
            EntityKind::Blocker(size) => size.scale(),
            EntityKind::Target { size, .. } => size.scale(),
        }
    }

    /// Texture the host should draw
    pub fn texture_name(&self) -> &'static str {
        match self {
            EntityKind::Blocker(_) => "blocker",
            EntityKind::Target { color, .. } => color.texture_name(),
        }
    }
}

/// Physical material shared by every moving body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMaterial {
    pub friction: f32,
    pub restitution: f32,
    pub linear_damping: f32,
    pub allows_rotation: bool,
    pub precise_collisions: bool,
}

impl Default for BodyMaterial {
    /// Frictionless, perfectly elastic, undamped
    fn default() -> Self {
        Self {
            friction: 0.0,
            restitution: 1.0,
            linear_damping: 0.0,
            allows_rotation: true,
            precise_collisions: true,
        }
    }
}

/// A spawned blocker or target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Sprite size in scene units
    pub size: Vec2,
    /// Spawn position; the physics engine owns it afterwards
    pub position: Vec2,
    /// One-shot impulse applied at spawn
    pub impulse: Vec2,
    pub material: BodyMaterial,
}

impl EntitySpec {
    pub fn category(&self) -> Category {
        self.kind.category()
    }
}

/// Vertical blocker impulse
pub fn blocker_impulse(size: BlockerSize, velocity_multiplier: f32) -> Vec2 {
    Vec2::new(0.0, velocity_multiplier * BLOCKER_SPEED * size.scale())
}

/// Vertical target impulse; `extra_speed` is the random term in `[0, TARGET_SPEED_SPREAD)`
pub fn target_impulse(size: TargetSize, velocity_multiplier: f32, extra_speed: u32) -> Vec2 {
    Vec2::new(
        0.0,
        velocity_multiplier * size.scale() * (TARGET_SPEED + extra_speed as f32),
    )
}

/// Blocker sprite size for a scene
pub fn blocker_dimensions(scene_size: Vec2, size: BlockerSize) -> Vec2 {
    Vec2::new(
        scene_size.x * BLOCKER_WIDTH_PERCENT,
        scene_size.y * BLOCKER_HEIGHT_PERCENT * size.scale(),
    )
}

/// Target sprite size for a scene
pub fn target_dimensions(scene_size: Vec2, size: TargetSize) -> Vec2 {
    Vec2::new(
        scene_size.x * TARGET_WIDTH_PERCENT,
        scene_size.y * TARGET_HEIGHT_PERCENT * size.scale(),
    )
}

/// Spawn a blocker of the given size
pub fn spawn_blocker(
    id: EntityId,
    scene_size: Vec2,
    size: BlockerSize,
    position: Vec2,
    velocity_multiplier: f32,
) -> EntitySpec {
    let spec = EntitySpec {
        id,
        kind: EntityKind::Blocker(size),
        size: blocker_dimensions(scene_size, size),
        position,
        impulse: blocker_impulse(size, velocity_multiplier),
        material: BodyMaterial::default(),
    };
    log::debug!("spawn blocker {:?} {:?} impulse {}", id, size, spec.impulse);
    spec
}

/// Spawn a target with random size, color and speed
pub fn spawn_target(
    id: EntityId,
    scene_size: Vec2,
    position: Vec2,
    velocity_multiplier: f32,
    rng: &mut impl RandomSource,
) -> EntitySpec {
    let size = TargetSize::random(rng);
    let color = TargetColor::random(rng);
    let extra_speed = rng.next_below(TARGET_SPEED_SPREAD);
    let spec = EntitySpec {
        id,
        kind: EntityKind::Target { size, color },
        size: target_dimensions(scene_size, size),
        position,
        impulse: target_impulse(size, velocity_multiplier, extra_speed),
        material: BodyMaterial::default(),
    };
    log::debug!(
        "spawn target {:?} {:?}/{:?} impulse {}",
        id,
        size,
        color,
        spec.impulse
    );
    spec
}
