//! Sound cues for the host audio layer
//!
//! Gameplay code never waits on audio. It hands a [`SoundEffect`] to an
//! [`AudioSink`] and moves on; the host drains queued cues once per frame
//! and plays them however it likes.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Cannonball strikes a blocker
    BlockerHit,
    /// Cannonball destroys a target
    TargetHit,
    /// Cannon fires
    CannonFire,
}

impl SoundEffect {
    /// Asset name of the bundled sample (without extension)
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::BlockerHit => "blocker_hit",
            SoundEffect::TargetHit => "target_hit",
            SoundEffect::CannonFire => "cannon_fire",
        }
    }
}

/// Non-blocking playback capability
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Recording sink, handy for headless runs
impl AudioSink for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

/// A queued cue with its effective volume baked in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundCue {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    pending: Vec<SoundCue>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            pending: Vec::new(),
        }
    }

    /// Build from player settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cues waiting for the host
    pub fn pending(&self) -> &[SoundCue] {
        &self.pending
    }

    /// Take all queued cues, oldest first
    pub fn drain(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.pending)
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        log::debug!("queue sound {} at {:.2}", effect.asset_name(), volume);
        self.pending.push(SoundCue { effect, volume });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_queues_cue() {
        let mut audio = AudioManager::new();
        audio.play(SoundEffect::TargetHit);
        audio.play(SoundEffect::CannonFire);

        let cues = audio.drain();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].effect, SoundEffect::TargetHit);
        assert!((cues[0].volume - 0.8).abs() < 1e-6);
        assert!(audio.pending().is_empty());
    }

    #[test]
    fn test_muted_drops_cues() {
        let mut audio = AudioManager::new();
        audio.set_muted(true);
        audio.play(SoundEffect::BlockerHit);
        assert!(audio.pending().is_empty());
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::BlockerHit);
        assert!((audio.pending()[0].volume - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::from_settings(&settings);
        audio.play(SoundEffect::TargetHit);
        assert!(audio.drain().is_empty());
    }

    #[test]
    fn test_asset_names() {
        assert_eq!(SoundEffect::BlockerHit.asset_name(), "blocker_hit");
        assert_eq!(SoundEffect::TargetHit.asset_name(), "target_hit");
        assert_eq!(SoundEffect::CannonFire.asset_name(), "cannon_fire");
    }
}
