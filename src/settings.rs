//! Game settings and round tuning
//!
//! Stored as JSON next to the game. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{INITIAL_TIME, PAD_VELOCITY_BOOST, TARGET_COUNT};
use crate::error::CannonError;

/// Device class, which scales every spawn impulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeviceIdiom {
    #[default]
    Phone,
    Pad,
}

impl DeviceIdiom {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceIdiom::Phone => "Phone",
            DeviceIdiom::Pad => "Pad",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "phone" => Some(DeviceIdiom::Phone),
            "pad" | "tablet" => Some(DeviceIdiom::Pad),
            _ => None,
        }
    }

    /// Multiplier applied on top of the scene aspect ratio
    pub fn velocity_boost(&self) -> f32 {
        match self {
            DeviceIdiom::Phone => 1.0,
            DeviceIdiom::Pad => PAD_VELOCITY_BOOST,
        }
    }
}

/// Round tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Seconds on the clock at round start
    pub initial_time: f64,
    /// Targets spawned per round
    pub target_count: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            initial_time: INITIAL_TIME,
            target_count: TARGET_COUNT,
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<(), CannonError> {
        if !self.initial_time.is_finite() || self.initial_time < 0.0 {
            return Err(CannonError::InvalidRoundConfig {
                field: "initial_time",
                value: self.initial_time,
            });
        }
        Ok(())
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub device: DeviceIdiom,
    pub round: RoundConfig,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Fixed spawn seed; random per run when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            device: DeviceIdiom::Phone,
            round: RoundConfig::default(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, CannonError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.round.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CannonError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CannonError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings ({}: {})", path.display(), err);
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CannonError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.round.initial_time, 10.0);
        assert_eq!(settings.round.target_count, 9);
        assert_eq!(settings.device, DeviceIdiom::Phone);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"device":"Pad","round":{"target_count":3}}"#).unwrap();
        assert_eq!(settings.device, DeviceIdiom::Pad);
        assert_eq!(settings.round.target_count, 3);
        assert_eq!(settings.round.initial_time, 10.0);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_negative_initial_time_rejected() {
        let err = Settings::from_json(r#"{"round":{"initial_time":-2.0}}"#).unwrap_err();
        assert!(matches!(
            err,
            CannonError::InvalidRoundConfig {
                field: "initial_time",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(CannonError::Settings(_))
        ));
    }

    #[test]
    fn test_device_idiom() {
        assert_eq!(DeviceIdiom::from_str("tablet"), Some(DeviceIdiom::Pad));
        assert_eq!(DeviceIdiom::from_str("watch"), None);
        assert_eq!(DeviceIdiom::Pad.velocity_boost(), 6.0);
        assert_eq!(DeviceIdiom::Phone.as_str(), "Phone");
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("cannon_settings_{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(77),
            muted: true,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/definitely/not/here.json");
        assert_eq!(settings, Settings::default());
    }
}
