//! Validation errors
//!
//! Only construction-time input can fail. Frame deltas are clamped, never
//! rejected, so the per-frame path has no error channel.

use std::fmt;

#[derive(Debug)]
pub enum CannonError {
    /// Blocker scale factor not one of 1.0, 2.0, 3.0
    InvalidBlockerSize(f32),
    /// Target scale factor not one of 1.0, 1.5, 2.0
    InvalidTargetSize(f32),
    /// Unknown target texture/variant name
    InvalidTargetColor(String),
    /// Index outside a three-element size or color table
    InvalidSizeIndex(u32),
    /// Round tuning value out of range
    InvalidRoundConfig { field: &'static str, value: f64 },
    /// Settings JSON could not be parsed or written
    Settings(serde_json::Error),
    /// Settings file could not be read or written
    Io(std::io::Error),
}

impl fmt::Display for CannonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBlockerSize(scale) => {
                write!(f, "invalid blocker size {scale} (expected 1, 2 or 3)")
            }
            Self::InvalidTargetSize(scale) => {
                write!(f, "invalid target size {scale} (expected 1, 1.5 or 2)")
            }
            Self::InvalidTargetColor(name) => write!(f, "unknown target color: {name}"),
            Self::InvalidSizeIndex(index) => {
                write!(f, "size/color index out of range: {index} (allowed 0..3)")
            }
            Self::InvalidRoundConfig { field, value } => {
                write!(f, "invalid round config: {field} = {value}")
            }
            Self::Settings(err) => write!(f, "settings json: {err}"),
            Self::Io(err) => write!(f, "settings io: {err}"),
        }
    }
}

impl std::error::Error for CannonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Settings(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CannonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Settings(err)
    }
}

impl From<std::io::Error> for CannonError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            CannonError::InvalidBlockerSize(4.0).to_string(),
            "invalid blocker size 4 (expected 1, 2 or 3)"
        );
        assert_eq!(
            CannonError::InvalidTargetColor("purple".into()).to_string(),
            "unknown target color: purple"
        );
        assert_eq!(
            CannonError::InvalidRoundConfig {
                field: "initial_time",
                value: -1.0
            }
            .to_string(),
            "invalid round config: initial_time = -1"
        );
    }

    #[test]
    fn test_json_error_has_source() {
        let err: CannonError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
