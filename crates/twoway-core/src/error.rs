//! Error types for the configuration and persistence surfaces.
//!
//! The range model and the gesture tracker are total and never fail; only
//! loading configuration and decoding saved state can.

use crate::color::ColorParseError;
use thiserror::Error;

/// Error loading or validating a [`crate::SeekBarConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the file
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid TOML
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    /// Invalid YAML
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// A numeric field is NaN or infinite
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Field name
        field: &'static str,
        /// Offending value
        value: f64,
    },
    /// `min` exceeds `max`
    #[error("min ({min}) exceeds max ({max})")]
    InvertedBounds {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
    /// A color field does not parse
    #[error("invalid color in {field}: {source}")]
    Color {
        /// Field name
        field: &'static str,
        /// Parse failure
        #[source]
        source: ColorParseError,
    },
    /// File extension is neither TOML nor YAML
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Error encoding or decoding a [`crate::SavedState`].
#[derive(Debug, Error)]
pub enum StateError {
    /// Invalid JSON
    #[error("invalid saved state: {0}")]
    Json(#[from] serde_json::Error),
    /// Stored value is NaN or infinite
    #[error("saved value must be finite, got {0}")]
    NonFinite(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvertedBounds { min: 5.0, max: 1.0 };
        assert_eq!(err.to_string(), "min (5) exceeds max (1)");

        let err = ConfigError::NonFinite {
            field: "zero",
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "zero must be finite, got inf");

        let err = ConfigError::UnsupportedFormat("ini".to_string());
        assert_eq!(err.to_string(), "unsupported config format: ini");
    }

    #[test]
    fn test_color_error_keeps_source() {
        let err = ConfigError::Color {
            field: "track_color",
            source: ColorParseError::InvalidHex,
        };
        assert_eq!(err.to_string(), "invalid color in track_color: invalid hex characters");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConfigError = io.into();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_state_error_display() {
        assert_eq!(StateError::NonFinite(f64::NAN).to_string(), "saved value must be finite, got NaN");
    }
}
