//! Construction-time configuration for a seek bar.
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```
//! use twoway_core::SeekBarConfig;
//!
//! let config = SeekBarConfig::from_toml(r#"
//!     min = 0.0
//!     max = 10.0
//!     value = 2.5
//!     notify_while_dragging = true
//!
//!     [gesture]
//!     drag_start = "after_slop"
//! "#).unwrap();
//!
//! let model = config.build_model();
//! assert_eq!(model.normalized_value(), 0.25);
//! ```

use crate::color::Color;
use crate::error::ConfigError;
use crate::gesture::GestureConfig;
use crate::range::{ClampPolicy, RangeModel, DEFAULT_MAX, DEFAULT_MIN, DEFAULT_ZERO};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default thumb width in pixels.
pub const DEFAULT_THUMB_WIDTH: f32 = 24.0;
/// Default track thickness in pixels.
pub const DEFAULT_TRACK_HEIGHT: f32 = 4.0;
/// Default opacity multiplier of a disabled seek bar.
pub const DEFAULT_DISABLED_ALPHA: f32 = 0.5;

/// Seek bar configuration as read from TOML or YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeekBarConfig {
    /// Lower bound
    pub min: f64,
    /// Anchor of the range segment
    pub zero: f64,
    /// Upper bound
    pub max: f64,
    /// Initial absolute value
    pub value: f64,
    /// Initial normalized value; overrides `value` when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_value: Option<f64>,
    /// Key step; derived from the range when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_value_increment: Option<f64>,
    /// Notify on every drag move instead of only on release
    pub notify_while_dragging: bool,
    /// Reverse the track under right-to-left layouts
    pub mirror_for_rtl: bool,
    /// Draw a mark at every key step along the track
    pub tick_marks: bool,
    /// Normalized clamp policy
    pub clamp_policy: ClampPolicy,
    /// Drag engagement
    pub gesture: GestureConfig,
    /// Thumb width in pixels
    pub thumb_width: f32,
    /// Track thickness in pixels
    pub track_height: f32,
    /// Opacity multiplier while disabled
    pub disabled_alpha: f32,
    /// Track color (hex)
    pub track_color: String,
    /// Range segment color (hex)
    pub range_color: String,
    /// Thumb color (hex)
    pub thumb_color: String,
    /// Thumb color while pressed (hex)
    pub thumb_pressed_color: String,
    /// Tick mark color (hex)
    pub tick_mark_color: String,
}

impl Default for SeekBarConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            zero: DEFAULT_ZERO,
            max: DEFAULT_MAX,
            value: DEFAULT_ZERO,
            normalized_value: None,
            key_value_increment: None,
            notify_while_dragging: false,
            mirror_for_rtl: false,
            tick_marks: false,
            clamp_policy: ClampPolicy::Unit,
            gesture: GestureConfig::default(),
            thumb_width: DEFAULT_THUMB_WIDTH,
            track_height: DEFAULT_TRACK_HEIGHT,
            disabled_alpha: DEFAULT_DISABLED_ALPHA,
            track_color: Color::GRAY.to_hex(),
            range_color: Color::HOLO_BLUE.to_hex(),
            thumb_color: Color::HOLO_BLUE.to_hex(),
            thumb_pressed_color: Color::WHITE.to_hex(),
            tick_mark_color: Color::BLACK.to_hex(),
        }
    }
}

/// Parsed paint colors of a seek bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeekBarColors {
    /// Track
    pub track: Color,
    /// Range segment between zero and value
    pub range: Color,
    /// Thumb at rest
    pub thumb: Color,
    /// Thumb while pressed
    pub thumb_pressed: Color,
    /// Tick marks
    pub tick_mark: Color,
}

impl Default for SeekBarColors {
    fn default() -> Self {
        Self {
            track: Color::GRAY,
            range: Color::HOLO_BLUE,
            thumb: Color::HOLO_BLUE,
            thumb_pressed: Color::WHITE,
            tick_mark: Color::BLACK,
        }
    }
}

impl SeekBarConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or fails [`Self::validate`].
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or fails [`Self::validate`].
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Load a config file, choosing the format by extension
    /// (`.toml`, `.yaml` or `.yml`).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has another extension,
    /// or does not parse.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let contents = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading seek bar config");
        match ext.as_str() {
            "toml" => Self::from_toml(&contents),
            "yaml" | "yml" => Self::from_yaml(&contents),
            _ => Err(ConfigError::UnsupportedFormat(ext)),
        }
    }

    /// Check numeric fields and colors.
    ///
    /// # Errors
    ///
    /// Returns the first non-finite field, inverted bounds, or unparsable
    /// color.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = |field: &'static str, value: f64| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::NonFinite { field, value })
            }
        };
        finite("min", self.min)?;
        finite("max", self.max)?;
        finite("zero", self.zero)?;
        finite("value", self.value)?;
        if let Some(n) = self.normalized_value {
            finite("normalized_value", n)?;
        }
        if let Some(inc) = self.key_value_increment {
            finite("key_value_increment", inc)?;
        }
        finite("touch_slop", f64::from(self.gesture.touch_slop))?;
        finite("thumb_width", f64::from(self.thumb_width))?;
        finite("track_height", f64::from(self.track_height))?;
        finite("disabled_alpha", f64::from(self.disabled_alpha))?;

        if self.min > self.max {
            return Err(ConfigError::InvertedBounds {
                min: self.min,
                max: self.max,
            });
        }
        self.colors().map(|_| ())
    }

    /// Parse the paint colors.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first field that does not parse.
    pub fn colors(&self) -> Result<SeekBarColors, ConfigError> {
        let parse = |field: &'static str, hex: &str| {
            Color::from_hex(hex).map_err(|source| ConfigError::Color { field, source })
        };
        Ok(SeekBarColors {
            track: parse("track_color", &self.track_color)?,
            range: parse("range_color", &self.range_color)?,
            thumb: parse("thumb_color", &self.thumb_color)?,
            thumb_pressed: parse("thumb_pressed_color", &self.thumb_pressed_color)?,
            tick_mark: parse("tick_mark_color", &self.tick_mark_color)?,
        })
    }

    /// Build a range model from this config.
    ///
    /// Values apply in the order bounds, zero, key increment, value,
    /// normalized value. The result counts as already notified.
    #[must_use]
    pub fn build_model(&self) -> RangeModel {
        let mut model = RangeModel::with_bounds(self.min, self.max).with_clamp_policy(self.clamp_policy);
        model.set_zero(self.zero);
        if let Some(inc) = self.key_value_increment {
            model.set_key_value_increment(inc);
        }
        model.set_value(self.value);
        if let Some(n) = self.normalized_value {
            model.set_normalized_value(n);
        }
        model.mark_notified();
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::DragStart;

    #[test]
    fn test_default_config() {
        let config = SeekBarConfig::default();
        assert_eq!(config.min, -100.0);
        assert_eq!(config.max, 100.0);
        assert!(!config.notify_while_dragging);
        assert!(config.validate().is_ok());
        assert_eq!(config.colors().unwrap().track.to_hex(), Color::GRAY.to_hex());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(SeekBarConfig::from_toml("").unwrap(), SeekBarConfig::default());
    }

    #[test]
    fn test_from_toml() {
        let config = SeekBarConfig::from_toml(
            r##"
            min = 0.0
            max = 50.0
            zero = 10.0
            value = 40.0
            key_value_increment = 2.0
            mirror_for_rtl = true
            tick_marks = true
            tick_mark_color = "#00ff00"
            clamp_policy = "legacy_overshoot"
            thumb_color = "#ff0000"

            [gesture]
            touch_slop = 4.0
            thumb_only = true
            "##,
        )
        .unwrap();

        assert_eq!(config.zero, 10.0);
        assert!(config.mirror_for_rtl);
        assert!(config.tick_marks);
        assert_eq!(config.colors().unwrap().tick_mark, Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(config.clamp_policy, ClampPolicy::LegacyOvershoot);
        assert_eq!(config.gesture.touch_slop, 4.0);
        assert!(config.gesture.thumb_only);
        assert_eq!(config.gesture.drag_start, DragStart::Immediate);
        assert_eq!(config.colors().unwrap().thumb, Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_yaml() {
        let config = SeekBarConfig::from_yaml(
            "min: -10.0\nmax: 10.0\nnormalized_value: 0.75\ngesture:\n  drag_start: after_slop\n",
        )
        .unwrap();
        assert_eq!(config.gesture.drag_start, DragStart::AfterSlop);
        assert_eq!(config.build_model().value(), 5.0);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = SeekBarConfig {
            value: 12.0,
            key_value_increment: Some(3.0),
            ..SeekBarConfig::default()
        };
        let back = SeekBarConfig::from_toml(&config.to_toml()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(SeekBarConfig::from_toml("min = ["), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(SeekBarConfig::from_yaml("min: [1, "), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let err = SeekBarConfig::from_toml("min = 5.0\nmax = 1.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvertedBounds { .. }));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = SeekBarConfig {
            zero: f64::NAN,
            ..SeekBarConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NonFinite { field: "zero", .. })));

        let err = SeekBarConfig::from_toml("max = inf").unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { field: "max", .. }));
    }

    #[test]
    fn test_validate_rejects_bad_color() {
        let err = SeekBarConfig::from_toml("range_color = \"blue\"").unwrap_err();
        assert!(matches!(err, ConfigError::Color { field: "range_color", .. }));
    }

    #[test]
    fn test_build_model_applies_in_order() {
        let config = SeekBarConfig {
            min: 0.0,
            max: 100.0,
            zero: 150.0,
            value: 30.0,
            ..SeekBarConfig::default()
        };
        let model = config.build_model();
        assert_eq!(model.zero(), 100.0);
        assert!((model.value() - 30.0).abs() < 1e-9);
        assert_eq!(model.key_value_increment(), 5.0);
    }

    #[test]
    fn test_build_model_is_already_notified() {
        let mut model = SeekBarConfig {
            value: 40.0,
            ..SeekBarConfig::default()
        }
        .build_model();
        assert!(!model.notify_change());
    }

    #[test]
    fn test_normalized_value_overrides_value() {
        let config = SeekBarConfig {
            value: 90.0,
            normalized_value: Some(0.0),
            ..SeekBarConfig::default()
        };
        assert_eq!(config.build_model().value(), -100.0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("twoway-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let toml_path = dir.join("bar.toml");
        std::fs::write(&toml_path, "max = 20.0").unwrap();
        assert_eq!(SeekBarConfig::load_from_file(&toml_path).unwrap().max, 20.0);

        let yaml_path = dir.join("bar.yml");
        std::fs::write(&yaml_path, "min: -1.0\n").unwrap();
        assert_eq!(SeekBarConfig::load_from_file(&yaml_path).unwrap().min, -1.0);

        let ini_path = dir.join("bar.ini");
        std::fs::write(&ini_path, "").unwrap();
        assert!(matches!(
            SeekBarConfig::load_from_file(&ini_path),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "ini"
        ));

        assert!(matches!(
            SeekBarConfig::load_from_file(&dir.join("missing.toml")),
            Err(ConfigError::Io(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
