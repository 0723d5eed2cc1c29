//! Persisted state.
//!
//! Only the absolute value survives teardown; bounds and anchor come back
//! through configuration.

use crate::error::StateError;
use crate::range::RangeModel;
use serde::{Deserialize, Serialize};

/// Saved seek bar state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    /// Absolute value at save time
    pub value: f64,
}

impl SavedState {
    /// Capture the model's value.
    #[must_use]
    pub fn capture(model: &RangeModel) -> Self {
        Self { value: model.value() }
    }

    /// Restore the value into a model without notifying its listener.
    pub fn apply(&self, model: &mut RangeModel) {
        model.set_value(self.value);
        model.mark_notified();
    }

    /// Encode as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not finite.
    pub fn to_json(&self) -> Result<String, StateError> {
        if !self.value.is_finite() {
            return Err(StateError::NonFinite(self.value));
        }
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_and_apply() {
        let mut model = RangeModel::with_bounds(0.0, 100.0);
        model.set_value(42.0);
        let saved = SavedState::capture(&model);

        let mut restored = RangeModel::with_bounds(0.0, 100.0);
        let fired = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let f = std::sync::Arc::clone(&fired);
        restored.on_change(move |_, _| f.store(true, std::sync::atomic::Ordering::SeqCst));
        saved.apply(&mut restored);

        assert!((restored.value() - 42.0).abs() < 1e-9);
        assert!(!restored.notify_change());
        assert!(!fired.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn test_json() {
        let saved = SavedState { value: -12.5 };
        let json = saved.to_json().unwrap();
        assert_eq!(json, r#"{"value":-12.5}"#);
        assert_eq!(SavedState::from_json(&json).unwrap(), saved);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(SavedState::from_json("{}"), Err(StateError::Json(_))));
        assert!(matches!(SavedState { value: f64::NAN }.to_json(), Err(StateError::NonFinite(_))));
    }

    #[test]
    fn test_apply_clips_to_current_bounds() {
        let mut model = RangeModel::with_bounds(0.0, 10.0);
        SavedState { value: 99.0 }.apply(&mut model);
        assert_eq!(model.value(), 10.0);
    }
}
