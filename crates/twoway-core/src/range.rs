//! Bounded value model shared by every seek bar variant.
//!
//! The canonical stored quantity is the *normalized* value in `[0, 1]`; the
//! absolute value is always derived as `min + normalized * (max - min)`.
//! Every mutation keeps `min <= zero <= max` and clamps the normalized value
//! according to the model's [`ClampPolicy`]. Nothing here returns an error:
//! out-of-domain requests are clamped or ignored.
//!
//! # Examples
//!
//! ```
//! use twoway_core::RangeModel;
//!
//! let mut model = RangeModel::with_bounds(0.0, 100.0);
//! model.set_value(50.0);
//! assert_eq!(model.normalized_value(), 0.5);
//!
//! model.rebase_min_keep_proportion(50.0);
//! assert_eq!(model.value(), 75.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace, warn};

/// Default lower bound.
pub const DEFAULT_MIN: f64 = -100.0;
/// Default anchor.
pub const DEFAULT_ZERO: f64 = 0.0;
/// Default upper bound.
pub const DEFAULT_MAX: f64 = 100.0;
/// Smallest automatic key increment.
pub const DEFAULT_KEY_VALUE_INCREMENT: f64 = 1.0;
/// Most key presses the full range may take before the increment is rescaled.
pub const KEY_VALUE_MAX_STEPS: f64 = 20.0;

/// Upper clamp of [`ClampPolicy::LegacyOvershoot`].
const LEGACY_OVERSHOOT_LIMIT: f64 = 1.1;

/// Change listener: receives `(value, normalized_value)`.
pub type ChangeListener = Box<dyn FnMut(f64, f64) + Send>;

/// Upper clamp applied to the normalized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClampPolicy {
    /// Clamp to `[0, 1]`.
    #[default]
    Unit,
    /// Clamp to `[0, 1.1]`, letting the value overshoot `max` by 10% of the
    /// range. Reproduces an older widget's behavior; not recommended.
    LegacyOvershoot,
}

impl ClampPolicy {
    /// Largest normalized value this policy admits.
    #[must_use]
    pub const fn upper(self) -> f64 {
        match self {
            Self::Unit => 1.0,
            Self::LegacyOvershoot => LEGACY_OVERSHOOT_LIMIT,
        }
    }

    /// Clamp a normalized value.
    #[must_use]
    pub fn clamp(self, normalized: f64) -> f64 {
        normalized.clamp(0.0, self.upper())
    }
}

/// Round to the nearest integer, ties away from zero.
///
/// Every integer view of a value (tick index, item count, thumb pixel
/// offset) goes through this one rule.
#[must_use]
pub fn round_to_index(x: f64) -> i64 {
    x.round() as i64
}

/// Bounds, anchor and active value of a two-way seek bar.
pub struct RangeModel {
    min: f64,
    max: f64,
    zero: f64,
    normalized: f64,
    key_value_increment: f64,
    clamp_policy: ClampPolicy,
    last_notified: f64,
    notifications: u64,
    listener: Option<ChangeListener>,
    dirty: bool,
}

impl fmt::Debug for RangeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeModel")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("zero", &self.zero)
            .field("normalized", &self.normalized)
            .field("key_value_increment", &self.key_value_increment)
            .field("clamp_policy", &self.clamp_policy)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for RangeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeModel {
    /// Create a model over `-100..=100` anchored at 0 with value 0.
    #[must_use]
    pub fn new() -> Self {
        let mut model = Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            zero: DEFAULT_ZERO,
            normalized: 0.0,
            key_value_increment: DEFAULT_KEY_VALUE_INCREMENT,
            clamp_policy: ClampPolicy::Unit,
            last_notified: 0.0,
            notifications: 0,
            listener: None,
            dirty: false,
        };
        model.normalized = model.normalize(DEFAULT_ZERO);
        model.rescale_key_increment();
        model.mark_notified();
        model
    }

    /// Create a model over custom bounds; the anchor and value are clamped
    /// into them.
    ///
    /// Non-finite or inverted bounds are ignored and the defaults kept.
    #[must_use]
    pub fn with_bounds(min: f64, max: f64) -> Self {
        let mut model = Self::new();
        if !min.is_finite() || !max.is_finite() || min > max {
            warn!(min, max, "ignoring invalid bounds");
            return model;
        }
        let value = model.value();
        model.min = min;
        model.max = max;
        model.zero = model.zero.clamp(min, max);
        model.set_value(value.clamp(min, max));
        model.key_value_increment = DEFAULT_KEY_VALUE_INCREMENT;
        model.rescale_key_increment();
        model.mark_notified();
        model.dirty = false;
        model
    }

    /// Select the normalized clamp policy.
    #[must_use]
    pub fn with_clamp_policy(mut self, policy: ClampPolicy) -> Self {
        self.clamp_policy = policy;
        self.normalized = policy.clamp(self.normalized);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Anchor the range segment is drawn from.
    #[must_use]
    pub const fn zero(&self) -> f64 {
        self.zero
    }

    /// Absolute value, derived from the normalized value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.recover(self.normalized)
    }

    /// Normalized value.
    #[must_use]
    pub const fn normalized_value(&self) -> f64 {
        self.normalized
    }

    /// Step used by key-driven adjustment.
    #[must_use]
    pub const fn key_value_increment(&self) -> f64 {
        self.key_value_increment
    }

    /// Active clamp policy.
    #[must_use]
    pub const fn clamp_policy(&self) -> ClampPolicy {
        self.clamp_policy
    }

    // =========================================================================
    // Coordinate conversion
    // =========================================================================

    /// Convert an absolute value to a normalized one.
    ///
    /// Returns `0.0` whenever the division is not finite, which covers a
    /// zero-width range.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        let result = (value - self.min) / (self.max - self.min);
        if result.is_finite() {
            result
        } else {
            0.0
        }
    }

    /// Convert a normalized value to an absolute one.
    #[must_use]
    pub fn recover(&self, normalized: f64) -> f64 {
        self.min + normalized * (self.max - self.min)
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Move the lower bound, keeping the absolute value (clipped to the new
    /// range).
    ///
    /// Ignored when `min` is not finite or exceeds `max`. An anchor below the
    /// new bound snaps up to it.
    pub fn set_min(&mut self, min: f64) {
        if !min.is_finite() {
            warn!(min, "ignoring non-finite min");
            return;
        }
        if min > self.max {
            debug!(min, max = self.max, "rejecting min above max");
            return;
        }
        let value = self.value();
        self.min = min;
        if self.zero < min {
            self.zero = min;
        }
        self.set_value(value);
        self.rescale_key_increment();
    }

    /// Move the upper bound, keeping the absolute value (clipped to the new
    /// range).
    ///
    /// Ignored when `max` is not finite or is below `min`. An anchor above
    /// the new bound snaps down to it.
    pub fn set_max(&mut self, max: f64) {
        if !max.is_finite() {
            warn!(max, "ignoring non-finite max");
            return;
        }
        if max < self.min {
            debug!(max, min = self.min, "rejecting max below min");
            return;
        }
        let value = self.value();
        self.max = max;
        if self.zero > max {
            self.zero = max;
        }
        self.set_value(value);
        self.rescale_key_increment();
    }

    /// Move the anchor, clamped into `[min, max]`.
    pub fn set_zero(&mut self, zero: f64) {
        if !zero.is_finite() {
            warn!(zero, "ignoring non-finite zero");
            return;
        }
        self.zero = zero.clamp(self.min, self.max);
        self.dirty = true;
    }

    /// Set the absolute value.
    pub fn set_value(&mut self, value: f64) {
        if !value.is_finite() {
            warn!(value, "ignoring non-finite value");
            return;
        }
        self.set_normalized_value(self.normalize(value));
    }

    /// Set the normalized value, clamped per the model's policy.
    pub fn set_normalized_value(&mut self, normalized: f64) {
        if !normalized.is_finite() {
            warn!(normalized, "ignoring non-finite normalized value");
            return;
        }
        self.normalized = self.clamp_policy.clamp(normalized);
        self.dirty = true;
        trace!(normalized = self.normalized, "normalized value set");
    }

    /// Set the key step; the sign is dropped.
    pub fn set_key_value_increment(&mut self, increment: f64) {
        if !increment.is_finite() {
            warn!(increment, "ignoring non-finite key increment");
            return;
        }
        self.key_value_increment = increment.abs();
    }

    /// Add `delta` to the absolute value.
    ///
    /// Returns whether the stored value changed; the listener fires only if
    /// it did, so pushing against a bound stays silent.
    pub fn increment_by(&mut self, delta: f64) -> bool {
        let before = self.value();
        self.set_value(before + delta);
        if self.value() == before {
            false
        } else {
            self.notify_change();
            true
        }
    }

    fn rescale_key_increment(&mut self) {
        let range = self.max - self.min;
        if self.key_value_increment == 0.0 || range / self.key_value_increment > KEY_VALUE_MAX_STEPS
        {
            self.key_value_increment = DEFAULT_KEY_VALUE_INCREMENT.max(range / KEY_VALUE_MAX_STEPS);
            trace!(increment = self.key_value_increment, "key increment rescaled");
        }
    }

    // =========================================================================
    // Re-basing
    // =========================================================================

    /// Move the lower bound, keeping the normalized position.
    pub fn rebase_min_keep_proportion(&mut self, min: f64) {
        let normalized = self.normalized;
        let before = self.min;
        self.set_min(min);
        if self.min != before {
            self.set_normalized_value(normalized);
        }
    }

    /// Move the lower bound, keeping the absolute value.
    pub fn rebase_min_keep_absolute(&mut self, min: f64) {
        let value = self.value();
        self.set_min(min);
        self.set_value(value);
    }

    /// Move the upper bound, keeping the normalized position.
    pub fn rebase_max_keep_proportion(&mut self, max: f64) {
        let normalized = self.normalized;
        let before = self.max;
        self.set_max(max);
        if self.max != before {
            self.set_normalized_value(normalized);
        }
    }

    /// Move the upper bound, keeping the absolute value.
    pub fn rebase_max_keep_absolute(&mut self, max: f64) {
        let value = self.value();
        self.set_max(max);
        self.set_value(value);
    }

    // =========================================================================
    // Notification
    // =========================================================================

    /// Replace the change listener. `None` clears it.
    pub fn set_listener(&mut self, listener: Option<ChangeListener>) {
        self.listener = listener;
    }

    /// Register a closure as the change listener.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(f64, f64) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Check whether a listener is registered.
    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Invoke the listener if the normalized value moved since the last
    /// notification. Returns whether it fired.
    pub fn notify_change(&mut self) -> bool {
        if self.last_notified == self.normalized {
            return false;
        }
        let (value, normalized) = (self.value(), self.normalized);
        if let Some(listener) = self.listener.as_mut() {
            listener(value, normalized);
        }
        self.last_notified = normalized;
        self.notifications += 1;
        trace!(value, normalized, "value change notified");
        true
    }

    /// Number of notifications fired so far.
    #[must_use]
    pub const fn notification_count(&self) -> u64 {
        self.notifications
    }

    /// Treat the current value as already reported.
    pub fn mark_notified(&mut self) {
        self.last_notified = self.normalized;
    }

    /// Take the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Check for a pending redraw request without clearing it.
    #[must_use]
    pub const fn needs_redraw(&self) -> bool {
        self.dirty
    }
}
