//! Two-way seek bar widget.
//!
//! [`TwowaySeekBar`] composes a [`RangeModel`] and a [`GestureTracker`] and
//! exposes them through the [`Widget`] contract. The range segment is drawn
//! from the anchor (`zero`) to the current value, so the bar reads as an
//! offset in either direction.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::Instant;
use tracing::{debug, warn};
use twoway_core::{
    round_to_index, AccessibleRole, Canvas, ClampPolicy, Color, ConfigError, Constraints, DeferredTask, Event,
    GestureConfig, GestureTracker, Key, LayoutResult, MotionEvent, Point, RangeModel, Rect, SavedState,
    SeekBarColors, SeekBarConfig, Size, TrackGeometry, TrackOutcome, TypeId, Widget, DEFAULT_DISABLED_ALPHA,
    DEFAULT_THUMB_WIDTH, DEFAULT_TRACK_HEIGHT,
};

/// Message emitted when the seek bar notified a value change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeekBarChanged {
    /// The new absolute value
    pub value: f64,
    /// The new normalized value
    pub normalized_value: f64,
}

/// Range description for assistive technology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeInfo {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
    /// Current value
    pub current: f64,
    /// Whole steps across the range
    pub item_count: i64,
    /// Whole steps from `min` to the current value
    pub current_index: i64,
    /// A decrement would change the value
    pub can_decrement: bool,
    /// An increment would change the value
    pub can_increment: bool,
}

/// Seek bar with an anchor, for picking a value or an offset from zero.
#[derive(Debug)]
pub struct TwowaySeekBar {
    model: RangeModel,
    tracker: GestureTracker,
    enabled: bool,
    layout_rtl: bool,
    mirror_for_rtl: bool,
    tick_marks: bool,
    thumb_width: f32,
    track_height: f32,
    disabled_alpha: f32,
    colors: SeekBarColors,
    announcements: bool,
    announce_requested: bool,
    announce: DeferredTask,
    drag_claimed: bool,
    test_id_value: Option<String>,
    accessible_name_value: Option<String>,
    bounds: Rect,
}

impl Default for TwowaySeekBar {
    fn default() -> Self {
        Self::new()
    }
}

impl TwowaySeekBar {
    /// Create a seek bar over `-100..=100` anchored at 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: RangeModel::new(),
            tracker: GestureTracker::new(GestureConfig::default()),
            enabled: true,
            layout_rtl: false,
            mirror_for_rtl: false,
            tick_marks: false,
            thumb_width: DEFAULT_THUMB_WIDTH,
            track_height: DEFAULT_TRACK_HEIGHT,
            disabled_alpha: DEFAULT_DISABLED_ALPHA,
            colors: SeekBarColors::default(),
            announcements: false,
            announce_requested: false,
            announce: DeferredTask::default(),
            drag_claimed: false,
            test_id_value: None,
            accessible_name_value: None,
            bounds: Rect::default(),
        }
    }

    /// Create a seek bar from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn from_config(config: &SeekBarConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut tracker = GestureTracker::new(config.gesture);
        tracker.set_notify_while_dragging(config.notify_while_dragging);
        Ok(Self {
            model: config.build_model(),
            tracker,
            mirror_for_rtl: config.mirror_for_rtl,
            tick_marks: config.tick_marks,
            thumb_width: config.thumb_width.max(0.0),
            track_height: config.track_height.max(0.0),
            disabled_alpha: config.disabled_alpha.clamp(0.0, 1.0),
            colors: config.colors()?,
            ..Self::new()
        })
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Set both bounds, in whichever order keeps them valid. An inverted
    /// or non-finite pair is ignored as a whole.
    #[must_use]
    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        if !min.is_finite() || !max.is_finite() || min > max {
            warn!(min, max, "ignoring invalid seek bar bounds");
            return self;
        }
        if min > self.model.max() {
            self.model.set_max(max);
            self.model.set_min(min);
        } else {
            self.model.set_min(min);
            self.model.set_max(max);
        }
        self.model.mark_notified();
        self
    }

    /// Set the anchor.
    #[must_use]
    pub fn zero(mut self, zero: f64) -> Self {
        self.model.set_zero(zero);
        self
    }

    /// Set the initial value.
    #[must_use]
    pub fn value(mut self, value: f64) -> Self {
        self.model.set_value(value);
        self.model.mark_notified();
        self
    }

    /// Set the key step.
    #[must_use]
    pub fn key_value_increment(mut self, increment: f64) -> Self {
        self.model.set_key_value_increment(increment);
        self
    }

    /// Select the normalized clamp policy.
    #[must_use]
    pub fn clamp_policy(mut self, policy: ClampPolicy) -> Self {
        self.model = self.model.with_clamp_policy(policy);
        self
    }

    /// Set the drag engagement settings.
    #[must_use]
    pub fn gesture(mut self, config: GestureConfig) -> Self {
        let notify = self.tracker.notify_while_dragging();
        let offset = self.tracker.touch_value_offset();
        self.tracker = GestureTracker::new(config);
        self.tracker.set_notify_while_dragging(notify);
        self.tracker.set_touch_value_offset(offset);
        self
    }

    /// Notify on every drag move instead of only on release.
    #[must_use]
    pub fn notify_while_dragging(mut self, notify: bool) -> Self {
        self.tracker.set_notify_while_dragging(notify);
        self
    }

    /// Reverse the track under right-to-left layouts.
    #[must_use]
    pub const fn mirror_for_rtl(mut self, mirror: bool) -> Self {
        self.mirror_for_rtl = mirror;
        self
    }

    /// Draw a mark at every key step along the track.
    #[must_use]
    pub const fn tick_marks(mut self, enabled: bool) -> Self {
        self.tick_marks = enabled;
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.enabled = !disabled;
        self
    }

    /// Schedule a coalesced announcement after every notification.
    #[must_use]
    pub const fn announcements(mut self, enabled: bool) -> Self {
        self.announcements = enabled;
        self
    }

    /// Set thumb width.
    #[must_use]
    pub fn thumb_width(mut self, width: f32) -> Self {
        self.thumb_width = width.max(0.0);
        self
    }

    /// Set track height.
    #[must_use]
    pub fn track_height(mut self, height: f32) -> Self {
        self.track_height = height.max(0.0);
        self
    }

    /// Set all paint colors.
    #[must_use]
    pub const fn colors(mut self, colors: SeekBarColors) -> Self {
        self.colors = colors;
        self
    }

    /// Set track color.
    #[must_use]
    pub const fn track_color(mut self, color: Color) -> Self {
        self.colors.track = color;
        self
    }

    /// Set range segment color.
    #[must_use]
    pub const fn range_color(mut self, color: Color) -> Self {
        self.colors.range = color;
        self
    }

    /// Set thumb color.
    #[must_use]
    pub const fn thumb_color(mut self, color: Color) -> Self {
        self.colors.thumb = color;
        self
    }

    /// Set tick mark color.
    #[must_use]
    pub const fn tick_mark_color(mut self, color: Color) -> Self {
        self.colors.tick_mark = color;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get minimum value.
    #[must_use]
    pub const fn get_min(&self) -> f64 {
        self.model.min()
    }

    /// Get maximum value.
    #[must_use]
    pub const fn get_max(&self) -> f64 {
        self.model.max()
    }

    /// Get the anchor.
    #[must_use]
    pub const fn get_zero(&self) -> f64 {
        self.model.zero()
    }

    /// Get current value.
    #[must_use]
    pub fn get_value(&self) -> f64 {
        self.model.value()
    }

    /// Get normalized value.
    #[must_use]
    pub const fn get_normalized_value(&self) -> f64 {
        self.model.normalized_value()
    }

    /// Get the key step.
    #[must_use]
    pub const fn get_key_value_increment(&self) -> f64 {
        self.model.key_value_increment()
    }

    /// The underlying value model.
    #[must_use]
    pub const fn model(&self) -> &RangeModel {
        &self.model
    }

    /// Check the notify-while-dragging policy.
    #[must_use]
    pub const fn is_notify_while_dragging(&self) -> bool {
        self.tracker.notify_while_dragging()
    }

    /// Check if the seek bar accepts input.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// Check if the thumb is pressed.
    #[must_use]
    pub const fn is_thumb_pressed(&self) -> bool {
        self.tracker.is_thumb_pressed()
    }

    /// Check whether tick marks are drawn.
    #[must_use]
    pub const fn has_tick_marks(&self) -> bool {
        self.tick_marks
    }

    /// Check whether the track is drawn right to left.
    #[must_use]
    pub const fn is_mirrored(&self) -> bool {
        self.layout_rtl && self.mirror_for_rtl
    }

    /// Laid-out track geometry in widget-local coordinates.
    #[must_use]
    pub fn geometry(&self) -> TrackGeometry {
        TrackGeometry::for_thumb(self.bounds.width, self.thumb_width).mirrored(self.is_mirrored())
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Set the lower bound; rejected if above the upper bound.
    pub fn set_min(&mut self, min: f64) {
        self.model.set_min(min);
    }

    /// Set the upper bound; rejected if below the lower bound.
    pub fn set_max(&mut self, max: f64) {
        self.model.set_max(max);
    }

    /// Set the anchor.
    pub fn set_zero(&mut self, zero: f64) {
        self.model.set_zero(zero);
    }

    /// Set the absolute value.
    pub fn set_value(&mut self, value: f64) {
        self.model.set_value(value);
    }

    /// Set the normalized value.
    pub fn set_normalized_value(&mut self, normalized: f64) {
        self.model.set_normalized_value(normalized);
    }

    /// Set the key step.
    pub fn set_key_value_increment(&mut self, increment: f64) {
        self.model.set_key_value_increment(increment);
    }

    /// Move the lower bound, keeping the normalized position.
    pub fn rebase_min_keep_proportion(&mut self, min: f64) {
        self.model.rebase_min_keep_proportion(min);
    }

    /// Move the lower bound, keeping the absolute value.
    pub fn rebase_min_keep_absolute(&mut self, min: f64) {
        self.model.rebase_min_keep_absolute(min);
    }

    /// Move the upper bound, keeping the normalized position.
    pub fn rebase_max_keep_proportion(&mut self, max: f64) {
        self.model.rebase_max_keep_proportion(max);
    }

    /// Move the upper bound, keeping the absolute value.
    pub fn rebase_max_keep_absolute(&mut self, max: f64) {
        self.model.rebase_max_keep_absolute(max);
    }

    /// Set the notify-while-dragging policy.
    pub fn set_notify_while_dragging(&mut self, notify: bool) {
        self.tracker.set_notify_while_dragging(notify);
    }

    /// Set the offset added to values picked inside the track.
    pub fn set_touch_value_offset(&mut self, offset: f64) {
        self.tracker.set_touch_value_offset(offset);
    }

    /// Enable or disable input. Disabling cancels any gesture in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled {
            self.cancel_gesture();
        }
        debug!(enabled, "seek bar enabled state changed");
    }

    /// Show or hide tick marks.
    pub fn set_tick_marks(&mut self, enabled: bool) {
        self.tick_marks = enabled;
    }

    /// Set the layout direction.
    pub fn set_layout_rtl(&mut self, rtl: bool) {
        self.layout_rtl = rtl;
    }

    /// Replace the value change listener.
    pub fn on_value_change<F>(&mut self, listener: F)
    where
        F: FnMut(f64, f64) + Send + 'static,
    {
        self.model.on_change(listener);
    }

    /// Drop the value change listener.
    pub fn clear_value_change_listener(&mut self) {
        self.model.set_listener(None);
    }

    /// Take the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        self.model.take_redraw()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feed a pointer record in widget-local coordinates. Returns whether
    /// it was consumed.
    pub fn handle_motion(&mut self, event: &MotionEvent) -> bool {
        self.dispatch_motion(event).consumed
    }

    fn dispatch_motion(&mut self, event: &MotionEvent) -> TrackOutcome {
        if !self.enabled {
            return TrackOutcome::default();
        }
        let geometry = self.geometry();
        let outcome = self.tracker.handle(event, &geometry, &mut self.model);
        if outcome.claim_drag {
            self.drag_claimed = true;
        }
        if outcome.notified {
            self.request_announcement();
        }
        outcome
    }

    /// Abandon the gesture in progress, restoring the value it started
    /// from without notifying.
    pub fn cancel_gesture(&mut self) {
        if self.tracker.cancel(&mut self.model).consumed {
            self.drag_claimed = false;
        }
    }

    /// Take the pending request that ancestors stop intercepting pointer
    /// events.
    pub fn take_drag_claim(&mut self) -> bool {
        std::mem::take(&mut self.drag_claimed)
    }

    /// Step the value by the key increment. Returns whether it changed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.enabled {
            return false;
        }
        let step = if self.layout_rtl {
            -self.model.key_value_increment()
        } else {
            self.model.key_value_increment()
        };
        let delta = match key {
            Key::Left | Key::Minus => -step,
            Key::Right | Key::Plus | Key::Equals => step,
        };
        let before = self.model.notification_count();
        let changed = self.model.increment_by(delta);
        if self.model.notification_count() != before {
            self.request_announcement();
        }
        debug!(?key, changed, value = self.model.value(), "key step");
        changed
    }

    // =========================================================================
    // Accessibility
    // =========================================================================

    /// Describe the range for assistive technology.
    #[must_use]
    pub fn range_info(&self) -> RangeInfo {
        let (min, max, current) = (self.model.min(), self.model.max(), self.model.value());
        RangeInfo {
            min,
            max,
            current,
            item_count: round_to_index(max - min),
            current_index: round_to_index(current - min),
            can_decrement: self.enabled && current > min,
            can_increment: self.enabled && current < max,
        }
    }

    fn request_announcement(&mut self) {
        if self.announcements {
            self.announce_requested = true;
        }
    }

    /// Advance the announcement timer. Returns `true` when a coalesced
    /// announcement is due.
    ///
    /// A change requested since the last poll (re)starts the delay at `now`.
    pub fn poll_announcement(&mut self, now: Instant) -> bool {
        if std::mem::take(&mut self.announce_requested) {
            self.announce.schedule(now);
        }
        self.announce.poll(now)
    }

    /// Check whether an announcement is waiting.
    #[must_use]
    pub const fn has_pending_announcement(&self) -> bool {
        self.announce_requested || self.announce.is_pending()
    }

    /// Drop pending announcements and cancel any gesture in progress.
    pub fn detach(&mut self) {
        self.announce_requested = false;
        self.announce.cancel();
        self.cancel_gesture();
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Capture the persisted state.
    #[must_use]
    pub fn save_state(&self) -> SavedState {
        SavedState::capture(&self.model)
    }

    /// Restore persisted state without notifying.
    pub fn restore_state(&mut self, state: &SavedState) {
        state.apply(&mut self.model);
    }

    fn changed_message(&self) -> SeekBarChanged {
        SeekBarChanged {
            value: self.model.value(),
            normalized_value: self.model.normalized_value(),
        }
    }

    /// Number of key steps across the range, or `None` when the track is
    /// too coarse for tick marks.
    fn tick_steps(&self) -> Option<i64> {
        let increment = self.model.key_value_increment();
        if increment <= 0.0 {
            return None;
        }
        let steps = round_to_index((self.model.max() - self.model.min()) / increment);
        (steps > 1).then_some(steps)
    }

    fn paint_tick_marks(&self, canvas: &mut dyn Canvas, geometry: &TrackGeometry, center_y: f32) {
        let Some(steps) = self.tick_steps() else {
            return;
        };
        let color = self.paint_color(self.colors.tick_mark);
        let radius = self.track_height / 2.0;
        for i in 0..=steps {
            let x = self.bounds.x + geometry.normalized_to_screen(i as f64 / steps as f64);
            canvas.fill_circle(Point::new(x, center_y), radius, color);
        }
    }

    fn paint_color(&self, color: Color) -> Color {
        if self.enabled {
            color
        } else {
            Color::new(color.r, color.g, color.b, color.a * self.disabled_alpha)
        }
    }
}

impl Widget for TwowaySeekBar {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(200.0, self.thumb_width))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult { size: bounds.size() }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let geometry = self.geometry();
        let center_y = self.bounds.y + self.bounds.height / 2.0;
        let track_y = center_y - self.track_height / 2.0;

        let track = Rect::new(
            self.bounds.x + geometry.padding,
            track_y,
            geometry.available_width().max(0.0),
            self.track_height,
        );
        canvas.fill_rect(track, self.paint_color(self.colors.track));

        let value_x = self.bounds.x + geometry.normalized_to_screen(self.model.normalized_value());
        if self.model.value() != self.model.zero() {
            let zero_x = self.bounds.x + geometry.normalized_to_screen(self.model.normalize(self.model.zero()));
            let range = Rect::from_span(zero_x, value_x, track_y, self.track_height);
            canvas.fill_rect(range, self.paint_color(self.colors.range));
        }

        if self.tick_marks {
            self.paint_tick_marks(canvas, &geometry, center_y);
        }

        let thumb = if self.tracker.is_thumb_pressed() {
            self.colors.thumb_pressed
        } else {
            self.colors.thumb
        };
        canvas.fill_circle(
            Point::new(value_x, center_y),
            self.thumb_width / 2.0,
            self.paint_color(thumb),
        );
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let before = self.model.notification_count();
        match event {
            Event::Motion(motion) => {
                self.dispatch_motion(motion);
            }
            Event::KeyDown { key } => {
                self.handle_key(*key);
            }
            Event::FocusOut => self.cancel_gesture(),
            _ => {}
        }

        if self.model.notification_count() == before {
            None
        } else {
            Some(Box::new(self.changed_message()))
        }
    }

    fn is_interactive(&self) -> bool {
        self.enabled
    }

    fn is_focusable(&self) -> bool {
        self.enabled
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Slider
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
