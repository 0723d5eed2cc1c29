//! Pointer tracking for a horizontal seek bar.
//!
//! [`GestureTracker`] consumes [`MotionEvent`] records and writes normalized
//! positions into a [`RangeModel`]. It decides when a press becomes a drag
//! (touch slop, thumb hit-test), when to notify the model's listener, and
//! which pointer to follow while several are down.
//!
//! ```text
//!            Down                 |dx| > slop
//!   Idle ─────────────▶ PressArmed ───────────▶ Dragging
//!    ▲  (Immediate) ─────────────────────────────▶ │
//!    │                                             │
//!    └──────────── Up (track + notify) / Cancel ◀──┘
//! ```
//!
//! Release always performs a final track update and notifies (subject to the
//! model's dedupe). A release without a drag is a tap-to-seek.

use crate::event::{MotionAction, MotionEvent, PointerId};
use crate::range::RangeModel;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Default touch slop in pixels.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// When a press turns into a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DragStart {
    /// Dragging begins at pointer-down.
    #[default]
    Immediate,
    /// The press stays armed until the pointer travels more than the touch
    /// slop. Use inside scrolling containers.
    AfterSlop,
}

/// Drag-engagement settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Horizontal travel, in pixels, that separates a drag from a tap
    pub touch_slop: f32,
    /// When dragging begins
    pub drag_start: DragStart,
    /// Only presses on the thumb may start a drag
    pub thumb_only: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            drag_start: DragStart::Immediate,
            thumb_only: false,
        }
    }
}

impl GestureConfig {
    /// Set the touch slop.
    #[must_use]
    pub const fn touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop;
        self
    }

    /// Set when dragging begins.
    #[must_use]
    pub const fn drag_start(mut self, start: DragStart) -> Self {
        self.drag_start = start;
        self
    }

    /// Restrict drags to presses on the thumb.
    #[must_use]
    pub const fn thumb_only(mut self, thumb_only: bool) -> Self {
        self.thumb_only = thumb_only;
        self
    }
}

/// Horizontal coordinate space of a laid-out track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    /// Measured view width
    pub width: f32,
    /// Inset on each side, half the thumb width
    pub padding: f32,
    /// Right-to-left layout with mirroring enabled
    pub mirrored: bool,
}

impl TrackGeometry {
    /// Create a geometry with an explicit padding.
    #[must_use]
    pub const fn new(width: f32, padding: f32) -> Self {
        Self {
            width,
            padding,
            mirrored: false,
        }
    }

    /// Create a geometry whose padding is half the thumb width.
    #[must_use]
    pub fn for_thumb(width: f32, thumb_width: f32) -> Self {
        Self::new(width, thumb_width / 2.0)
    }

    /// Reverse the mapping for right-to-left layouts.
    #[must_use]
    pub const fn mirrored(mut self, mirrored: bool) -> Self {
        self.mirrored = mirrored;
        self
    }

    /// Width available to the thumb center.
    #[must_use]
    pub fn available_width(&self) -> f32 {
        self.width - 2.0 * self.padding
    }

    /// Check whether `x` lies between the track's end stops.
    #[must_use]
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.padding && x <= self.width - self.padding
    }

    /// Map a screen x to a normalized position in `[0, 1]`.
    ///
    /// Returns `0.0` for a degenerate (unmeasured or too narrow) track.
    #[must_use]
    pub fn screen_to_normalized(&self, x: f32) -> f64 {
        let available = self.available_width();
        if available <= 0.0 {
            return 0.0;
        }
        let n = (f64::from(x) - f64::from(self.padding)) / f64::from(available);
        let n = n.clamp(0.0, 1.0);
        if self.mirrored {
            1.0 - n
        } else {
            n
        }
    }

    /// Map a normalized position to a screen x.
    #[must_use]
    pub fn normalized_to_screen(&self, normalized: f64) -> f32 {
        let n = if self.mirrored {
            1.0 - normalized
        } else {
            normalized
        };
        (f64::from(self.padding) + n * f64::from(self.available_width())) as f32
    }

    /// Check whether `x` falls on a thumb drawn at `normalized`.
    #[must_use]
    pub fn is_in_thumb_range(&self, x: f32, normalized: f64) -> bool {
        (x - self.normalized_to_screen(normalized)).abs() <= self.padding
    }
}

/// Tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackerState {
    /// No pointer tracked
    #[default]
    Idle,
    /// Pointer down, not yet dragging
    PressArmed,
    /// Pointer position drives the value
    Dragging,
}

/// Result of feeding one record to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackOutcome {
    /// The record belonged to this widget's gesture
    pub consumed: bool,
    /// The parent should stop intercepting pointer events
    pub claim_drag: bool,
    /// The model's listener fired
    pub notified: bool,
}

impl TrackOutcome {
    const IGNORED: Self = Self {
        consumed: false,
        claim_drag: false,
        notified: false,
    };

    const CONSUMED: Self = Self {
        consumed: true,
        claim_drag: false,
        notified: false,
    };
}

/// Drag-vs-tap state machine.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    config: GestureConfig,
    state: TrackerState,
    active_pointer: Option<PointerId>,
    down_x: f32,
    thumb_pressed: bool,
    may_drag: bool,
    restore_normalized: f64,
    touch_value_offset: f64,
    notify_while_dragging: bool,
}

impl GestureTracker {
    /// Create a tracker.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Drag-engagement settings.
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> TrackerState {
        self.state
    }

    /// Check if a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state == TrackerState::Dragging
    }

    /// Check if the current press landed on the thumb.
    #[must_use]
    pub const fn is_thumb_pressed(&self) -> bool {
        self.thumb_pressed
    }

    /// Pointer being followed, if any.
    #[must_use]
    pub const fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    /// Notify on every move while dragging instead of only on release.
    pub fn set_notify_while_dragging(&mut self, notify: bool) {
        self.notify_while_dragging = notify;
    }

    /// Check the notify-while-dragging policy.
    #[must_use]
    pub const fn notify_while_dragging(&self) -> bool {
        self.notify_while_dragging
    }

    /// Offset, in absolute value units, added to values computed from
    /// pointers inside the track.
    pub fn set_touch_value_offset(&mut self, offset: f64) {
        if offset.is_finite() {
            self.touch_value_offset = offset;
        }
    }

    /// Touch value offset.
    #[must_use]
    pub const fn touch_value_offset(&self) -> f64 {
        self.touch_value_offset
    }

    /// Drop all gesture state without touching the model.
    pub fn reset(&mut self) {
        self.state = TrackerState::Idle;
        self.active_pointer = None;
        self.thumb_pressed = false;
        self.may_drag = false;
    }

    /// Feed one motion record.
    pub fn handle(&mut self, event: &MotionEvent, geometry: &TrackGeometry, model: &mut RangeModel) -> TrackOutcome {
        match event.action {
            MotionAction::Down => self.on_down(event, geometry, model),
            MotionAction::Move => self.on_move(event, geometry, model),
            MotionAction::Up => self.on_up(event, geometry, model),
            MotionAction::Cancel => self.cancel(model),
            MotionAction::PointerDown => self.on_pointer_down(event),
            MotionAction::PointerUp => self.on_pointer_up(event),
        }
    }

    fn on_down(&mut self, event: &MotionEvent, geometry: &TrackGeometry, model: &mut RangeModel) -> TrackOutcome {
        let Some(pointer) = event.action_pointer() else {
            return TrackOutcome::IGNORED;
        };
        let x = pointer.position.x;
        self.active_pointer = Some(pointer.id);
        self.down_x = x;
        self.restore_normalized = model.normalized_value();
        self.thumb_pressed = geometry.is_in_thumb_range(x, model.normalized_value());
        self.may_drag = !self.config.thumb_only || self.thumb_pressed;
        debug!(pointer = pointer.id.0, x, thumb = self.thumb_pressed, "pointer down");

        if self.may_drag && self.config.drag_start == DragStart::Immediate {
            self.state = TrackerState::Dragging;
            self.track(x, geometry, model);
            TrackOutcome {
                consumed: true,
                claim_drag: true,
                notified: false,
            }
        } else {
            self.state = TrackerState::PressArmed;
            TrackOutcome::CONSUMED
        }
    }

    fn on_move(&mut self, event: &MotionEvent, geometry: &TrackGeometry, model: &mut RangeModel) -> TrackOutcome {
        let Some(x) = self.active_pointer.and_then(|id| event.x_of(id)) else {
            return if self.state == TrackerState::Idle {
                TrackOutcome::IGNORED
            } else {
                TrackOutcome::CONSUMED
            };
        };

        let mut outcome = TrackOutcome::CONSUMED;
        match self.state {
            TrackerState::Idle => return TrackOutcome::IGNORED,
            TrackerState::PressArmed => {
                if !self.may_drag || (x - self.down_x).abs() <= self.config.touch_slop {
                    return outcome;
                }
                debug!(x, down_x = self.down_x, "slop exceeded, dragging");
                self.state = TrackerState::Dragging;
                outcome.claim_drag = true;
            }
            TrackerState::Dragging => {}
        }

        self.track(x, geometry, model);
        if self.notify_while_dragging {
            outcome.notified = model.notify_change();
        }
        outcome
    }

    fn on_up(&mut self, event: &MotionEvent, geometry: &TrackGeometry, model: &mut RangeModel) -> TrackOutcome {
        if self.state == TrackerState::Idle {
            return TrackOutcome::IGNORED;
        }
        if let Some(x) = self.active_pointer.and_then(|id| event.x_of(id)) {
            if self.state != TrackerState::Dragging {
                trace!(x, "tap to seek");
            }
            self.track(x, geometry, model);
        }
        self.reset();
        let notified = model.notify_change();
        debug!(value = model.value(), notified, "gesture released");
        TrackOutcome {
            consumed: true,
            claim_drag: false,
            notified,
        }
    }

    /// Abandon the gesture in progress, restoring the value seen at
    /// pointer-down. Never notifies.
    pub fn cancel(&mut self, model: &mut RangeModel) -> TrackOutcome {
        if self.state == TrackerState::Idle {
            return TrackOutcome::IGNORED;
        }
        model.set_normalized_value(self.restore_normalized);
        self.reset();
        debug!(normalized = self.restore_normalized, "gesture cancelled");
        TrackOutcome::CONSUMED
    }

    fn on_pointer_down(&mut self, event: &MotionEvent) -> TrackOutcome {
        if self.state == TrackerState::Idle {
            return TrackOutcome::IGNORED;
        }
        let Some(pointer) = event.action_pointer() else {
            return TrackOutcome::CONSUMED;
        };
        self.active_pointer = Some(pointer.id);
        self.down_x = pointer.position.x;
        trace!(pointer = pointer.id.0, "retargeted to new pointer");
        TrackOutcome::CONSUMED
    }

    fn on_pointer_up(&mut self, event: &MotionEvent) -> TrackOutcome {
        if self.state == TrackerState::Idle {
            return TrackOutcome::IGNORED;
        }
        let Some(lifted) = event.action_pointer().map(|p| p.id) else {
            return TrackOutcome::CONSUMED;
        };
        if Some(lifted) == self.active_pointer {
            if let Some(next) = event.pointers.iter().find(|p| p.id != lifted) {
                self.active_pointer = Some(next.id);
                self.down_x = next.position.x;
                trace!(lifted = lifted.0, pointer = next.id.0, "active pointer lifted, retargeted");
            }
        }
        TrackOutcome::CONSUMED
    }

    fn track(&self, x: f32, geometry: &TrackGeometry, model: &mut RangeModel) {
        let mut value = model.recover(geometry.screen_to_normalized(x));
        if geometry.contains_x(x) {
            value += self.touch_value_offset;
        }
        model.set_value(value);
        trace!(x, value = model.value(), "tracked");
    }
}
