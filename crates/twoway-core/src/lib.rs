//! Core types for the two-way seek bar.
//!
//! This crate provides the model and input handling shared by every seek
//! bar widget:
//! - Value model: [`RangeModel`] with bounds, anchor and clamp policy
//! - Pointer tracking: [`GestureTracker`] over a [`TrackGeometry`]
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Input events: [`Event`], [`MotionEvent`], [`Key`]
//! - Configuration and persistence: [`SeekBarConfig`], [`SavedState`]
//! - The [`Widget`] and [`Canvas`] seam, plus a [`RecordingCanvas`]

mod canvas;
mod color;
mod config;
mod constraints;
mod deferred;
mod error;
mod event;
mod geometry;
pub mod gesture;
pub mod range;
mod state;
pub mod widget;

pub use canvas::{DrawCommand, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use config::{SeekBarColors, SeekBarConfig, DEFAULT_DISABLED_ALPHA, DEFAULT_THUMB_WIDTH, DEFAULT_TRACK_HEIGHT};
pub use constraints::Constraints;
pub use deferred::{DeferredTask, ANNOUNCE_DELAY};
pub use error::{ConfigError, StateError};
pub use event::{Event, Key, MotionAction, MotionEvent, PointerId, PointerSample};
pub use geometry::{Point, Rect, Size};
pub use gesture::{DragStart, GestureConfig, GestureTracker, TrackGeometry, TrackOutcome, TrackerState};
pub use range::{round_to_index, ChangeListener, ClampPolicy, RangeModel};
pub use state::SavedState;
pub use widget::{AccessibleRole, Canvas, LayoutResult, TypeId, Widget};
