//! Twoway: a two-way range selection slider.
//!
//! A seek bar with an anchor: the thumb picks a value between `min` and
//! `max`, and the highlighted segment runs from `zero` to that value, so the
//! control reads as either a plain value or a signed offset.
//!
//! # Example
//!
//! ```
//! use twoway::prelude::*;
//!
//! let mut bar = TwowaySeekBar::new().bounds(-50.0, 50.0).value(10.0);
//! bar.layout(Rect::new(0.0, 0.0, 220.0, 20.0));
//! bar.on_value_change(|value, _normalized| println!("value: {value}"));
//!
//! let id = PointerId::new(0);
//! bar.handle_motion(&MotionEvent::down(id, 210.0, 10.0));
//! bar.handle_motion(&MotionEvent::up(id, 210.0, 10.0));
//! assert_eq!(bar.get_value(), 50.0);
//! ```

pub use twoway_core::*;
pub use twoway_widgets as widgets;

/// Common imports.
pub mod prelude {
    pub use twoway_core::{
        Canvas, ClampPolicy, Color, Constraints, DragStart, Event, GestureConfig, Key, MotionAction, MotionEvent,
        PointerId, PointerSample, RangeModel, Rect, SavedState, SeekBarConfig, Size, Widget,
    };
    pub use twoway_widgets::{RangeInfo, SeekBarChanged, TwowaySeekBar};
}
