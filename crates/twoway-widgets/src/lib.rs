//! Widget implementations for the two-way seek bar.

pub mod seek_bar;

pub use seek_bar::{RangeInfo, SeekBarChanged, TwowaySeekBar};
