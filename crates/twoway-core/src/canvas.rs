//! Canvas that records draw calls.

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::widget::Canvas;
use serde::{Deserialize, Serialize};

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Filled rectangle
    FillRect {
        /// Bounds
        rect: Rect,
        /// Fill color
        color: Color,
    },
    /// Filled circle
    Circle {
        /// Center
        center: Point,
        /// Radius
        radius: f32,
        /// Fill color
        color: Color,
    },
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// Tests paint into it and inspect what came out.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_canvas_records_in_order() {
        let mut canvas = RecordingCanvas::new();
        assert!(canvas.is_empty());

        canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 2.0), Color::GRAY);
        canvas.fill_circle(Point::new(5.0, 1.0), 3.0, Color::WHITE);

        assert_eq!(canvas.command_count(), 2);
        assert!(!canvas.is_empty());
        assert!(matches!(canvas.commands()[0], DrawCommand::FillRect { color, .. } if color == Color::GRAY));
        assert!(matches!(canvas.commands()[1], DrawCommand::Circle { radius, .. } if radius == 3.0));
    }
}
