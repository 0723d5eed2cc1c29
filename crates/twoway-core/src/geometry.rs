//! Geometric primitives: Point, Size, Rect.

use serde::{Deserialize, Serialize};

/// A 2D point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// A 2D size with width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position of top-left corner
    pub x: f32,
    /// Y position of top-left corner
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle spanning two x-coordinates, in either order.
    #[must_use]
    pub fn from_span(a: f32, b: f32, y: f32, height: f32) -> Self {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        Self::new(left, y, right - left, height)
    }

    /// Get the size.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_span_orders_edges() {
        let r = Rect::from_span(80.0, 20.0, 5.0, 4.0);
        assert_eq!(r.x, 20.0);
        assert_eq!(r.width, 60.0);
        assert_eq!(r.y, 5.0);

        let same = Rect::from_span(20.0, 80.0, 5.0, 4.0);
        assert_eq!(same, r);
    }

    #[test]
    fn test_defaults_are_zero() {
        assert_eq!(Point::default(), Point::ORIGIN);
        assert_eq!(Size::default(), Size::ZERO);
        assert_eq!(Rect::default().size(), Size::ZERO);
    }
}
