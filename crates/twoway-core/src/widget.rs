//! Widget trait and related types.
//!
//! Widgets follow a measure-layout-paint cycle:
//!
//! 1. **Measure**: Compute intrinsic size given constraints
//! 2. **Layout**: Store the allocated bounds
//! 3. **Paint**: Issue draw calls against a [`Canvas`]
//!
//! Input arrives through [`Widget::event`], which returns a boxed message
//! when the event produced something the application should see.
//!
//! # Examples
//!
//! ```
//! use twoway_core::TypeId;
//!
//! assert_ne!(TypeId::of::<String>(), TypeId::of::<i32>());
//! ```

use crate::color::Color;
use crate::constraints::Constraints;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Core widget trait.
///
/// Implementations are driven from a single UI thread; `Send` lets a widget
/// tree move to that thread once.
pub trait Widget: Send {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Accept allocated bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Issue draw calls.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle an input event.
    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>>;

    /// Get child widgets.
    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    /// Check if this widget is interactive.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Check if this widget can receive keyboard focus.
    fn is_focusable(&self) -> bool {
        false
    }

    /// Get the accessible name for screen readers.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Drawing backend.
///
/// This is the whole capability surface a widget may assume; tinting,
/// tiling and image loading live behind it.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);
}

/// Accessible role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Slider / seek bar
    Slider,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Spacer {
        bounds: Rect,
    }

    impl Widget for Spacer {
        fn type_id(&self) -> TypeId {
            TypeId::of::<Self>()
        }

        fn measure(&self, constraints: Constraints) -> Size {
            constraints.constrain(Size::new(10.0, 10.0))
        }

        fn layout(&mut self, bounds: Rect) -> LayoutResult {
            self.bounds = bounds;
            LayoutResult { size: bounds.size() }
        }

        fn paint(&self, canvas: &mut dyn Canvas) {
            canvas.fill_rect(self.bounds, Color::BLACK);
        }

        fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
            None
        }
    }

    #[test]
    fn test_widget_defaults() {
        let spacer = Spacer { bounds: Rect::default() };
        assert!(spacer.children().is_empty());
        assert!(!spacer.is_interactive());
        assert!(!spacer.is_focusable());
        assert!(spacer.accessible_name().is_none());
        assert_eq!(spacer.accessible_role(), AccessibleRole::Generic);
        assert!(spacer.test_id().is_none());
        assert_eq!(spacer.bounds(), Rect::default());
        assert_eq!(Widget::type_id(&spacer), TypeId::of::<Spacer>());
    }

    #[test]
    fn test_widget_layout_returns_size() {
        let mut spacer = Spacer { bounds: Rect::default() };
        let result = spacer.layout(Rect::new(0.0, 0.0, 30.0, 5.0));
        assert_eq!(result.size, Size::new(30.0, 5.0));
        assert_eq!(spacer.measure(Constraints::loose(Size::new(4.0, 4.0))), Size::new(4.0, 4.0));
    }
}
