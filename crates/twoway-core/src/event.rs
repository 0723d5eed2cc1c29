//! Input events for widgets.
//!
//! Pointer input arrives as [`MotionEvent`] records: one record per platform
//! dispatch, carrying every pointer currently on the surface. The
//! [`MotionEvent::action_index`] names the pointer the action applies to,
//! which matters for the secondary [`MotionAction::PointerDown`] and
//! [`MotionAction::PointerUp`] transitions of multi-touch.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types delivered to widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer motion record
    Motion(MotionEvent),
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
    },
    /// Key released
    KeyUp {
        /// Key released
        key: Key,
    },
    /// Widget gained focus
    FocusIn,
    /// Widget lost focus
    FocusOut,
}

/// Pointer identifier, stable for the lifetime of one touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PointerId(pub u32);

impl PointerId {
    /// Create a new pointer ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Kind of a motion record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionAction {
    /// First pointer went down
    Down,
    /// One or more pointers moved
    Move,
    /// Last pointer went up
    Up,
    /// Gesture aborted by the platform or an ancestor
    Cancel,
    /// An additional pointer went down
    PointerDown,
    /// A non-last pointer went up
    PointerUp,
}

/// Position of one pointer within a motion record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Pointer ID
    pub id: PointerId,
    /// Position in widget-local coordinates
    pub position: Point,
}

impl PointerSample {
    /// Create a new sample.
    #[must_use]
    pub const fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

/// A platform pointer-event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    /// What happened
    pub action: MotionAction,
    /// Index into `pointers` of the pointer the action applies to
    pub action_index: usize,
    /// Every pointer currently down, in platform order
    pub pointers: Vec<PointerSample>,
}

impl MotionEvent {
    /// Create a record with an explicit pointer list.
    #[must_use]
    pub const fn new(action: MotionAction, action_index: usize, pointers: Vec<PointerSample>) -> Self {
        Self {
            action,
            action_index,
            pointers,
        }
    }

    fn single(action: MotionAction, id: PointerId, x: f32, y: f32) -> Self {
        Self::new(action, 0, vec![PointerSample::new(id, x, y)])
    }

    /// Single-pointer `Down` record.
    #[must_use]
    pub fn down(id: PointerId, x: f32, y: f32) -> Self {
        Self::single(MotionAction::Down, id, x, y)
    }

    /// Single-pointer `Move` record.
    #[must_use]
    pub fn moved(id: PointerId, x: f32, y: f32) -> Self {
        Self::single(MotionAction::Move, id, x, y)
    }

    /// Single-pointer `Up` record.
    #[must_use]
    pub fn up(id: PointerId, x: f32, y: f32) -> Self {
        Self::single(MotionAction::Up, id, x, y)
    }

    /// `Cancel` record for the given pointer.
    #[must_use]
    pub fn cancel(id: PointerId) -> Self {
        Self::single(MotionAction::Cancel, id, 0.0, 0.0)
    }

    /// The pointer the action applies to.
    #[must_use]
    pub fn action_pointer(&self) -> Option<&PointerSample> {
        self.pointers.get(self.action_index)
    }

    /// Find a pointer by ID.
    #[must_use]
    pub fn find(&self, id: PointerId) -> Option<&PointerSample> {
        self.pointers.iter().find(|p| p.id == id)
    }

    /// X coordinate of a pointer by ID.
    #[must_use]
    pub fn x_of(&self, id: PointerId) -> Option<f32> {
        self.find(id).map(|p| p.position.x)
    }
}

/// Keyboard key identifiers the seek bar reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Left arrow / D-pad left
    Left,
    /// Right arrow / D-pad right
    Right,
    /// Minus
    Minus,
    /// Plus
    Plus,
    /// Equals (shares the key with plus on most layouts)
    Equals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_serde_roundtrip() {
        let event = Event::KeyDown { key: Key::Equals };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_single_pointer_constructors() {
        let id = PointerId::new(3);
        let down = MotionEvent::down(id, 10.0, 20.0);
        assert_eq!(down.action, MotionAction::Down);
        assert_eq!(down.action_index, 0);
        assert_eq!(down.x_of(id), Some(10.0));
        assert_eq!(down.action_pointer().map(|p| p.id), Some(id));

        assert_eq!(MotionEvent::moved(id, 0.0, 0.0).action, MotionAction::Move);
        assert_eq!(MotionEvent::up(id, 0.0, 0.0).action, MotionAction::Up);
        assert_eq!(MotionEvent::cancel(id).action, MotionAction::Cancel);
    }

    #[test]
    fn test_multi_pointer_lookup() {
        let event = MotionEvent::new(
            MotionAction::PointerDown,
            1,
            vec![
                PointerSample::new(PointerId::new(0), 10.0, 0.0),
                PointerSample::new(PointerId::new(7), 90.0, 0.0),
            ],
        );
        assert_eq!(event.action_pointer().map(|p| p.id), Some(PointerId::new(7)));
        assert_eq!(event.x_of(PointerId::new(0)), Some(10.0));
        assert_eq!(event.x_of(PointerId::new(42)), None);
    }

    #[test]
    fn test_action_index_out_of_range() {
        let event = MotionEvent::new(MotionAction::PointerUp, 5, Vec::new());
        assert!(event.action_pointer().is_none());
        assert!(event.find(PointerId::new(0)).is_none());
    }

    #[test]
    fn test_motion_event_serde_roundtrip() {
        let event = MotionEvent::moved(PointerId::new(1), 12.5, 4.0);
        let json = serde_json::to_string(&event).unwrap();
        let back: MotionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
