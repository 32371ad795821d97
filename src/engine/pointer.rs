//! Latest pointer/touch position

use glam::Vec2;

/// Stores the most recently observed pointer coordinate (viewport space)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    pos: Vec2,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mouse/pen position as-is
    #[inline]
    pub fn on_pointer_move(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Record a touch event; the first active touch wins.
    /// Returns the recorded position, or `None` if no touches were active.
    pub fn on_touch(&mut self, touches: &[Vec2]) -> Option<Vec2> {
        let first = *touches.first()?;
        self.pos = first;
        Some(first)
    }

    #[inline]
    pub fn current(&self) -> Vec2 {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_origin() {
        assert_eq!(PointerTracker::new().current(), Vec2::ZERO);
    }

    #[test]
    fn test_mouse_and_touch_share_sink() {
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_move(Vec2::new(10.0, 20.0));
        assert_eq!(tracker.current(), Vec2::new(10.0, 20.0));

        let recorded = tracker.on_touch(&[Vec2::new(5.0, 6.0), Vec2::new(99.0, 99.0)]);
        assert_eq!(recorded, Some(Vec2::new(5.0, 6.0)));
        assert_eq!(tracker.current(), Vec2::new(5.0, 6.0));
    }

    #[test]
    fn test_empty_touch_keeps_position() {
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_move(Vec2::new(1.0, 2.0));
        assert_eq!(tracker.on_touch(&[]), None);
        assert_eq!(tracker.current(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_no_range_validation() {
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_move(Vec2::new(-5000.0, 1e6));
        assert_eq!(tracker.current(), Vec2::new(-5000.0, 1e6));
    }
}
