//! Axis-aligned rectangles in viewport space

use glam::Vec2;

/// A measured bounding rectangle (origin top-left, pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle of the given size centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Usable for placement math: finite, non-negative size
    pub fn is_measurable(&self) -> bool {
        self.origin.is_finite() && self.size.is_finite() && self.size.x >= 0.0 && self.size.y >= 0.0
    }

    /// Translate by an offset
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            origin: self.origin + offset,
            size: self.size,
        }
    }
}
