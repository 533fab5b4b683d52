#![forbid(unsafe_code)]

//! Geometric primitives in screen pixels.
//!
//! All coordinates are signed: a surface may be dragged partially off the
//! left or top edge while a gesture is in flight, so negative values are
//! legal until the placement engine clamps a resting position.

use std::fmt;

/// Top-left corner of the dock surface in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfacePosition {
    pub x: i32,
    pub y: i32,
}

impl SurfacePosition {
    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a pointer delta.
    #[inline]
    #[must_use]
    pub const fn offset(self, delta: Delta) -> Self {
        Self {
            x: self.x.saturating_add(delta.dx),
            y: self.y.saturating_add(delta.dy),
        }
    }
}

impl From<(i32, i32)> for SurfacePosition {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for SurfacePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Integer pointer displacement relative to a gesture origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    /// Zero displacement.
    pub const ZERO: Delta = Delta { dx: 0, dy: 0 };

    /// Create a new delta.
    #[inline]
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// True when both components are zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Width and height of the dock surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Display geometry reported by the window host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenBounds {
    pub width: i32,
    pub height: i32,
}

impl ScreenBounds {
    /// Create new screen bounds.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Bounds with a zero or negative dimension are malformed and must not
    /// drive placement.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Horizontal midline used for edge docking.
    #[inline]
    #[must_use]
    pub const fn half_width(&self) -> i32 {
        self.width / 2
    }
}

impl fmt::Display for ScreenBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rectangle relative to the dock surface, used for hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle anchored at the origin.
    #[inline]
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a surface-local point is inside the rectangle.
    #[inline]
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        !self.is_empty()
            && x >= self.x as f32
            && x < self.right() as f32
            && y >= self.y as f32
            && y < self.bottom() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_applies_delta() {
        let p = SurfacePosition::new(100, 40).offset(Delta::new(-130, 25));
        assert_eq!(p, SurfacePosition::new(-30, 65));
    }

    #[test]
    fn offset_saturates() {
        let p = SurfacePosition::new(i32::MAX, 0).offset(Delta::new(10, 0));
        assert_eq!(p.x, i32::MAX);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(29.9, 29.9));
        assert!(!r.contains(30.0, 15.0));
        assert!(!r.contains(15.0, 30.0));
        assert!(!r.contains(9.9, 15.0));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::new(0, 0, 0, 10);
        assert!(r.is_empty());
        assert!(!r.contains(0.0, 0.0));
    }

    #[test]
    fn screen_bounds_validity() {
        assert!(ScreenBounds::new(1080, 1920).is_valid());
        assert!(!ScreenBounds::new(0, 1920).is_valid());
        assert!(!ScreenBounds::new(1080, -1).is_valid());
        assert_eq!(ScreenBounds::new(1001, 10).half_width(), 500);
    }

    #[test]
    fn display_formats() {
        assert_eq!(SurfacePosition::new(3, -4).to_string(), "(3, -4)");
        assert_eq!(ScreenBounds::new(1000, 600).to_string(), "1000x600");
    }
}
