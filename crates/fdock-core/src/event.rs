#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! The window host translates its native touch callbacks into
//! [`PointerEvent`] values. Coordinates are absolute screen pixels so that
//! displacement stays meaningful while the surface itself moves under the
//! finger.
//!
//! # Design Notes
//!
//! - Only a single pointer is tracked; secondary pointers are the host's
//!   problem to filter.
//! - `ordinal` is a monotonically increasing counter assigned by the host.
//!   It is carried for diagnostics and ordering checks, never for timing.

use crate::geometry::{Delta, SurfacePosition};

/// One pointer observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Absolute screen x in pixels.
    pub x: f32,
    /// Absolute screen y in pixels.
    pub y: f32,
    /// Host-assigned sequence number.
    pub ordinal: u64,
}

impl PointerSample {
    /// Create a new sample.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, ordinal: u64) -> Self {
        Self { x, y, ordinal }
    }

    /// Raw displacement from `origin`, in fractional pixels.
    #[inline]
    #[must_use]
    pub fn displacement_from(&self, origin: &PointerSample) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }

    /// Integer displacement from `origin`, truncated toward zero.
    #[inline]
    #[must_use]
    pub fn delta_from(&self, origin: &PointerSample) -> Delta {
        let (dx, dy) = self.displacement_from(origin);
        Delta::new(dx as i32, dy as i32)
    }

    /// True when either axis moved strictly further than `slop` from `origin`.
    #[inline]
    #[must_use]
    pub fn exceeds_slop(&self, origin: &PointerSample, slop: f32) -> bool {
        let (dx, dy) = self.displacement_from(origin);
        dx.abs() > slop || dy.abs() > slop
    }

    /// Position of this sample relative to the surface's top-left corner.
    #[inline]
    #[must_use]
    pub fn local_to(&self, surface: SurfacePosition) -> (f32, f32) {
        (self.x - surface.x as f32, self.y - surface.y as f32)
    }
}

/// Pointer lifecycle event delivered by the window host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Finger down.
    Press(PointerSample),
    /// Finger moved while down.
    Move(PointerSample),
    /// Finger lifted.
    Release(PointerSample),
    /// The host interrupted the stream (system gesture, window teardown).
    Cancel(PointerSample),
}

impl PointerEvent {
    /// The sample carried by this event.
    #[inline]
    #[must_use]
    pub const fn sample(&self) -> PointerSample {
        match self {
            Self::Press(s) | Self::Move(s) | Self::Release(s) | Self::Cancel(s) => *s,
        }
    }

    /// Short lowercase name for log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Press(_) => "press",
            Self::Move(_) => "move",
            Self::Release(_) => "release",
            Self::Cancel(_) => "cancel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_truncates_toward_zero() {
        let origin = PointerSample::new(10.0, 10.0, 0);
        let s = PointerSample::new(15.9, 4.5, 1);
        assert_eq!(s.delta_from(&origin), Delta::new(5, -5));
    }

    #[test]
    fn slop_is_checked_per_axis() {
        let origin = PointerSample::new(0.0, 0.0, 0);
        // Euclidean distance ~11.3 but neither axis exceeds 8.
        assert!(!PointerSample::new(8.0, 8.0, 1).exceeds_slop(&origin, 8.0));
        assert!(PointerSample::new(8.5, 0.0, 1).exceeds_slop(&origin, 8.0));
        assert!(PointerSample::new(0.0, -8.5, 1).exceeds_slop(&origin, 8.0));
    }

    #[test]
    fn local_coordinates_subtract_surface_origin() {
        let s = PointerSample::new(130.0, 250.5, 0);
        assert_eq!(s.local_to(SurfacePosition::new(100, 200)), (30.0, 50.5));
    }

    #[test]
    fn sample_accessor_covers_all_variants() {
        let s = PointerSample::new(1.0, 2.0, 3);
        for ev in [
            PointerEvent::Press(s),
            PointerEvent::Move(s),
            PointerEvent::Release(s),
            PointerEvent::Cancel(s),
        ] {
            assert_eq!(ev.sample(), s);
        }
        assert_eq!(PointerEvent::Cancel(s).name(), "cancel");
    }
}
