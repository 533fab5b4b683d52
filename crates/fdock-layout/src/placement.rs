#![forbid(unsafe_code)]

//! Resting-position computation for the dock surface.
//!
//! The engine is pure: it never talks to the host or the store. The
//! controller feeds it the drag origin, the pointer delta, the measured
//! surface size and the latest screen bounds.
//!
//! # Invariants
//!
//! 1. [`PlacementEngine::follow`] is unclamped so the surface tracks the
//!    finger exactly, including transient off-screen excursions.
//! 2. Every position returned by [`PlacementEngine::settle`] or
//!    [`PlacementEngine::reconcile`] lies entirely inside valid screen bounds.
//!    A surface larger than the screen is pinned at 0 on that axis.
//! 3. Side detection compares the surface center to the screen midline with
//!    a strict `<` for the left edge; a center exactly on the midline docks
//!    right.
//! 4. Vertical position is never snapped, only clamped.

use fdock_core::geometry::{Delta, ScreenBounds, Size, SurfacePosition};

/// Tunables for the placement engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementConfig {
    /// Inset (px) kept between a docked surface and the screen edge.
    pub dock_padding: i32,
}

/// Horizontal edge the surface rests against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DockSide {
    Left,
    Right,
}

/// Computes follow, settle and rotation positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementEngine {
    config: PlacementConfig,
}

impl PlacementEngine {
    #[must_use]
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            config: PlacementConfig {
                dock_padding: config.dock_padding.max(0),
            },
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Candidate position while a drag is in flight.
    #[inline]
    #[must_use]
    pub fn follow(&self, origin: SurfacePosition, delta: Delta) -> SurfacePosition {
        origin.offset(delta)
    }

    /// Which edge a surface at `position` belongs to on `screen`.
    #[must_use]
    pub fn dock_side(position: SurfacePosition, size: Size, screen: ScreenBounds) -> DockSide {
        let center_x = position.x.saturating_add(size.width / 2);
        if center_x < screen.half_width() {
            DockSide::Left
        } else {
            DockSide::Right
        }
    }

    /// Resting x for a surface docked to `side`.
    #[must_use]
    pub fn edge_x(&self, side: DockSide, size: Size, screen: ScreenBounds) -> i32 {
        match side {
            DockSide::Left => self.config.dock_padding,
            DockSide::Right => screen.width - size.width - self.config.dock_padding,
        }
    }

    /// Keep the whole surface inside `screen`.
    ///
    /// Malformed bounds leave the position untouched.
    #[must_use]
    pub fn clamp(position: SurfacePosition, size: Size, screen: ScreenBounds) -> SurfacePosition {
        if !screen.is_valid() {
            return position;
        }
        let max_x = (screen.width - size.width.max(0)).max(0);
        let max_y = (screen.height - size.height.max(0)).max(0);
        SurfacePosition::new(position.x.clamp(0, max_x), position.y.clamp(0, max_y))
    }

    /// Final resting position after a drag ends.
    ///
    /// Applies `delta` to `current`, snaps x to the nearer horizontal edge,
    /// keeps the dragged y, then clamps on screen. With malformed bounds the
    /// unsnapped candidate is returned.
    #[must_use]
    pub fn settle(
        &self,
        current: SurfacePosition,
        delta: Delta,
        size: Size,
        screen: ScreenBounds,
    ) -> SurfacePosition {
        let candidate = self.follow(current, delta);
        if !screen.is_valid() {
            return candidate;
        }
        let side = Self::dock_side(candidate, size, screen);
        let snapped = SurfacePosition::new(self.edge_x(side, size, screen), candidate.y);
        Self::clamp(snapped, size, screen)
    }

    /// Re-dock after a screen geometry change.
    ///
    /// Returns `None` when nothing should move: either bounds are malformed
    /// or the width did not change. The side is decided against the *old*
    /// width using the surface center; y is preserved subject to clamping.
    #[must_use]
    pub fn reconcile(
        &self,
        position: SurfacePosition,
        size: Size,
        old: ScreenBounds,
        new: ScreenBounds,
    ) -> Option<SurfacePosition> {
        if !old.is_valid() || !new.is_valid() || old.width == new.width {
            return None;
        }
        let side = Self::dock_side(position, size, old);
        let redocked = SurfacePosition::new(self.edge_x(side, size, new), position.y);
        Some(Self::clamp(redocked, size, new))
    }
}
