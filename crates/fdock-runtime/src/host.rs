#![forbid(unsafe_code)]

//! Window host seam.
//!
//! The host owns the real overlay window. The controller only asks it to
//! move the surface, reads the screen bounds, and checks whether the
//! surface is currently attached. Geometry changes are pushed into the
//! controller by the host via `DockController::on_geometry_changed`.

use std::fmt;

use fdock_core::geometry::{ScreenBounds, SurfacePosition};
use fdock_layout::SurfaceLayout;

/// Failure reported by a [`WindowHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The surface is not attached to the window manager.
    NotAttached,
    /// Any other refusal, with the host's reason.
    Rejected(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAttached => write!(f, "surface not attached"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}

impl std::error::Error for HostError {}

/// The overlay window the dock lives in.
pub trait WindowHost {
    /// Move the surface's top-left corner to `position`.
    fn reposition(&mut self, position: SurfacePosition) -> Result<(), HostError>;

    /// Current screen bounds in pixels.
    fn screen_bounds(&self) -> ScreenBounds;

    /// Whether the surface is attached and may be repositioned.
    fn is_attached(&self) -> bool;

    /// Apply a rebuilt layout (size, opacity, visible icons).
    ///
    /// Hosts that size the surface from their own measurement may ignore it.
    fn apply_layout(&mut self, layout: &SurfaceLayout) -> Result<(), HostError> {
        let _ = layout;
        Ok(())
    }
}

impl<H: WindowHost + ?Sized> WindowHost for Box<H> {
    fn reposition(&mut self, position: SurfacePosition) -> Result<(), HostError> {
        (**self).reposition(position)
    }

    fn screen_bounds(&self) -> ScreenBounds {
        (**self).screen_bounds()
    }

    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn apply_layout(&mut self, layout: &SurfaceLayout) -> Result<(), HostError> {
        (**self).apply_layout(layout)
    }
}
