#![forbid(unsafe_code)]

//! In-memory [`WindowHost`] that records every request.

use fdock_core::geometry::{ScreenBounds, Size, SurfacePosition};
use fdock_layout::SurfaceLayout;
use fdock_runtime::{HostError, WindowHost};

/// One request received by a [`SimulatedHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Reposition(SurfacePosition),
    ApplyLayout { size: Size, opacity: f32 },
}

/// Scriptable window host.
///
/// Starts attached. Requests made while detached or rejecting are refused
/// and not recorded.
#[derive(Debug, Clone)]
pub struct SimulatedHost {
    bounds: ScreenBounds,
    attached: bool,
    rejection: Option<String>,
    calls: Vec<HostCall>,
}

impl SimulatedHost {
    #[must_use]
    pub fn new(bounds: ScreenBounds) -> Self {
        Self {
            bounds,
            attached: true,
            rejection: None,
            calls: Vec::new(),
        }
    }

    /// Portrait phone-sized screen used by most fixtures.
    #[must_use]
    pub fn phone() -> Self {
        Self::new(ScreenBounds::new(1080, 2340))
    }

    /// Change the bounds the host reports. The controller still has to be
    /// told via `on_geometry_changed`.
    pub fn set_bounds(&mut self, bounds: ScreenBounds) {
        self.bounds = bounds;
    }

    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    /// Refuse every request with `reason` until cleared with `None`.
    pub fn set_rejection(&mut self, reason: Option<String>) {
        self.rejection = reason;
    }

    #[must_use]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Positions passed to `reposition`, in order.
    pub fn moves(&self) -> impl Iterator<Item = SurfacePosition> + '_ {
        self.calls.iter().filter_map(|c| match c {
            HostCall::Reposition(p) => Some(*p),
            HostCall::ApplyLayout { .. } => None,
        })
    }

    /// Where the host last placed the surface.
    #[must_use]
    pub fn last_position(&self) -> Option<SurfacePosition> {
        self.moves().last()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn check(&self) -> Result<(), HostError> {
        if !self.attached {
            return Err(HostError::NotAttached);
        }
        match &self.rejection {
            Some(reason) => Err(HostError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}

impl WindowHost for SimulatedHost {
    fn reposition(&mut self, position: SurfacePosition) -> Result<(), HostError> {
        self.check()?;
        self.calls.push(HostCall::Reposition(position));
        Ok(())
    }

    fn screen_bounds(&self) -> ScreenBounds {
        self.bounds
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn apply_layout(&mut self, layout: &SurfaceLayout) -> Result<(), HostError> {
        self.check()?;
        self.calls.push(HostCall::ApplyLayout {
            size: layout.size,
            opacity: layout.opacity,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_moves_in_order() {
        let mut host = SimulatedHost::phone();
        host.reposition(SurfacePosition::new(1, 2)).unwrap();
        host.reposition(SurfacePosition::new(3, 4)).unwrap();
        assert_eq!(host.moves().count(), 2);
        assert_eq!(host.last_position(), Some(SurfacePosition::new(3, 4)));
    }

    #[test]
    fn detached_host_refuses() {
        let mut host = SimulatedHost::phone();
        host.set_attached(false);
        assert_eq!(
            host.reposition(SurfacePosition::new(0, 0)),
            Err(HostError::NotAttached)
        );
        assert!(host.calls().is_empty());
    }

    #[test]
    fn rejection_carries_reason() {
        let mut host = SimulatedHost::phone();
        host.set_rejection(Some("token revoked".into()));
        assert_eq!(
            host.reposition(SurfacePosition::new(0, 0)),
            Err(HostError::Rejected("token revoked".into()))
        );
    }
}
