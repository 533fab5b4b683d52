#![forbid(unsafe_code)]

//! Builder for scripted pointer sequences.
//!
//! ```rust,ignore
//! let decisions = GestureScript::press(902.0, 642.0)
//!     .move_by(-300.0, 10.0)
//!     .move_by(-400.0, 10.0)
//!     .release()
//!     .run(&mut controller);
//! ```
//!
//! Ordinals are assigned in build order starting at 0. Moves and releases
//! are relative to the last emitted point.

use fdock_core::event::{PointerEvent, PointerSample};
use fdock_core::geometry::SurfacePosition;
use fdock_core::gesture::GestureDecision;
use fdock_runtime::{DockController, StorageBackend, WindowHost};

/// An ordered pointer script.
#[derive(Debug, Clone, Default)]
pub struct GestureScript {
    events: Vec<PointerEvent>,
    cursor: (f32, f32),
}

impl GestureScript {
    /// Empty script with the cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a press at absolute `(x, y)`.
    #[must_use]
    pub fn press(x: f32, y: f32) -> Self {
        Self::new().then_press(x, y)
    }

    /// Start with a press at a point local to a surface at `surface`.
    #[must_use]
    pub fn press_local(surface: SurfacePosition, lx: f32, ly: f32) -> Self {
        Self::press(surface.x as f32 + lx, surface.y as f32 + ly)
    }

    /// A full tap at a surface-local point.
    #[must_use]
    pub fn tap_local(surface: SurfacePosition, lx: f32, ly: f32) -> Self {
        Self::press_local(surface, lx, ly).release()
    }

    /// Press, one move by `(dx, dy)`, release.
    #[must_use]
    pub fn drag_local(surface: SurfacePosition, lx: f32, ly: f32, dx: f32, dy: f32) -> Self {
        Self::press_local(surface, lx, ly).move_by(dx, dy).release()
    }

    #[must_use]
    pub fn then_press(mut self, x: f32, y: f32) -> Self {
        self.cursor = (x, y);
        self.push(PointerEvent::Press);
        self
    }

    #[must_use]
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.cursor = (x, y);
        self.push(PointerEvent::Move);
        self
    }

    #[must_use]
    pub fn move_by(self, dx: f32, dy: f32) -> Self {
        let (x, y) = self.cursor;
        self.move_to(x + dx, y + dy)
    }

    /// Move in `steps` equal increments totalling `(dx, dy)`.
    #[must_use]
    pub fn glide_by(mut self, dx: f32, dy: f32, steps: u32) -> Self {
        let steps = steps.max(1);
        let (sx, sy) = (dx / steps as f32, dy / steps as f32);
        let (x0, y0) = self.cursor;
        for i in 1..=steps {
            self = self.move_to(x0 + sx * i as f32, y0 + sy * i as f32);
        }
        self
    }

    #[must_use]
    pub fn release(mut self) -> Self {
        self.push(PointerEvent::Release);
        self
    }

    #[must_use]
    pub fn cancel(mut self) -> Self {
        self.push(PointerEvent::Cancel);
        self
    }

    #[must_use]
    pub fn events(&self) -> &[PointerEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Feed every event to `controller` and collect the decisions.
    pub fn run<H, S>(&self, controller: &mut DockController<H, S>) -> Vec<GestureDecision>
    where
        H: WindowHost,
        S: StorageBackend,
    {
        self.events
            .iter()
            .map(|event| controller.handle_pointer(*event))
            .collect()
    }

    fn push(&mut self, make: fn(PointerSample) -> PointerEvent) {
        let (x, y) = self.cursor;
        let ordinal = self.events.len() as u64;
        self.events.push(make(PointerSample::new(x, y, ordinal)));
    }
}
