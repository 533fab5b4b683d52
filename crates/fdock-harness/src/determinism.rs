#![forbid(unsafe_code)]

//! Deterministic fixtures for tests.
//!
//! Centralizes seed selection and builds ready-to-drive controllers so that
//! storm and property tests start from identical state.

use fdock_core::geometry::{Rect, ScreenBounds, SurfacePosition};
use fdock_runtime::{
    DockController, DockControllerConfig, MemoryStorage, StorageBackend, StoreKeys,
};

use crate::host::SimulatedHost;

/// Controller type used throughout the harness.
pub type SimController = DockController<SimulatedHost, MemoryStorage>;

/// Shared fixture for one test run.
#[derive(Debug, Clone)]
pub struct DockFixture {
    seed: u64,
    run_id: String,
    screen: ScreenBounds,
    start: SurfacePosition,
    shortcuts: Vec<String>,
}

impl DockFixture {
    /// Fixture with the seed taken from the environment, if set.
    #[must_use]
    pub fn new(prefix: &str, default_seed: u64) -> Self {
        let seed = fixture_seed(default_seed);
        Self {
            seed,
            run_id: format!("{prefix}_seed{seed}"),
            screen: ScreenBounds::new(1000, 2000),
            start: SurfacePosition::new(100, 100),
            shortcuts: vec!["com.example.mail".into(), "com.example.maps".into()],
        }
    }

    #[must_use]
    pub fn with_screen(mut self, screen: ScreenBounds) -> Self {
        self.screen = screen;
        self
    }

    /// Persisted position the controller restores on construction.
    #[must_use]
    pub fn with_start(mut self, start: SurfacePosition) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub fn with_shortcuts<I, T>(mut self, shortcuts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.shortcuts = shortcuts.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Stable run identifier for logs.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    #[must_use]
    pub fn screen(&self) -> ScreenBounds {
        self.screen
    }

    /// Controller on a [`SimulatedHost`] with the start position persisted
    /// under the default keys.
    #[must_use]
    pub fn controller(&self) -> SimController {
        let keys = StoreKeys::default();
        let mut storage = MemoryStorage::new();
        // A fresh in-memory backend is always available.
        let _ = storage.set_int(&keys.pos_x, self.start.x);
        let _ = storage.set_int(&keys.pos_y, self.start.y);
        let config = DockControllerConfig::new(SimulatedHost::new(self.screen), storage)
            .with_shortcuts(self.shortcuts.iter().cloned());
        tracing::debug!(run_id = %self.run_id, seed = self.seed, "fixture controller built");
        DockController::new(config)
    }
}

/// Absolute rectangle currently covered by the controller's surface.
#[must_use]
pub fn surface_rect(controller: &SimController) -> Rect {
    let p = controller.position();
    let s = controller.surface_size();
    Rect::new(p.x, p.y, s.width, s.height)
}

/// Choose a seed from the environment or use the provided default.
#[must_use]
pub fn fixture_seed(default_seed: u64) -> u64 {
    env_u64("FDOCK_TEST_SEED")
        .or_else(|| env_u64("FDOCK_SEED"))
        .unwrap_or(default_seed)
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_restores_start() {
        let fixture = DockFixture::new("restore", 1).with_start(SurfacePosition::new(936, 400));
        let ctl = fixture.controller();
        assert_eq!(ctl.position(), SurfacePosition::new(936, 400));
        assert_eq!(ctl.screen_bounds(), fixture.screen());
        assert_eq!(ctl.shortcuts().len(), 2);
    }

    #[test]
    fn surface_rect_tracks_position() {
        let ctl = DockFixture::new("rect", 1).controller();
        assert_eq!(surface_rect(&ctl), Rect::new(100, 100, 64, 168));
    }
}
