#![forbid(unsafe_code)]

//! FloatDock public facade crate.
//!
//! This crate is the surface most hosts depend on. It re-exports the
//! geometry, gesture, layout and controller types from the internal crates
//! and offers a prelude plus a one-call logging setup.
//!
//! ```ignore
//! use fdock::prelude::*;
//!
//! fdock::logging::init();
//! let config = DockControllerConfig::new(my_host, MemoryStorage::new())
//!     .with_shortcuts(["com.example.mail"]);
//! let mut dock = DockController::new(config);
//! dock.handle_pointer(PointerEvent::Press(PointerSample::new(120.0, 130.0, 0)));
//! ```

pub mod error;
pub mod logging;

// --- Core re-exports -------------------------------------------------------

pub use fdock_core::{
    Delta, Density, DockState, GestureClassifier, GestureConfig, GestureDecision, GesturePhase,
    GestureSession, HitRegion, HitRegionSet, HitTarget, PointerEvent, PointerSample, Rect,
    RegionId, RegionKind, ScreenBounds, Size, SurfacePosition,
};

// --- Layout re-exports -----------------------------------------------------

pub use fdock_layout::{
    BODY_ID, DockSide, PlacementConfig, PlacementEngine, StackAppearance, SurfaceLayout,
    TOGGLE_CONTROL_ID, layout_stack,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "state-persistence")]
pub use fdock_runtime::FileStorage;
pub use fdock_runtime::{
    AppearancePolicy, ClickHandler, Diagnostics, DockController, DockControllerConfig, DockError,
    DockPolicy, GesturePolicy, HostError, MemoryStorage, PlacementPolicy, PolicyConfigError,
    PositionStore, StorageBackend, StorageError, StorePolicy, StoreKeys, StoredValue, WindowHost,
};

// --- Errors ---------------------------------------------------------------

pub use error::{Error, RecoveryAction, Result};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DockController, DockControllerConfig, DockError, DockPolicy, DockState, Error,
        GestureDecision, MemoryStorage, PointerEvent, PointerSample, Result, ScreenBounds,
        StorageBackend, SurfaceLayout, SurfacePosition, WindowHost,
    };

    #[cfg(feature = "state-persistence")]
    pub use crate::FileStorage;

    pub use crate::{core, layout, runtime};
}

pub use fdock_core as core;
pub use fdock_layout as layout;
pub use fdock_runtime as runtime;
