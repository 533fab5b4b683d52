#![forbid(unsafe_code)]

//! Core: geometry, pointer events, hit regions, and gesture classification.
//!
//! # Role in FloatDock
//! `fdock-core` is the input layer. It owns the pixel geometry types, the
//! canonical pointer event sum type delivered by the window host, the
//! expanded/collapsed dock state, and the tap-vs-drag classifier.
//!
//! # Primary responsibilities
//! - **PointerEvent**: press/move/release/cancel carrying absolute samples.
//! - **HitRegionSet**: control-first hit testing of surface-local points.
//! - **GestureClassifier**: the pure state machine that decides between
//!   `Click` and the drag lifecycle.
//! - **Density**: dp → px conversion injected once at construction.
//!
//! # How it fits in the system
//! `fdock-layout` computes where the surface rests and what regions it
//! exposes; `fdock-runtime` owns the controller that feeds host events into
//! the classifier and applies placement and persistence.

pub mod density;
pub mod dock_state;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod hit_region;

pub use density::Density;
pub use dock_state::DockState;
pub use event::{PointerEvent, PointerSample};
pub use geometry::{Delta, Rect, ScreenBounds, Size, SurfacePosition};
pub use gesture::{
    GestureClassifier, GestureConfig, GestureDecision, GesturePhase, GestureSession,
};
pub use hit_region::{HitRegion, HitRegionSet, HitTarget, RegionId, RegionKind};
