#![forbid(unsafe_code)]

//! FloatDock Runtime
//!
//! This crate ties the gesture classifier and the placement engine to the
//! outside world: a window host that moves the surface and a key/value
//! store that remembers where it rests.
//!
//! # Key Components
//!
//! - [`DockController`] - Owns the gesture session, position and dock state
//! - [`WindowHost`] - Trait for the overlay window the dock lives in
//! - [`PositionStore`] - Persists position and dock state with deferred retry
//! - [`StorageBackend`] - Scalar key/value store ([`MemoryStorage`], `FileStorage`)
//! - [`DockPolicy`] - Policy-as-data configuration
//! - [`DockError`] / [`Diagnostics`] - Recoverable failures and their ring
//!
//! # Role in FloatDock
//! `fdock-runtime` is the orchestrator. It consumes pointer events and
//! geometry changes from the host, drives `fdock-core`'s classifier,
//! asks `fdock-layout` where to rest, and writes the result back to the
//! host and the store.

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod position_store;
pub mod store;

pub use config::{
    AppearancePolicy, DockPolicy, GesturePolicy, PlacementPolicy, PolicyConfigError, StorePolicy,
};
pub use controller::{ClickHandler, DockController, DockControllerConfig};
pub use error::{DIAGNOSTICS_CAPACITY, Diagnostics, DockError};
pub use host::{HostError, WindowHost};
pub use position_store::{DEFAULT_POSITION, PositionStore, StoreKeys};
#[cfg(feature = "state-persistence")]
pub use store::FileStorage;
pub use store::{MemoryStorage, StorageBackend, StorageError, StorageResult, StoredValue};
