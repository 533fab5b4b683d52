#![forbid(unsafe_code)]

//! FloatDock test harness.
//!
//! # Key Components
//!
//! - [`SimulatedHost`] - In-memory window host that records every request
//! - [`GestureScript`] - Builder for ordered pointer sequences
//! - [`generate_storm`] - Seeded pointer storms for stress tests
//! - [`DockFixture`] - Ready-to-drive controllers with a persisted start
//!
//! # Role in FloatDock
//! The harness is test-only infrastructure. It lets integration tests drive
//! a real `DockController` without an overlay window or a device store.

pub mod determinism;
pub mod host;
pub mod pointer_storm;
pub mod script;

pub use determinism::{DockFixture, SimController, fixture_seed, surface_rect};
pub use host::{HostCall, SimulatedHost};
pub use pointer_storm::{PointerStorm, StormConfig, StormPattern, generate_storm};
pub use script::GestureScript;
