#![forbid(unsafe_code)]

//! Placement and surface layout for the dock.
//!
//! - [`placement`]: where the surface rests after a drag or a rotation.
//! - [`stack`]: how appearance settings turn into a surface size and hit
//!   regions for each dock state.

pub mod placement;
pub mod stack;

pub use placement::{DockSide, PlacementConfig, PlacementEngine};
pub use stack::{
    BODY_ID, StackAppearance, SurfaceLayout, TOGGLE_CONTROL_ID, layout_stack, shortcut_of,
    shortcut_region_id,
};
