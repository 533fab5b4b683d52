#![forbid(unsafe_code)]

//! Vertical stack layout for the dock surface.
//!
//! Produces the surface size and the hit regions for one dock state:
//!
//! ```text
//! ┌──────────────┐  ← surface padding (0 when there are no shortcuts)
//! │   [toggle]   │  ← glyph + control padding on every side
//! │   [icon 0]   │
//! │   spacing    │
//! │   [icon 1]   │  ← icons hidden while collapsed
//! └──────────────┘
//! ```
//!
//! Every child is centered horizontally within the content column. The
//! whole surface is one non-clickable body region so any press that misses
//! a child starts a drag.

use fdock_core::density::Density;
use fdock_core::dock_state::DockState;
use fdock_core::geometry::{Rect, Size};
use fdock_core::hit_region::{HitRegion, HitRegionSet, RegionId};

/// Region id of the expand/collapse control.
pub const TOGGLE_CONTROL_ID: &str = "minimize-control";
/// Region id of the draggable background.
pub const BODY_ID: &str = "body";

const SHORTCUT_PREFIX: &str = "shortcut:";

/// Region id for a shortcut icon.
#[must_use]
pub fn shortcut_region_id(shortcut: &str) -> RegionId {
    RegionId::new(format!("{SHORTCUT_PREFIX}{shortcut}"))
}

/// Recover the shortcut name from a region id produced by
/// [`shortcut_region_id`].
#[must_use]
pub fn shortcut_of(region: &RegionId) -> Option<&str> {
    region.as_str().strip_prefix(SHORTCUT_PREFIX)
}

/// Appearance settings in density-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackAppearance {
    pub icon_size_dp: u32,
    pub icon_spacing_dp: u32,
    pub surface_padding_dp: u32,
    pub control_padding_dp: u32,
    pub control_glyph_dp: u32,
    /// Surface opacity in `0.0..=1.0`, applied by the host.
    pub opacity: f32,
    /// Shortcuts beyond this count are not laid out.
    pub max_shortcuts: usize,
}

impl Default for StackAppearance {
    fn default() -> Self {
        Self {
            icon_size_dp: 48,
            icon_spacing_dp: 8,
            surface_padding_dp: 8,
            control_padding_dp: 12,
            control_glyph_dp: 24,
            opacity: 1.0,
            max_shortcuts: 4,
        }
    }
}

/// Measured surface and its regions for one dock state.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceLayout {
    pub size: Size,
    pub regions: HitRegionSet,
    pub opacity: f32,
    /// Shortcut names that received an icon, in display order.
    pub visible_shortcuts: Vec<String>,
}

/// Lay out the toggle control and shortcut icons as a vertical column.
#[must_use]
pub fn layout_stack(
    appearance: &StackAppearance,
    density: Density,
    shortcuts: &[String],
    state: DockState,
) -> SurfaceLayout {
    let pad = if shortcuts.is_empty() {
        0
    } else {
        density.dp_to_px(appearance.surface_padding_dp)
    };
    let control = density.dp_to_px(appearance.control_glyph_dp)
        + 2 * density.dp_to_px(appearance.control_padding_dp);
    let icon = density.dp_to_px(appearance.icon_size_dp);
    let spacing = density.dp_to_px(appearance.icon_spacing_dp);

    let visible: Vec<String> = if state.is_collapsed() {
        Vec::new()
    } else {
        shortcuts
            .iter()
            .take(appearance.max_shortcuts)
            .cloned()
            .collect()
    };

    let count = visible.len() as i32;
    let column_height = if count == 0 {
        0
    } else {
        count * icon + (count - 1) * spacing
    };
    let content_width = if count == 0 { control } else { control.max(icon) };
    let size = Size::new(
        content_width + 2 * pad,
        pad + control + column_height + pad,
    );

    let mut regions = HitRegionSet::new().with(HitRegion::control(
        TOGGLE_CONTROL_ID,
        Rect::new(pad + (content_width - control) / 2, pad, control, control),
    ));
    let icon_x = pad + (content_width - icon) / 2;
    for (i, name) in visible.iter().enumerate() {
        let y = pad + control + i as i32 * (icon + spacing);
        regions.insert(HitRegion::control(
            shortcut_region_id(name),
            Rect::new(icon_x, y, icon, icon),
        ));
    }
    regions.insert(HitRegion::body(BODY_ID, Rect::from_size(size), false));

    SurfaceLayout {
        size,
        regions,
        opacity: appearance.opacity.clamp(0.0, 1.0),
        visible_shortcuts: visible,
    }
}
