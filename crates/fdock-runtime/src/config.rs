#![forbid(unsafe_code)]

//! Policy-as-data configuration for the dock.
//!
//! Every tunable the controller needs lives in one [`DockPolicy`] that can
//! be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # floatdock.toml
//! [gesture]
//! touch_slop_px = 12.0
//!
//! [appearance]
//! icon_size_dp = 56
//! opacity = 0.8
//! max_shortcuts = 3
//! ```
//!
//! ```rust,ignore
//! let policy = DockPolicy::from_toml_file("floatdock.toml")?;
//! let errors = policy.validate();
//! ```
//!
//! # Defaults
//!
//! `DockPolicy::default()` reproduces the built-in constants of each
//! component, so an empty file yields the stock dock.

#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "policy-config")]
use serde::{Deserialize, Serialize};

use fdock_core::density::Density;
use fdock_core::geometry::SurfacePosition;
use fdock_core::gesture::{DEFAULT_TOUCH_SLOP, GestureConfig};
use fdock_layout::{PlacementConfig, StackAppearance};

use crate::position_store::{DEFAULT_POSITION, StoreKeys};

/// Allowed range for `appearance.max_shortcuts`.
pub const MAX_SHORTCUTS_RANGE: std::ops::RangeInclusive<usize> = 2..=4;
/// Allowed range for `appearance.icon_size_dp`.
pub const ICON_SIZE_DP_RANGE: std::ops::RangeInclusive<u32> = 32..=64;
/// Lowest accepted surface opacity.
pub const MIN_OPACITY: f32 = 0.2;

// ---------------------------------------------------------------------------
// Top-level DockPolicy
// ---------------------------------------------------------------------------

/// All dock tunables, grouped by component.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct DockPolicy {
    pub gesture: GesturePolicy,
    pub placement: PlacementPolicy,
    pub appearance: AppearancePolicy,
    pub store: StorePolicy,
}

impl DockPolicy {
    /// Load from a TOML string. The result is [validated](Self::validated).
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PolicyConfigError> {
        toml::from_str::<Self>(s)
            .map_err(PolicyConfigError::Toml)?
            .validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PolicyConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string. The result is [validated](Self::validated).
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, PolicyConfigError> {
        serde_json::from_str::<Self>(s)
            .map_err(PolicyConfigError::Json)?
            .validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PolicyConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Return the policy if [`validate`](Self::validate) finds nothing,
    /// otherwise every problem as [`PolicyConfigError::Validation`].
    pub fn validated(self) -> Result<Self, PolicyConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PolicyConfigError::Validation(errors))
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the policy
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let slop = self.gesture.touch_slop_px;
        if !slop.is_finite() || slop <= 0.0 {
            errors.push(format!("gesture.touch_slop_px must be > 0, got {slop}"));
        }

        let a = &self.appearance;
        if !ICON_SIZE_DP_RANGE.contains(&a.icon_size_dp) {
            errors.push(format!(
                "appearance.icon_size_dp must be in {}..={}, got {}",
                ICON_SIZE_DP_RANGE.start(),
                ICON_SIZE_DP_RANGE.end(),
                a.icon_size_dp
            ));
        }
        if !(MIN_OPACITY..=1.0).contains(&a.opacity) {
            errors.push(format!(
                "appearance.opacity must be in {MIN_OPACITY}..=1.0, got {}",
                a.opacity
            ));
        }
        if !MAX_SHORTCUTS_RANGE.contains(&a.max_shortcuts) {
            errors.push(format!(
                "appearance.max_shortcuts must be in {}..={}, got {}",
                MAX_SHORTCUTS_RANGE.start(),
                MAX_SHORTCUTS_RANGE.end(),
                a.max_shortcuts
            ));
        }
        if a.control_glyph_dp == 0 {
            errors.push("appearance.control_glyph_dp must be > 0".into());
        }

        let s = &self.store;
        for (name, key) in [
            ("store.pos_x_key", &s.pos_x_key),
            ("store.pos_y_key", &s.pos_y_key),
            ("store.dock_state_key", &s.dock_state_key),
        ] {
            if key.trim().is_empty() {
                errors.push(format!("{name} must not be empty"));
            }
        }
        if s.pos_x_key == s.pos_y_key
            || s.pos_x_key == s.dock_state_key
            || s.pos_y_key == s.dock_state_key
        {
            errors.push("store keys must be distinct".into());
        }

        errors
    }

    /// Build a [`GestureConfig`] from this policy.
    #[must_use]
    pub fn to_gesture_config(&self) -> GestureConfig {
        GestureConfig {
            touch_slop: self.gesture.touch_slop_px,
        }
    }

    /// Build a [`PlacementConfig`] with the padding converted to pixels.
    #[must_use]
    pub fn to_placement_config(&self, density: Density) -> PlacementConfig {
        PlacementConfig {
            dock_padding: density.dp_to_px(self.placement.dock_padding_dp),
        }
    }

    /// Build the [`StackAppearance`] used by the stack layout.
    #[must_use]
    pub fn to_stack_appearance(&self) -> StackAppearance {
        let a = &self.appearance;
        StackAppearance {
            icon_size_dp: a.icon_size_dp,
            icon_spacing_dp: a.icon_spacing_dp,
            surface_padding_dp: a.surface_padding_dp,
            control_padding_dp: a.control_padding_dp,
            control_glyph_dp: a.control_glyph_dp,
            opacity: a.opacity,
            max_shortcuts: a.max_shortcuts,
        }
    }

    #[must_use]
    pub fn to_store_keys(&self) -> StoreKeys {
        StoreKeys {
            pos_x: self.store.pos_x_key.clone(),
            pos_y: self.store.pos_y_key.clone(),
            dock_state: self.store.dock_state_key.clone(),
        }
    }

    #[must_use]
    pub fn default_position(&self) -> SurfacePosition {
        SurfacePosition::new(self.placement.default_x, self.placement.default_y)
    }
}

// ---------------------------------------------------------------------------
// Sub-policies (flat, serde-friendly)
// ---------------------------------------------------------------------------

/// Gesture classifier parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct GesturePolicy {
    /// Movement (px, per axis) that turns a press into a drag. Default: 8.0.
    pub touch_slop_px: f32,
}

impl Default for GesturePolicy {
    fn default() -> Self {
        Self {
            touch_slop_px: DEFAULT_TOUCH_SLOP,
        }
    }
}

/// Placement engine parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct PlacementPolicy {
    /// Gap between a docked surface and the screen edge. Default: 0.
    pub dock_padding_dp: u32,
    /// Position used before anything is persisted. Default: (100, 100).
    pub default_x: i32,
    pub default_y: i32,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            dock_padding_dp: 0,
            default_x: DEFAULT_POSITION.x,
            default_y: DEFAULT_POSITION.y,
        }
    }
}

/// Stack appearance parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct AppearancePolicy {
    /// Default: 48.
    pub icon_size_dp: u32,
    /// Default: 8.
    pub icon_spacing_dp: u32,
    /// Default: 8.
    pub surface_padding_dp: u32,
    /// Default: 12.
    pub control_padding_dp: u32,
    /// Default: 24.
    pub control_glyph_dp: u32,
    /// Default: 1.0.
    pub opacity: f32,
    /// Default: 4.
    pub max_shortcuts: usize,
}

impl Default for AppearancePolicy {
    fn default() -> Self {
        let d = StackAppearance::default();
        Self {
            icon_size_dp: d.icon_size_dp,
            icon_spacing_dp: d.icon_spacing_dp,
            surface_padding_dp: d.surface_padding_dp,
            control_padding_dp: d.control_padding_dp,
            control_glyph_dp: d.control_glyph_dp,
            opacity: d.opacity,
            max_shortcuts: d.max_shortcuts,
        }
    }
}

/// Key names in the persistent store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct StorePolicy {
    pub pos_x_key: String,
    pub pos_y_key: String,
    pub dock_state_key: String,
}

impl Default for StorePolicy {
    fn default() -> Self {
        let keys = StoreKeys::default();
        Self {
            pos_x_key: keys.pos_x,
            pos_y_key: keys.pos_y,
            dock_state_key: keys.dock_state,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a dock policy.
#[derive(Debug)]
pub enum PolicyConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "policy-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "policy-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for PolicyConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for PolicyConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_component_defaults() {
        let policy = DockPolicy::default();
        assert_eq!(policy.to_gesture_config(), GestureConfig::default());
        assert_eq!(policy.to_stack_appearance(), StackAppearance::default());
        assert_eq!(policy.to_store_keys(), StoreKeys::default());
        assert_eq!(policy.default_position(), DEFAULT_POSITION);
        assert_eq!(
            policy.to_placement_config(Density::BASELINE),
            PlacementConfig::default()
        );
    }

    #[test]
    fn default_validates_clean() {
        let errors = DockPolicy::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn validate_catches_bad_slop() {
        let mut policy = DockPolicy::default();
        policy.gesture.touch_slop_px = 0.0;
        assert!(policy.validate().iter().any(|e| e.contains("touch_slop_px")));
        policy.gesture.touch_slop_px = f32::NAN;
        assert!(policy.validate().iter().any(|e| e.contains("touch_slop_px")));
    }

    #[test]
    fn validate_catches_shortcut_capacity() {
        let mut policy = DockPolicy::default();
        policy.appearance.max_shortcuts = 5;
        assert!(policy.validate().iter().any(|e| e.contains("max_shortcuts")));
        policy.appearance.max_shortcuts = 1;
        assert!(policy.validate().iter().any(|e| e.contains("max_shortcuts")));
    }

    #[test]
    fn validate_catches_opacity_and_icon_size() {
        let mut policy = DockPolicy::default();
        policy.appearance.opacity = 0.1;
        policy.appearance.icon_size_dp = 100;
        let errors = policy.validate();
        assert!(errors.iter().any(|e| e.contains("opacity")));
        assert!(errors.iter().any(|e| e.contains("icon_size_dp")));
    }

    #[test]
    fn validate_catches_duplicate_keys() {
        let mut policy = DockPolicy::default();
        policy.store.pos_y_key = policy.store.pos_x_key.clone();
        assert!(policy.validate().iter().any(|e| e.contains("distinct")));
    }

    #[test]
    fn padding_scales_with_density() {
        let mut policy = DockPolicy::default();
        policy.placement.dock_padding_dp = 6;
        assert_eq!(
            policy.to_placement_config(Density::new(2.5)).dock_padding,
            15
        );
    }

    #[test]
    fn validation_error_display_joins() {
        let e = PolicyConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(e.to_string(), "validation errors: a; b");
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn partial_toml_keeps_other_defaults() {
        let policy = DockPolicy::from_toml_str(
            r#"
            [gesture]
            touch_slop_px = 12.0

            [appearance]
            max_shortcuts = 3
            "#,
        )
        .unwrap();
        assert_eq!(policy.gesture.touch_slop_px, 12.0);
        assert_eq!(policy.appearance.max_shortcuts, 3);
        assert_eq!(policy.appearance.icon_size_dp, 48);
        assert_eq!(policy.store, StorePolicy::default());
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn json_round_trip() {
        let mut policy = DockPolicy::default();
        policy.placement.dock_padding_dp = 4;
        let json = serde_json::to_string(&policy).unwrap();
        assert_eq!(DockPolicy::from_json_str(&json).unwrap(), policy);
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = DockPolicy::from_toml_str("gesture = 3").unwrap_err();
        assert!(matches!(err, PolicyConfigError::Toml(_)));
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn negative_slop_is_rejected_at_load() {
        let err = DockPolicy::from_toml_str("[gesture]\ntouch_slop_px = -1.0\n").unwrap_err();
        match err {
            PolicyConfigError::Validation(errors) => {
                assert_eq!(errors.len(), 1, "{errors:?}");
                assert!(errors[0].contains("touch_slop_px"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn oversized_icons_are_rejected_from_json() {
        let err = DockPolicy::from_json_str(r#"{"appearance":{"icon_size_dp":2000000000}}"#)
            .unwrap_err();
        assert!(matches!(err, PolicyConfigError::Validation(ref e) if e.len() == 1));
    }

    #[test]
    fn validated_passes_defaults_through() {
        assert_eq!(DockPolicy::default().validated().unwrap(), DockPolicy::default());
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = DockPolicy::from_toml_file(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, PolicyConfigError::Io(_)));
    }
}
