#![forbid(unsafe_code)]

//! Named sub-areas of the dock surface used for tap target resolution.
//!
//! A [`HitRegionSet`] holds two tiers of regions:
//!
//! - **Controls**: interactive children (the collapse toggle, shortcut
//!   icons). A tap on a control is reported as a click on that control.
//! - **Bodies**: the draggable background. A tap on a body is only
//!   reported when the body is marked clickable.
//!
//! Controls are always hit-tested before bodies, so a press landing on a
//! control that sits inside the body's bounding box resolves to the control.

use std::fmt;

use crate::geometry::Rect;

/// Opaque identifier for a hit region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(String);

impl RegionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Hit-testing tier of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Interactive child, tested first.
    Control,
    /// Draggable background.
    Body { clickable: bool },
}

/// A named rectangle relative to the surface's top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub id: RegionId,
    pub bounds: Rect,
    pub kind: RegionKind,
}

impl HitRegion {
    /// An interactive child region.
    #[must_use]
    pub fn control(id: impl Into<RegionId>, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            bounds,
            kind: RegionKind::Control,
        }
    }

    /// A draggable background region.
    #[must_use]
    pub fn body(id: impl Into<RegionId>, bounds: Rect, clickable: bool) -> Self {
        Self {
            id: id.into(),
            bounds,
            kind: RegionKind::Body { clickable },
        }
    }

    #[inline]
    #[must_use]
    pub fn is_control(&self) -> bool {
        matches!(self.kind, RegionKind::Control)
    }
}

/// Result of hit-testing a surface-local point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Control(RegionId),
    Body { id: RegionId, clickable: bool },
}

impl HitTarget {
    #[must_use]
    pub fn id(&self) -> &RegionId {
        match self {
            Self::Control(id) | Self::Body { id, .. } => id,
        }
    }
}

/// Ordered collection of hit regions for one dock state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitRegionSet {
    regions: Vec<HitRegion>,
}

impl HitRegionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, region: HitRegion) -> Self {
        self.insert(region);
        self
    }

    /// Insert a region, replacing any existing region with the same id.
    pub fn insert(&mut self, region: HitRegion) {
        if let Some(existing) = self.regions.iter_mut().find(|r| r.id == region.id) {
            *existing = region;
        } else {
            self.regions.push(region);
        }
    }

    /// Remove a region by id.
    pub fn remove(&mut self, id: &RegionId) -> Option<HitRegion> {
        let idx = self.regions.iter().position(|r| &r.id == id)?;
        Some(self.regions.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: &RegionId) -> Option<&HitRegion> {
        self.regions.iter().find(|r| &r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitRegion> {
        self.regions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Resolve the region under a surface-local point.
    ///
    /// Controls win over bodies; within a tier the first inserted region wins.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<HitTarget> {
        let control = self
            .regions
            .iter()
            .filter(|r| r.is_control())
            .find(|r| r.bounds.contains(x, y));
        if let Some(region) = control {
            return Some(HitTarget::Control(region.id.clone()));
        }

        self.regions.iter().find_map(|r| match r.kind {
            RegionKind::Body { clickable } if r.bounds.contains(x, y) => Some(HitTarget::Body {
                id: r.id.clone(),
                clickable,
            }),
            _ => None,
        })
    }
}
