#![forbid(unsafe_code)]

//! Expanded/collapsed state of the dock.

use std::fmt;

/// Whether the dock shows its shortcut icons or only the toggle handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DockState {
    #[default]
    Expanded,
    Collapsed,
}

impl DockState {
    /// Both states, for iteration.
    pub const ALL: [DockState; 2] = [DockState::Expanded, DockState::Collapsed];

    /// The opposite state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_collapsed(self) -> bool {
        matches!(self, Self::Collapsed)
    }

    /// Decode the persisted boolean flag.
    #[inline]
    #[must_use]
    pub const fn from_collapsed(collapsed: bool) -> Self {
        if collapsed {
            Self::Collapsed
        } else {
            Self::Expanded
        }
    }
}

impl fmt::Display for DockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expanded => f.write_str("expanded"),
            Self::Collapsed => f.write_str("collapsed"),
        }
    }
}
