#![forbid(unsafe_code)]

//! Dock error taxonomy and the bounded diagnostics ring.
//!
//! No dock error is fatal. The controller logs each one at `warn` and keeps
//! the most recent [`DIAGNOSTICS_CAPACITY`] for inspection.

use std::collections::VecDeque;
use std::fmt;

use crate::host::HostError;
use crate::store::StorageError;

/// Entries retained by [`Diagnostics`].
pub const DIAGNOSTICS_CAPACITY: usize = 32;

/// Recoverable failures surfaced by the dock controller.
#[derive(Debug)]
pub enum DockError {
    /// A reposition was requested while the surface is detached.
    NotAttached,
    /// The store could not accept a write; it is retried on the next save.
    StoreUnavailable,
    /// The host reported non-positive screen bounds.
    MalformedGeometry { width: i32, height: i32 },
    /// The host refused a request for another reason.
    HostRejected(String),
    /// The storage backend failed.
    Storage(StorageError),
}

impl fmt::Display for DockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAttached => write!(f, "surface is not attached"),
            Self::StoreUnavailable => write!(f, "position store unavailable, write deferred"),
            Self::MalformedGeometry { width, height } => {
                write!(f, "malformed screen geometry {width}x{height}")
            }
            Self::HostRejected(reason) => write!(f, "host rejected request: {reason}"),
            Self::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl std::error::Error for DockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for DockError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Unavailable => Self::StoreUnavailable,
            other => Self::Storage(other),
        }
    }
}

impl From<HostError> for DockError {
    fn from(e: HostError) -> Self {
        match e {
            HostError::NotAttached => Self::NotAttached,
            HostError::Rejected(reason) => Self::HostRejected(reason),
        }
    }
}

// ---------------------------------------------------------------------------
// Diagnostics ring
// ---------------------------------------------------------------------------

/// Most recent suppressed errors, oldest first.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: VecDeque<DockError>,
    total: u64,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `error` at warn level and retain it, evicting the oldest entry
    /// when full.
    pub fn record(&mut self, error: DockError) {
        tracing::warn!(error = %error, "dock error suppressed");
        if self.entries.len() == DIAGNOSTICS_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(error);
        self.total += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &DockError> {
        self.entries.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&DockError> {
        self.entries.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Errors recorded since construction, including evicted ones.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn unavailable_storage_maps_to_store_unavailable() {
        assert!(matches!(
            DockError::from(StorageError::Unavailable),
            DockError::StoreUnavailable
        ));
        assert!(matches!(
            DockError::from(StorageError::Serialization("bad".into())),
            DockError::Storage(_)
        ));
    }

    #[test]
    fn host_errors_map_one_to_one() {
        assert!(matches!(
            DockError::from(HostError::NotAttached),
            DockError::NotAttached
        ));
        assert!(matches!(
            DockError::from(HostError::Rejected("token".into())),
            DockError::HostRejected(r) if r == "token"
        ));
    }

    #[test]
    fn display_mentions_geometry() {
        let e = DockError::MalformedGeometry {
            width: 0,
            height: -3,
        };
        assert_eq!(e.to_string(), "malformed screen geometry 0x-3");
    }

    #[test]
    fn ring_evicts_oldest() {
        let mut diag = Diagnostics::new();
        diag.record(DockError::HostRejected("first".into()));
        for _ in 0..DIAGNOSTICS_CAPACITY {
            diag.record(DockError::NotAttached);
        }
        assert_eq!(diag.len(), DIAGNOSTICS_CAPACITY);
        assert_eq!(diag.total(), DIAGNOSTICS_CAPACITY as u64 + 1);
        assert!(diag.iter().all(|e| matches!(e, DockError::NotAttached)));
    }

    #[test]
    #[traced_test]
    fn record_logs_a_warning() {
        let mut diag = Diagnostics::new();
        diag.record(DockError::StoreUnavailable);
        assert!(logs_contain("dock error suppressed"));
        assert!(logs_contain("write deferred"));
    }
}
