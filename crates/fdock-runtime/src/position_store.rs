#![forbid(unsafe_code)]

//! Position store adapter.
//!
//! Maps the dock's position and dock state onto three scalar keys of a
//! [`StorageBackend`].
//!
//! # Invariants
//!
//! 1. Read-after-write: after `save(p)`, `load()` returns `p` within the
//!    same process whether or not the backend accepted the write.
//! 2. A write the backend refuses stays pending and is retried by the next
//!    `save`, `save_dock_state` or `flush_pending`. Newer values replace
//!    older pending ones (last write wins).
//! 3. x and y are always written in the same batch.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Backend unavailable | `DockError::StoreUnavailable`, write deferred |
//! | Backend I/O error | `DockError::Storage`, write deferred |
//! | Read error or absent key | Default value, logged |

use fdock_core::dock_state::DockState;
use fdock_core::geometry::SurfacePosition;

use crate::error::DockError;
use crate::store::{StorageBackend, StoredValue};

/// Position used when nothing has been persisted yet.
pub const DEFAULT_POSITION: SurfacePosition = SurfacePosition::new(100, 100);

/// Key names for the persisted scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
    pub pos_x: String,
    pub pos_y: String,
    pub dock_state: String,
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self {
            pos_x: "floating_x".into(),
            pos_y: "floating_y".into(),
            dock_state: "floating_minimized".into(),
        }
    }
}

/// Persists dock position and state with deferred retry.
#[derive(Debug)]
pub struct PositionStore<S> {
    backend: S,
    keys: StoreKeys,
    default_position: SurfacePosition,
    pending_position: Option<SurfacePosition>,
    pending_state: Option<DockState>,
}

impl<S: StorageBackend> PositionStore<S> {
    #[must_use]
    pub fn new(backend: S, keys: StoreKeys, default_position: SurfacePosition) -> Self {
        Self {
            backend,
            keys,
            default_position,
            pending_position: None,
            pending_state: None,
        }
    }

    /// Last saved position, or the default for each absent coordinate.
    #[must_use]
    pub fn load(&self) -> SurfacePosition {
        if let Some(pending) = self.pending_position {
            return pending;
        }
        SurfacePosition::new(
            self.read_int(&self.keys.pos_x, self.default_position.x),
            self.read_int(&self.keys.pos_y, self.default_position.y),
        )
    }

    /// Persist `position`, flushing any other deferred write with it.
    pub fn save(&mut self, position: SurfacePosition) -> Result<(), DockError> {
        self.pending_position = Some(position);
        self.flush_pending()
    }

    /// Last saved dock state, [`DockState::Expanded`] when absent.
    #[must_use]
    pub fn load_dock_state(&self) -> DockState {
        if let Some(pending) = self.pending_state {
            return pending;
        }
        match self.backend.get_bool(&self.keys.dock_state) {
            Ok(Some(collapsed)) => DockState::from_collapsed(collapsed),
            Ok(None) => DockState::default(),
            Err(err) => {
                tracing::warn!(key = %self.keys.dock_state, error = %err, "dock state read failed");
                DockState::default()
            }
        }
    }

    pub fn save_dock_state(&mut self, state: DockState) -> Result<(), DockError> {
        self.pending_state = Some(state);
        self.flush_pending()
    }

    /// Retry deferred writes. A no-op when nothing is pending.
    pub fn flush_pending(&mut self) -> Result<(), DockError> {
        if !self.has_pending() {
            return Ok(());
        }
        if !self.backend.is_available() {
            tracing::debug!(backend = self.backend.name(), "store unavailable, write deferred");
            return Err(DockError::StoreUnavailable);
        }

        let mut batch: Vec<(&str, StoredValue)> = Vec::with_capacity(3);
        if let Some(pos) = self.pending_position {
            batch.push((self.keys.pos_x.as_str(), StoredValue::Int(pos.x)));
            batch.push((self.keys.pos_y.as_str(), StoredValue::Int(pos.y)));
        }
        if let Some(state) = self.pending_state {
            batch.push((self.keys.dock_state.as_str(), StoredValue::Bool(state.is_collapsed())));
        }

        self.backend.put_batch(&batch)?;
        tracing::debug!(
            backend = self.backend.name(),
            entries = batch.len(),
            "dock state persisted"
        );
        self.pending_position = None;
        self.pending_state = None;
        Ok(())
    }

    /// Whether a write is waiting for the backend.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_position.is_some() || self.pending_state.is_some()
    }

    #[must_use]
    pub fn keys(&self) -> &StoreKeys {
        &self.keys
    }

    #[must_use]
    pub fn default_position(&self) -> SurfacePosition {
        self.default_position
    }

    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    fn read_int(&self, key: &str, default: i32) -> i32 {
        match self.backend.get_int(key) {
            Ok(Some(v)) => v,
            Ok(None) => default,
            Err(err) => {
                tracing::warn!(key, error = %err, "position read failed");
                default
            }
        }
    }
}
