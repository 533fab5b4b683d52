#![forbid(unsafe_code)]

//! Top-level error model and recovery mapping.
//!
//! Each FloatDock crate owns its typed error. This module unifies them for
//! hosts that want one `?`-friendly type, and maps every variant to the
//! [`RecoveryAction`] the controller takes when the same failure happens
//! inside an event handler.
//!
//! # Invariants
//!
//! 1. Every [`Error`] variant maps to exactly one [`RecoveryAction`].
//! 2. Only [`RecoveryAction::Abort`] is unrecoverable.

use std::fmt;

use fdock_runtime::{DockError, PolicyConfigError, StorageError};

// ── Unified Error ───────────────────────────────────────────────────────

/// Top-level error type for FloatDock hosts.
#[derive(Debug)]
pub enum Error {
    /// Controller-level failure.
    Dock(DockError),
    /// Persistence backend failure.
    Storage(StorageError),
    /// Policy file could not be loaded or failed validation.
    Policy(PolicyConfigError),
    /// The logging subscriber could not be installed.
    Logging(String),
    /// Raw I/O failure outside a storage backend.
    Io(std::io::Error),
}

/// Standard result type for FloatDock APIs.
pub type Result<T> = std::result::Result<T, Error>;

// ── Recovery ────────────────────────────────────────────────────────────

/// What the dock does to stay usable after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoveryAction {
    /// Keep the in-memory state and skip the host request.
    SkipReposition,
    /// Keep the value pending and retry the write later.
    DeferWrite,
    /// Keep the previous screen bounds and position.
    KeepPosition,
    /// Fall back to built-in defaults.
    UseDefaults,
    /// Nothing to recover; carry on without the failed facility.
    Continue,
    /// Cannot continue.
    Abort,
}

impl Error {
    /// Recovery the controller applies for this error.
    #[must_use]
    pub fn recovery(&self) -> RecoveryAction {
        match self {
            Self::Dock(err) => dock_recovery(err),
            Self::Storage(err) => storage_recovery(err),
            Self::Policy(_) => RecoveryAction::UseDefaults,
            Self::Logging(_) => RecoveryAction::Continue,
            Self::Io(_) => RecoveryAction::Abort,
        }
    }

    /// Short stable name for structured logs.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Dock(_) => "dock",
            Self::Storage(_) => "storage",
            Self::Policy(_) => "policy",
            Self::Logging(_) => "logging",
            Self::Io(_) => "io",
        }
    }

    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.recovery() != RecoveryAction::Abort
    }
}

fn dock_recovery(err: &DockError) -> RecoveryAction {
    match err {
        DockError::NotAttached | DockError::HostRejected(_) => RecoveryAction::SkipReposition,
        DockError::StoreUnavailable => RecoveryAction::DeferWrite,
        DockError::MalformedGeometry { .. } => RecoveryAction::KeepPosition,
        DockError::Storage(inner) => storage_recovery(inner),
    }
}

fn storage_recovery(err: &StorageError) -> RecoveryAction {
    match err {
        StorageError::Unavailable => RecoveryAction::DeferWrite,
        StorageError::Io(_) | StorageError::Serialization(_) => RecoveryAction::UseDefaults,
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dock(err) => write!(f, "dock: {err}"),
            Self::Storage(err) => write!(f, "storage: {err}"),
            Self::Policy(err) => write!(f, "policy: {err}"),
            Self::Logging(msg) => write!(f, "logging: {msg}"),
            Self::Io(err) => write!(f, "io: {err}"),
        }
    }
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkipReposition => write!(f, "skip_reposition"),
            Self::DeferWrite => write!(f, "defer_write"),
            Self::KeepPosition => write!(f, "keep_position"),
            Self::UseDefaults => write!(f, "use_defaults"),
            Self::Continue => write!(f, "continue"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dock(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Policy(err) => Some(err),
            Self::Logging(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<DockError> for Error {
    fn from(err: DockError) -> Self {
        Self::Dock(err)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<PolicyConfigError> for Error {
    fn from(err: PolicyConfigError) -> Self {
        Self::Policy(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;

    #[test]
    fn not_attached_skips_reposition() {
        let err = Error::from(DockError::NotAttached);
        assert_eq!(err.recovery(), RecoveryAction::SkipReposition);
        assert!(err.is_recoverable());
        assert_eq!(err.error_type(), "dock");
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn unavailable_store_defers_at_either_layer() {
        assert_eq!(
            Error::from(DockError::StoreUnavailable).recovery(),
            RecoveryAction::DeferWrite
        );
        assert_eq!(
            Error::from(StorageError::Unavailable).recovery(),
            RecoveryAction::DeferWrite
        );
        assert_eq!(
            Error::from(DockError::Storage(StorageError::Unavailable)).recovery(),
            RecoveryAction::DeferWrite
        );
    }

    #[test]
    fn malformed_geometry_keeps_position() {
        let err = Error::from(DockError::MalformedGeometry {
            width: 0,
            height: -3,
        });
        assert_eq!(err.recovery(), RecoveryAction::KeepPosition);
        assert!(err.to_string().contains("0x-3"));
    }

    #[test]
    fn corrupt_store_uses_defaults() {
        let err = Error::from(StorageError::Serialization("bad version".into()));
        assert_eq!(err.recovery(), RecoveryAction::UseDefaults);
        assert!(err.to_string().starts_with("storage: "));
    }

    #[test]
    fn policy_validation_uses_defaults() {
        let err = Error::from(PolicyConfigError::Validation(vec!["opacity".into()]));
        assert_eq!(err.recovery(), RecoveryAction::UseDefaults);
        assert_eq!(err.error_type(), "policy");
    }

    #[test]
    fn raw_io_aborts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(io);
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn logging_has_no_source() {
        let err = Error::Logging("already set".into());
        assert!(StdError::source(&err).is_none());
        assert_eq!(err.recovery(), RecoveryAction::Continue);
    }

    #[test]
    fn recovery_action_display() {
        assert_eq!(RecoveryAction::DeferWrite.to_string(), "defer_write");
        assert_eq!(RecoveryAction::Abort.to_string(), "abort");
    }
}
