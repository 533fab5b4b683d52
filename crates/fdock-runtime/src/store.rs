#![forbid(unsafe_code)]

//! Scalar key/value storage backends.
//!
//! The dock persists three scalars (x, y, collapsed) under caller-supplied
//! keys. A backend only has to store integers and booleans; batching lets a
//! position be written as one unit so a reader never observes a new x with
//! an old y.
//!
//! # Backends
//!
//! - [`MemoryStorage`]: in-process map, always compiled. Can be switched to
//!   unavailable to exercise deferred writes.
//! - [`FileStorage`]: JSON file with temp-file-then-rename writes. Requires
//!   the `state-persistence` feature.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `Unavailable` | Backend not ready | Caller defers the write |
//! | `Io` | Disk read/write error | Returned to caller, nothing applied |
//! | `Serialization` | Corrupt file or type mismatch | Returned to caller |

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "state-persistence")]
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Values and errors
// ---------------------------------------------------------------------------

/// A stored scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "state-persistence", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "state-persistence", serde(untagged))]
pub enum StoredValue {
    Int(i32),
    Bool(bool),
}

impl StoredValue {
    #[must_use]
    pub const fn as_int(self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(v),
            Self::Bool(_) => None,
        }
    }

    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(v),
            Self::Int(_) => None,
        }
    }
}

/// Errors from a storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// The backend cannot accept reads or writes right now.
    Unavailable,
    /// I/O failure.
    Io(std::io::Error),
    /// Encoding or decoding failure.
    Serialization(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Serialization(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Unavailable | Self::Serialization(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

// ---------------------------------------------------------------------------
// Backend trait
// ---------------------------------------------------------------------------

/// A persistent scalar store.
pub trait StorageBackend {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Whether reads and writes are currently possible.
    fn is_available(&self) -> bool {
        true
    }

    /// Read one value. Absent keys are `Ok(None)`.
    fn get(&self, key: &str) -> StorageResult<Option<StoredValue>>;

    /// Write all entries as one unit. On error nothing is applied.
    fn put_batch(&mut self, entries: &[(&str, StoredValue)]) -> StorageResult<()>;

    fn get_int(&self, key: &str) -> StorageResult<Option<i32>> {
        Ok(self.get(key)?.and_then(StoredValue::as_int))
    }

    fn get_bool(&self, key: &str) -> StorageResult<Option<bool>> {
        Ok(self.get(key)?.and_then(StoredValue::as_bool))
    }

    fn set_int(&mut self, key: &str, value: i32) -> StorageResult<()> {
        self.put_batch(&[(key, StoredValue::Int(value))])
    }

    fn set_bool(&mut self, key: &str, value: bool) -> StorageResult<()> {
        self.put_batch(&[(key, StoredValue::Bool(value))])
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn get(&self, key: &str) -> StorageResult<Option<StoredValue>> {
        (**self).get(key)
    }

    fn put_batch(&mut self, entries: &[(&str, StoredValue)]) -> StorageResult<()> {
        (**self).put_batch(entries)
    }
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// In-memory backend.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    entries: BTreeMap<String, StoredValue>,
    available: bool,
    writes: u64,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            available: true,
            writes: 0,
        }
    }

    /// Toggle availability; while unavailable every call fails with
    /// [`StorageError::Unavailable`].
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Number of successful batches written.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn get(&self, key: &str) -> StorageResult<Option<StoredValue>> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        Ok(self.entries.get(key).copied())
    }

    fn put_batch(&mut self, entries: &[(&str, StoredValue)]) -> StorageResult<()> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        for (key, value) in entries {
            self.entries.insert((*key).to_owned(), *value);
        }
        self.writes += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

#[cfg(feature = "state-persistence")]
pub use file::FileStorage;

#[cfg(feature = "state-persistence")]
mod file {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use serde::{Deserialize, Serialize};

    use super::{StorageBackend, StorageError, StorageResult, StoredValue};

    const FORMAT_VERSION: u64 = 1;

    #[derive(Debug, Serialize, Deserialize)]
    struct StoreFile {
        version: u64,
        entries: BTreeMap<String, StoredValue>,
    }

    /// JSON file backend.
    ///
    /// The file is read once on [`open`](FileStorage::open) and rewritten in
    /// full on every batch.
    #[derive(Debug)]
    pub struct FileStorage {
        path: PathBuf,
        entries: BTreeMap<String, StoredValue>,
    }

    impl FileStorage {
        /// Open or create a store at `path`.
        ///
        /// A missing file yields an empty store. The parent directory must
        /// exist before the first write.
        pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
            let path = path.as_ref().to_path_buf();
            let entries = if path.exists() {
                let contents = std::fs::read_to_string(&path)?;
                let file: StoreFile = serde_json::from_str(&contents)
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                if file.version != FORMAT_VERSION {
                    return Err(StorageError::Serialization(format!(
                        "unsupported store version: {} (expected {FORMAT_VERSION})",
                        file.version
                    )));
                }
                file.entries
            } else {
                BTreeMap::new()
            };
            tracing::debug!(path = %path.display(), keys = entries.len(), "file store opened");
            Ok(Self { path, entries })
        }

        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn write_out(&self, entries: &BTreeMap<String, StoredValue>) -> StorageResult<()> {
            let file = StoreFile {
                version: FORMAT_VERSION,
                entries: entries.clone(),
            };
            let json = serde_json::to_string_pretty(&file)
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            let temp = self.path.with_extension("json.tmp");
            std::fs::write(&temp, json)?;
            std::fs::rename(&temp, &self.path)?;
            Ok(())
        }
    }

    impl StorageBackend for FileStorage {
        fn name(&self) -> &str {
            "file"
        }

        fn get(&self, key: &str) -> StorageResult<Option<StoredValue>> {
            Ok(self.entries.get(key).copied())
        }

        fn put_batch(&mut self, entries: &[(&str, StoredValue)]) -> StorageResult<()> {
            let mut next = self.entries.clone();
            for (key, value) in entries {
                next.insert((*key).to_owned(), *value);
            }
            self.write_out(&next)?;
            self.entries = next;
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(all(test, feature = "state-persistence"))]
mod file_tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStorage::open(dir.path().join("dock.json")).unwrap();
        assert_eq!(store.get_int("floating_x").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dock.json");
        {
            let mut store = FileStorage::open(&path).unwrap();
            store
                .put_batch(&[
                    ("floating_x", StoredValue::Int(-12)),
                    ("floating_minimized", StoredValue::Bool(true)),
                ])
                .unwrap();
        }
        let store = FileStorage::open(&path).unwrap();
        assert_eq!(store.get_int("floating_x").unwrap(), Some(-12));
        assert_eq!(store.get_bool("floating_minimized").unwrap(), Some(true));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dock.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            FileStorage::open(&path),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dock.json");
        std::fs::write(&path, r#"{"version":9,"entries":{}}"#).unwrap();
        let err = FileStorage::open(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported store version"));
    }

    #[test]
    fn failed_write_leaves_cache_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("dock.json");
        let mut store = FileStorage::open(&path).unwrap();
        assert!(matches!(store.set_int("x", 1), Err(StorageError::Io(_))));
        assert_eq!(store.get_int("x").unwrap(), None);
    }
}
