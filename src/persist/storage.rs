//! Storage abstraction for the persisted record streams
//!
//! ## Implementations
//!
//! - `LocalStorage`: production (std::fs, one file per collection)
//! - `InMemoryStorage`: unit and integration tests
//!
//! Reads distinguish "file absent" (`Ok(None)`, non-fatal - the collection
//! keeps its default) from "file unreadable" (`Err`, advisory). Writes
//! truncate and fully rewrite; there is no append path.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::codec::CodecError;

/// Error type for persistence operations
#[derive(Debug)]
pub enum PersistError {
    /// File could not be opened, read, or written
    Io(std::io::Error),
    /// File exists, is non-empty, and does not decode - a hard error,
    /// distinct from absence
    Corrupt {
        file: &'static str,
        source: CodecError,
    },
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "persistence I/O error: {}", e),
            PersistError::Corrupt { file, source } => {
                write!(f, "corrupt record stream in {}: {}", file, source)
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Corrupt { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        PersistError::Io(e)
    }
}

/// Whole-file storage for record streams, keyed by file name.
pub trait Storage {
    /// Read an entire file. `Ok(None)` means the file does not exist.
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, PersistError>;

    /// Truncate and fully rewrite a file.
    fn write(&self, name: &str, data: &[u8]) -> Result<(), PersistError>;

    fn exists(&self, name: &str) -> bool;
}

// ============================================================================
// LocalStorage - production
// ============================================================================

/// Local filesystem storage. Creates the directory on construction.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: PathBuf) -> Result<Self, PersistError> {
        std::fs::create_dir_all(&dir)?;
        Ok(LocalStorage { dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl Storage for LocalStorage {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, PersistError> {
        match std::fs::read(self.file_path(name)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistError::Io(e)),
        }
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<(), PersistError> {
        std::fs::write(self.file_path(name), data).map_err(PersistError::Io)
    }

    fn exists(&self, name: &str) -> bool {
        self.file_path(name).exists()
    }
}

// ============================================================================
// InMemoryStorage - for tests
// ============================================================================

/// In-memory storage backed by a shared map. Clones see the same files,
/// which lets a test save through one handle and load through another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage::default()
    }

    /// Overwrite a file with arbitrary bytes (for corruption tests).
    pub fn inject(&self, name: &str, data: Vec<u8>) {
        let mut files = self.files.lock().expect("storage mutex poisoned");
        files.insert(name.to_string(), data);
    }

    /// Remove a file, simulating a fresh or partially-populated data dir.
    pub fn remove(&self, name: &str) {
        let mut files = self.files.lock().expect("storage mutex poisoned");
        files.remove(name);
    }
}

impl Storage for InMemoryStorage {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, PersistError> {
        let files = self.files.lock().expect("storage mutex poisoned");
        Ok(files.get(name).cloned())
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<(), PersistError> {
        let mut files = self.files.lock().expect("storage mutex poisoned");
        files.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        let files = self.files.lock().expect("storage mutex poisoned");
        files.contains_key(name)
    }
}
