//! Persistence boundary: a single named key-value slot per cart.
//!
//! The slot holds the JSON-serialized cart sequence. It is read once at service
//! startup and overwritten wholesale on every successful commit.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

/// Fixed slot key, namespace-qualified so it cannot collide with unrelated
/// application state sharing the same store.
pub const STORAGE_KEY: &str = "cart-system:cart";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable key-value slot. Both calls are synchronous; the commit path treats a
/// failed `save` as log-and-continue, so implementations need no retry logic.
pub trait CartStore: Send + Sync {
    /// Reads the slot. `Ok(None)` when the key has never been written.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrites the slot wholesale.
    fn save(&self, key: &str, snapshot: &str) -> Result<(), StoreError>;
}

/// Volatile store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw slot contents, for asserting what a commit actually persisted.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.lock().unwrap().get(key).cloned()
    }
}

impl CartStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.lock().unwrap().get(key).cloned())
    }

    fn save(&self, key: &str, snapshot: &str) -> Result<(), StoreError> {
        self.slots
            .lock()
            .unwrap()
            .insert(key.to_string(), snapshot.to_string());
        Ok(())
    }
}

/// Store keeping one JSON file per key under a root directory, so the cart
/// survives process restarts the way a browser cart survives reloads.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens the store, creating the root directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl CartStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, snapshot: &str) -> Result<(), StoreError> {
        fs::write(self.path(key), snapshot)?;
        Ok(())
    }
}
