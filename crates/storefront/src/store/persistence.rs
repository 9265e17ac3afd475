//! Write-through persistence for store snapshots.
//!
//! Each store owns one named slot ("cart", "favorites") holding its full
//! serialized state, rewritten wholesale on every mutation and read once
//! at store initialization. Snapshots travel inside a versioned envelope;
//! anything unreadable (missing slot, corrupt JSON, unknown version) loads
//! as empty state, never as an error, so a broken snapshot can never block
//! startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Current snapshot envelope version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Slot name for the cart store.
pub const CART_SLOT: &str = "cart";

/// Slot name for the favorites store.
pub const FAVORITES_SLOT: &str = "favorites";

/// Errors a storage backend can report.
///
/// Callers never see these: the [`Storage`] wrapper logs and swallows
/// them, falling back to defaults.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A durable key-value slot per store, synchronous from the caller's
/// point of view.
pub trait StorageBackend: Send + Sync {
    /// Overwrite the named slot with the given serialized snapshot.
    ///
    /// The write must be atomic at the slot level: a reader sees either
    /// the previous snapshot or the new one, never a torn mix.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the underlying storage rejects the
    /// write.
    fn save(&self, slot: &str, snapshot: &str) -> Result<(), PersistenceError>;

    /// Read the named slot, `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the slot exists but cannot be read.
    fn load(&self, slot: &str) -> Result<Option<String>, PersistenceError>;
}

/// Versioned wrapper around every persisted snapshot.
#[derive(Debug, Serialize, serde::Deserialize)]
struct Envelope<T> {
    version: u32,
    state: T,
}

/// Handle the stores persist through.
///
/// Cheap to clone; wraps a shared backend and applies the envelope and
/// the swallow-on-failure policy.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn StorageBackend>,
}

impl Storage {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Convenience constructor for an in-memory engine (tests, previews).
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }

    /// Convenience constructor for the on-disk engine.
    #[must_use]
    pub fn on_disk(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileStorage::new(dir)))
    }

    /// Write a store's full state to its slot.
    ///
    /// A failed write is logged and swallowed: a cart mutation must not
    /// fail because the disk did.
    pub fn save<T: Serialize>(&self, slot: &str, state: &T) {
        let envelope = Envelope {
            version: SNAPSHOT_VERSION,
            state,
        };
        let result = serde_json::to_string(&envelope)
            .map_err(PersistenceError::from)
            .and_then(|json| self.backend.save(slot, &json));
        match result {
            Ok(()) => debug!(slot, "snapshot written"),
            Err(error) => warn!(slot, %error, "snapshot write failed, state kept in memory"),
        }
    }

    /// Read a store's state from its slot, defaulting on any failure.
    ///
    /// A missing slot is the normal first-run case; a corrupt snapshot or
    /// an unknown envelope version is treated as "no prior state".
    #[must_use]
    pub fn load<T: DeserializeOwned + Default>(&self, slot: &str) -> T {
        let raw = match self.backend.load(slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(error) => {
                warn!(slot, %error, "snapshot unreadable, starting empty");
                return T::default();
            }
        };
        match serde_json::from_str::<Envelope<T>>(&raw) {
            Ok(envelope) if envelope.version == SNAPSHOT_VERSION => {
                debug!(slot, "snapshot restored");
                envelope.state
            }
            Ok(envelope) => {
                warn!(
                    slot,
                    version = envelope.version,
                    "unknown snapshot version, starting empty"
                );
                T::default()
            }
            Err(error) => {
                warn!(slot, %error, "corrupt snapshot discarded, starting empty");
                T::default()
            }
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

// =============================================================================
// Backends
// =============================================================================

/// One JSON file per slot under a data directory.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-write leaves the previous snapshot intact. Two processes sharing a
/// directory race with last-write-wins; there is no cross-process merge.
#[derive(Debug)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Create a backend rooted at the given directory.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl StorageBackend for JsonFileStorage {
    fn save(&self, slot: &str, snapshot: &str) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(slot);
        let tmp = self.dir.join(format!("{slot}.json.tmp"));
        std::fs::write(&tmp, snapshot)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        match std::fs::read_to_string(self.slot_path(slot)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Peek at a slot's raw contents (test helper).
    #[must_use]
    pub fn raw(&self, slot: &str) -> Option<String> {
        self.slots
            .lock()
            .map(|slots| slots.get(slot).cloned())
            .unwrap_or_default()
    }
}

impl StorageBackend for MemoryStorage {
    fn save(&self, slot: &str, snapshot: &str) -> Result<(), PersistenceError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| std::io::Error::other("storage mutex poisoned"))?;
        slots.insert(slot.to_string(), snapshot.to_string());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<String>, PersistenceError> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| std::io::Error::other("storage mutex poisoned"))?;
        Ok(slots.get(slot).cloned())
    }
}

/// Check whether a data directory is usable for the on-disk backend.
///
/// Purely advisory: the backend itself degrades gracefully, this lets
/// startup log a single clear warning instead of one per mutation.
#[must_use]
pub fn probe_data_dir(dir: &Path) -> bool {
    if dir.exists() {
        return dir.is_dir();
    }
    std::fs::create_dir_all(dir).is_ok()
}
