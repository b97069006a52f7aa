use serde::{Deserialize, Serialize};

use model::pin::{Mode, Pin};
use model::sample::sample_pins;

/// The durable-storage entry name. One snapshot lives under this key
/// (localStorage) or at the path a [`FileStore`] is opened with.
pub const STORAGE_KEY: &str = "pinpoint-storage";

/// Exactly the persisted subset of store state: the pin collection and the
/// browsing mode. Selection, draft flags and picked coordinates are
/// transient and always reset to empty on load.
///
/// The JSON layout is the legacy flat-pin shape, so snapshots stay
/// backward-readable across versions that only add optional pin fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub pins: Vec<Pin>,
    #[serde(default)]
    pub mode: Mode,
}

impl Snapshot {
    /// The startup fallback: the built-in sample dataset, browsing past.
    pub fn sample() -> Self {
        Self {
            pins: sample_pins(),
            mode: Mode::Past,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    StorageUnavailable,
    Corrupt(String),
    Io(String),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::StorageUnavailable => write!(f, "durable storage unavailable"),
            PersistError::Corrupt(msg) => write!(f, "stored snapshot corrupt: {msg}"),
            PersistError::Io(msg) => write!(f, "snapshot storage error: {msg}"),
        }
    }
}

impl std::error::Error for PersistError {}

/// A durable slot holding at most one [`Snapshot`].
pub trait SnapshotStore {
    /// `Ok(None)` when no snapshot has ever been saved.
    fn load(&self) -> Result<Option<Snapshot>, PersistError>;
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError>;
    fn clear(&mut self) -> Result<(), PersistError>;
}

/// In-memory slot for tests and ephemeral sessions.
///
/// Stores the serialized JSON, not the typed value, so loads exercise the
/// same codec path as the durable backends.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Seeds the slot with arbitrary text, e.g. to simulate corruption.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Some(raw.into()),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, PersistError> {
        let Some(raw) = &self.slot else {
            return Ok(None);
        };
        serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| PersistError::Corrupt(e.to_string()))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
        let raw = serde_json::to_string(snapshot).map_err(|e| PersistError::Io(e.to_string()))?;
        self.slot = Some(raw);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        self.slot = None;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::{PersistError, Snapshot, SnapshotStore};

    /// One pretty-printed JSON snapshot at a fixed path.
    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl SnapshotStore for FileStore {
        fn load(&self) -> Result<Option<Snapshot>, PersistError> {
            let raw = match fs::read_to_string(&self.path) {
                Ok(raw) => raw,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(PersistError::Io(e.to_string())),
            };
            if raw.trim().is_empty() {
                return Ok(None);
            }
            serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| PersistError::Corrupt(e.to_string()))
        }

        fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
            let raw = serde_json::to_string_pretty(snapshot)
                .map_err(|e| PersistError::Io(e.to_string()))?;
            if let Some(parent) = self.path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).map_err(|e| PersistError::Io(e.to_string()))?;
            }
            fs::write(&self.path, raw).map_err(|e| PersistError::Io(e.to_string()))
        }

        fn clear(&mut self) -> Result<(), PersistError> {
            match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(PersistError::Io(e.to_string())),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{PersistError, Snapshot, SnapshotStore};

    /// One snapshot under a single namespaced localStorage key.
    #[derive(Debug)]
    pub struct LocalStorageStore {
        key: String,
    }

    impl LocalStorageStore {
        pub fn new(key: impl Into<String>) -> Self {
            Self { key: key.into() }
        }
    }

    impl SnapshotStore for LocalStorageStore {
        fn load(&self) -> Result<Option<Snapshot>, PersistError> {
            let storage = window_local_storage()?;
            let raw = storage
                .get_item(&self.key)
                .map_err(|e| PersistError::Io(format!("get_item failed: {:?}", e)))?;
            let Some(raw) = raw else {
                return Ok(None);
            };
            if raw.trim().is_empty() {
                return Ok(None);
            }
            serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| PersistError::Corrupt(e.to_string()))
        }

        fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistError> {
            let raw =
                serde_json::to_string(snapshot).map_err(|e| PersistError::Io(e.to_string()))?;
            let storage = window_local_storage()?;
            storage
                .set_item(&self.key, &raw)
                .map_err(|e| PersistError::Io(format!("set_item failed: {:?}", e)))
        }

        fn clear(&mut self) -> Result<(), PersistError> {
            let storage = window_local_storage()?;
            storage
                .remove_item(&self.key)
                .map_err(|e| PersistError::Io(format!("remove_item failed: {:?}", e)))
        }
    }

    fn window_local_storage() -> Result<web_sys::Storage, PersistError> {
        let win = web_sys::window().ok_or(PersistError::StorageUnavailable)?;
        win.local_storage()
            .map_err(|e| PersistError::Io(format!("localStorage error: {:?}", e)))?
            .ok_or(PersistError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::LocalStorageStore;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LocalStorageStore;

#[cfg(not(target_arch = "wasm32"))]
impl LocalStorageStore {
    pub fn new(_key: impl Into<String>) -> Self {
        Self
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SnapshotStore for LocalStorageStore {
    fn load(&self) -> Result<Option<Snapshot>, PersistError> {
        Err(PersistError::StorageUnavailable)
    }

    fn save(&mut self, _snapshot: &Snapshot) -> Result<(), PersistError> {
        Err(PersistError::StorageUnavailable)
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        Err(PersistError::StorageUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStore, PersistError, Snapshot, SnapshotStore};
    use model::pin::Mode;
    use pretty_assertions::assert_eq;

    #[test]
    fn memory_store_round_trips_the_sample_snapshot() {
        let mut store = MemoryStore::new();
        let original = Snapshot::sample();
        store.save(&original).unwrap();
        let restored = store.load().unwrap().unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn empty_slot_loads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn corrupt_payloads_surface_as_corrupt() {
        let store = MemoryStore::with_raw("{not json");
        assert!(matches!(store.load(), Err(PersistError::Corrupt(_))));
    }

    #[test]
    fn mode_field_defaults_to_past_for_legacy_snapshots() {
        let store = MemoryStore::with_raw(r#"{"pins": []}"#);
        let snap = store.load().unwrap().unwrap();
        assert_eq!(snap.mode, Mode::Past);
        assert!(snap.pins.is_empty());
    }

    #[test]
    fn clear_empties_the_slot() {
        let mut store = MemoryStore::new();
        store.save(&Snapshot::sample()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod file {
        use super::super::{FileStore, PersistError, Snapshot, SnapshotStore};
        use pretty_assertions::assert_eq;
        use std::path::PathBuf;

        fn scratch_path(name: &str) -> PathBuf {
            std::env::temp_dir().join(format!("pinpoint-test-{}-{name}.json", std::process::id()))
        }

        #[test]
        fn file_store_round_trips_and_clears() {
            let mut store = FileStore::new(scratch_path("roundtrip"));
            let original = Snapshot::sample();
            store.save(&original).unwrap();
            assert_eq!(store.load().unwrap().unwrap(), original);

            store.clear().unwrap();
            assert_eq!(store.load().unwrap(), None);
        }

        #[test]
        fn missing_file_loads_as_none() {
            let store = FileStore::new(scratch_path("missing"));
            assert_eq!(store.load().unwrap(), None);
        }

        #[test]
        fn garbage_on_disk_is_corrupt_not_a_panic() {
            let path = scratch_path("garbage");
            std::fs::write(&path, "]]]").unwrap();
            let mut store = FileStore::new(&path);
            assert!(matches!(store.load(), Err(PersistError::Corrupt(_))));
            store.clear().unwrap();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn local_storage_is_unavailable_off_wasm() {
        use super::LocalStorageStore;
        let store = LocalStorageStore::new(super::STORAGE_KEY);
        assert_eq!(store.load(), Err(PersistError::StorageUnavailable));
    }
}
