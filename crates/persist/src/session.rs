use chrono::NaiveDate;

use model::geo::LatLng;
use model::pin::{Mode, Pin, PinPatch};
use store::events::StoreEvent;
use store::store::PinStore;

use crate::snapshot::{PersistError, Snapshot, SnapshotStore};

/// A [`PinStore`] bound to a durable snapshot slot.
///
/// On open, a prior snapshot becomes the initial `pins`/`mode`; when it is
/// absent or corrupt the built-in sample dataset is used instead — a
/// persistence failure is never fatal to startup. After every mutation the
/// drained change feed decides whether `{pins, mode}` gets mirrored back;
/// selection, draft state and picked coordinates are never written.
///
/// A save failure surfaces to the caller of the mutation but does not roll
/// the in-memory state back; the next successful mutation writes the full
/// current snapshot anyway.
#[derive(Debug)]
pub struct Session<S: SnapshotStore> {
    store: PinStore,
    backend: S,
}

impl<S: SnapshotStore> Session<S> {
    pub fn open(backend: S) -> Self {
        let snapshot = match backend.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) | Err(_) => Snapshot::sample(),
        };
        Self {
            store: PinStore::with_pins(snapshot.pins, snapshot.mode),
            backend,
        }
    }

    /// Like [`Session::open`], but an empty slot starts empty instead of
    /// with the sample dataset. Corrupt slots still fall back.
    pub fn open_blank(backend: S) -> Self {
        let snapshot = match backend.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => Snapshot {
                pins: Vec::new(),
                mode: Mode::Past,
            },
            Err(_) => Snapshot::sample(),
        };
        Self {
            store: PinStore::with_pins(snapshot.pins, snapshot.mode),
            backend,
        }
    }

    pub fn store(&self) -> &PinStore {
        &self.store
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<(), PersistError> {
        self.store.set_mode(mode);
        self.commit()
    }

    pub fn select(&mut self, id: &str) -> Result<bool, PersistError> {
        let changed = self.store.select(id);
        self.commit().map(|()| changed)
    }

    pub fn clear_selection(&mut self) -> Result<(), PersistError> {
        self.store.clear_selection();
        self.commit()
    }

    pub fn set_drafting(&mut self, drafting: bool) -> Result<(), PersistError> {
        self.store.set_drafting(drafting);
        self.commit()
    }

    pub fn set_picked(&mut self, at: Option<LatLng>) -> Result<(), PersistError> {
        self.store.set_picked(at);
        self.commit()
    }

    pub fn add_pin(&mut self, pin: Pin) -> Result<bool, PersistError> {
        let added = self.store.add_pin(pin);
        self.commit().map(|()| added)
    }

    pub fn update_pin(&mut self, id: &str, patch: &PinPatch) -> Result<bool, PersistError> {
        let updated = self.store.update_pin(id, patch);
        self.commit().map(|()| updated)
    }

    pub fn delete_pin(&mut self, id: &str) -> Result<bool, PersistError> {
        let deleted = self.store.delete_pin(id);
        self.commit().map(|()| deleted)
    }

    pub fn complete_trip(&mut self, id: &str) -> Result<bool, PersistError> {
        let completed = self.store.complete_trip(id);
        self.commit().map(|()| completed)
    }

    pub fn complete_trip_on(&mut self, id: &str, today: NaiveDate) -> Result<bool, PersistError> {
        let completed = self.store.complete_trip_on(id, today);
        self.commit().map(|()| completed)
    }

    fn commit(&mut self) -> Result<(), PersistError> {
        let events = self.store.drain_events();
        let durable = events
            .iter()
            .any(|e| matches!(e, StoreEvent::PinsChanged | StoreEvent::ModeChanged));
        if !durable {
            return Ok(());
        }
        let snapshot = Snapshot {
            pins: self.store.pins().to_vec(),
            mode: self.store.mode(),
        };
        self.backend.save(&snapshot)
    }
}
