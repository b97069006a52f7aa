use chrono::{NaiveDate, Utc};

use model::geo::LatLng;
use model::pin::{Memory, Mode, Pin, PinDetails, PinPatch};

use crate::events::{ChangeFeed, StoreEvent};

/// The single source of truth for the pin collection and cross-cutting
/// UI-selection state. Nothing else mutates pin data; views read snapshots
/// and invoke these operations.
///
/// Contract for mutations:
/// - synchronous and atomic with respect to each other (single-threaded
///   cooperative model, no partial-state reads);
/// - operations on a missing id are silent no-ops, returning `false` —
///   a stale UI reference is an expected race, not an error;
/// - each committed change is recorded on the change feed for consumers to
///   drain after the call.
///
/// Globe collaborator contract: render one marker per pin in
/// [`PinStore::visible_pins`]; on marker activation call [`PinStore::select`];
/// on an empty-area click at `(lat, lng)` call [`PinStore::set_picked`] to
/// hand the coordinate off to the pin-creation flow.
#[derive(Debug, Default)]
pub struct PinStore {
    mode: Mode,
    pins: Vec<Pin>,
    selected: Option<String>,
    drafting: bool,
    picked: Option<LatLng>,
    feed: ChangeFeed,
}

impl PinStore {
    /// An empty store browsing past pins.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with an existing collection, e.g. a restored snapshot.
    ///
    /// Pins with a duplicate id are dropped (first occurrence wins) so the
    /// id-uniqueness invariant holds even for hand-edited snapshots.
    pub fn with_pins(pins: Vec<Pin>, mode: Mode) -> Self {
        let mut store = Self {
            mode,
            ..Self::default()
        };
        for pin in pins {
            if store.find(&pin.id).is_none() {
                store.pins.push(pin);
            }
        }
        store
    }

    // ---- reads -------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The full collection, both modes intermixed, in insertion order.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Pins matching the current browsing mode, for list and globe views.
    pub fn visible_pins(&self) -> Vec<&Pin> {
        self.pins.iter().filter(|p| p.mode() == self.mode).collect()
    }

    pub fn find(&self, id: &str) -> Option<&Pin> {
        self.pins.iter().find(|p| p.id == id)
    }

    /// The pin shown in a detail view, or `None`.
    ///
    /// Selection is held by id and read through the collection, so an
    /// `update_pin` on the selected pin is visible here immediately.
    pub fn selected_pin(&self) -> Option<&Pin> {
        let id = self.selected.as_deref()?;
        self.find(id)
    }

    pub fn is_drafting(&self) -> bool {
        self.drafting
    }

    /// The last empty-area globe click, pending hand-off to a creation form.
    pub fn picked(&self) -> Option<LatLng> {
        self.picked
    }

    /// Changes recorded since the last drain.
    pub fn events(&self) -> &[StoreEvent] {
        self.feed.events()
    }

    pub fn drain_events(&mut self) -> Vec<StoreEvent> {
        self.feed.drain()
    }

    // ---- mutations ---------------------------------------------------

    /// Switches the browsing mode.
    ///
    /// Selection and creation flows are mode-scoped: switching abandons
    /// both rather than carrying them over.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.feed.emit(StoreEvent::ModeChanged);
        }
        self.clear_selection_silently_cancelling_draft();
    }

    /// Selects the pin with `id` for detail display.
    ///
    /// Selecting cancels any in-progress creation. Returns `false` (and
    /// changes nothing) if no pin has that id.
    pub fn select(&mut self, id: &str) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        if self.selected.as_deref() != Some(id) {
            self.selected = Some(id.to_string());
            self.feed.emit(StoreEvent::SelectionChanged);
        }
        self.stop_drafting();
        true
    }

    /// Clears the selection (also cancels any in-progress creation).
    pub fn clear_selection(&mut self) {
        self.clear_selection_silently_cancelling_draft();
    }

    /// Enters or exits pin-creation mode.
    ///
    /// Entering clears the selection; exiting does not restore a prior one.
    pub fn set_drafting(&mut self, drafting: bool) {
        if drafting && self.selected.is_some() {
            self.selected = None;
            self.feed.emit(StoreEvent::SelectionChanged);
        }
        if self.drafting != drafting {
            self.drafting = drafting;
            self.feed.emit(StoreEvent::DraftChanged);
        }
    }

    /// Records (or clears) the last coordinate picked on the globe.
    pub fn set_picked(&mut self, at: Option<LatLng>) {
        if self.picked != at {
            self.picked = at;
            self.feed.emit(StoreEvent::PickChanged);
        }
    }

    /// Appends a fully-formed pin.
    ///
    /// Silently rejected when the id duplicates an existing pin's (callers
    /// are expected to use the identifier generator). A successful add
    /// leaves pin-creation mode.
    pub fn add_pin(&mut self, pin: Pin) -> bool {
        if self.find(&pin.id).is_some() {
            return false;
        }
        self.pins.push(pin);
        self.feed.emit(StoreEvent::PinsChanged);
        self.stop_drafting();
        true
    }

    /// Merges `patch` into the pin with `id`. No-op on a missing id.
    ///
    /// If the pin is selected, detail views observe the merged value on
    /// their next read of [`PinStore::selected_pin`] — same-tick
    /// read-after-write consistency.
    pub fn update_pin(&mut self, id: &str, patch: &PinPatch) -> bool {
        let Some(pin) = self.pins.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        pin.apply(patch);
        self.feed.emit(StoreEvent::PinsChanged);
        true
    }

    /// Removes the pin with `id`, clearing the selection if it pointed
    /// at that pin. No-op on a missing id.
    pub fn delete_pin(&mut self, id: &str) -> bool {
        let before = self.pins.len();
        self.pins.retain(|p| p.id != id);
        if self.pins.len() == before {
            return false;
        }
        self.feed.emit(StoreEvent::PinsChanged);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
            self.feed.emit(StoreEvent::SelectionChanged);
        }
        true
    }

    /// Promotes a future pin into a past memory, using today's UTC date
    /// when the trip has no end date. See [`PinStore::complete_trip_on`].
    pub fn complete_trip(&mut self, id: &str) -> bool {
        self.complete_trip_on(id, Utc::now().date_naive())
    }

    /// The complete-trip transition with an explicit "today".
    ///
    /// The pin's `visited_date` becomes its `trip_end_date` when present,
    /// else `today`; the browsing mode switches to past so the promoted pin
    /// stays visible; a selection on the pin survives with refreshed data.
    /// One-way: a no-op on a missing id or an already-past pin.
    pub fn complete_trip_on(&mut self, id: &str, today: NaiveDate) -> bool {
        let Some(pin) = self.pins.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        let PinDetails::Future(trip) = &pin.details else {
            return false;
        };
        let visited = trip.trip_end_date.unwrap_or(today);
        pin.details = PinDetails::Past(Memory {
            visited_date: Some(visited),
            ..Memory::default()
        });
        self.feed.emit(StoreEvent::PinsChanged);
        if self.mode != Mode::Past {
            self.mode = Mode::Past;
            self.feed.emit(StoreEvent::ModeChanged);
        }
        true
    }

    fn clear_selection_silently_cancelling_draft(&mut self) {
        if self.selected.is_some() {
            self.selected = None;
            self.feed.emit(StoreEvent::SelectionChanged);
        }
        self.stop_drafting();
    }

    fn stop_drafting(&mut self) {
        if self.drafting {
            self.drafting = false;
            self.feed.emit(StoreEvent::DraftChanged);
        }
    }
}
