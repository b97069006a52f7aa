/// Change notification emitted by a committed store mutation.
///
/// Consumers (views, persistence) poll the feed with
/// [`ChangeFeed::drain`] after invoking mutations; there is no callback
/// registration, which keeps the store's lifecycle explicit and test
/// isolation trivial.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The pin collection changed (add, update, delete, complete-trip).
    PinsChanged,
    /// The browsing mode changed.
    ModeChanged,
    /// The selected pin changed (including to none).
    SelectionChanged,
    /// Pin-creation-in-progress was entered or exited.
    DraftChanged,
    /// The last-clicked globe coordinate changed.
    PickChanged,
}

#[derive(Debug, Default)]
pub struct ChangeFeed {
    events: Vec<StoreEvent>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: StoreEvent) {
        self.events.push(event);
    }

    /// Events recorded since the last drain, in mutation order.
    pub fn events(&self) -> &[StoreEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }
}
