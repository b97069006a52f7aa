use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Past/future classification, applied both to individual pins and to the
/// global browsing filter.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Past,
    Future,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Past => write!(f, "past"),
            Mode::Future => write!(f, "future"),
        }
    }
}

/// One photo attached to a past memory.
///
/// `url` is an opaque image reference: a remote URL or an inline `data:`
/// payload. The model never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<NaiveDate>,
}

/// A single to-do entry on a future trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub done: bool,
}

/// An ordered stop on a future trip's planned route.
///
/// Display order is given by `order`, not by array position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteWaypoint {
    pub id: String,
    pub name: String,
    pub order: i32,
}

/// Past-mode payload.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visited_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Photo>,
}

/// Future-mode payload.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub waypoints: Vec<RouteWaypoint>,
}

impl Trip {
    /// Waypoints sorted by their `order` field.
    ///
    /// Ordering contract:
    /// - ascending `order`;
    /// - ties broken by insertion position (the sort is stable).
    pub fn waypoints_in_order(&self) -> Vec<&RouteWaypoint> {
        let mut out: Vec<&RouteWaypoint> = self.waypoints.iter().collect();
        out.sort_by_key(|w| w.order);
        out
    }

    /// `(done, total)` over the checklist, for progress display.
    pub fn checklist_progress(&self) -> (usize, usize) {
        let done = self.checklist.iter().filter(|i| i.done).count();
        (done, self.checklist.len())
    }
}

/// Mode-specific payload, tagged on `mode`.
///
/// Serialized flattened into the parent [`Pin`], so the wire shape stays the
/// flat object older snapshots used; wrong-mode fields in legacy input are
/// ignored on read and dropped on the next write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum PinDetails {
    #[serde(rename = "past")]
    Past(Memory),
    #[serde(rename = "future")]
    Future(Trip),
}

impl PinDetails {
    pub fn mode(&self) -> Mode {
        match self {
            PinDetails::Past(_) => Mode::Past,
            PinDetails::Future(_) => Mode::Future,
        }
    }

    pub fn as_memory(&self) -> Option<&Memory> {
        match self {
            PinDetails::Past(m) => Some(m),
            PinDetails::Future(_) => None,
        }
    }

    pub fn as_trip(&self) -> Option<&Trip> {
        match self {
            PinDetails::Past(_) => None,
            PinDetails::Future(t) => Some(t),
        }
    }
}

/// One saved geographic point of interest.
///
/// Invariants (upheld by the store, not by this type):
/// - `id` is unique across the collection and immutable after creation;
/// - `details` flips from `Future` to `Past` at most once, via the
///   complete-trip transition;
/// - sub-record ids are unique within their parent pin only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub city: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub details: PinDetails,
}

impl Pin {
    /// A past-memory pin with an empty payload.
    pub fn past(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self::new(id, lat, lng, PinDetails::Past(Memory::default()))
    }

    /// A future-trip pin with an empty payload.
    pub fn future(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self::new(id, lat, lng, PinDetails::Future(Trip::default()))
    }

    fn new(id: impl Into<String>, lat: f64, lng: f64, details: PinDetails) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            city: String::new(),
            country: String::new(),
            title: None,
            details,
        }
    }

    pub fn with_place(mut self, city: impl Into<String>, country: impl Into<String>) -> Self {
        self.city = city.into();
        self.country = country.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_details(mut self, details: PinDetails) -> Self {
        self.details = details;
        self
    }

    pub fn mode(&self) -> Mode {
        self.details.mode()
    }

    pub fn location(&self) -> crate::geo::LatLng {
        crate::geo::LatLng::new(self.lat, self.lng)
    }

    /// Display label: `title`, falling back to `city` when absent.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.city)
    }

    /// Merges a partial-field patch into this pin.
    ///
    /// `Some` fields replace, `None` fields leave the current value alone;
    /// applying the same patch twice is the same as applying it once.
    /// Payload fields for the other mode are ignored (this shape cannot
    /// represent them), matching the contract that wrong-mode fields are
    /// never read.
    pub fn apply(&mut self, patch: &PinPatch) {
        if let Some(lat) = patch.lat {
            self.lat = lat;
        }
        if let Some(lng) = patch.lng {
            self.lng = lng;
        }
        if let Some(city) = &patch.city {
            self.city = city.clone();
        }
        if let Some(country) = &patch.country {
            self.country = country.clone();
        }
        if let Some(title) = &patch.title {
            self.title = Some(title.clone());
        }
        match &mut self.details {
            PinDetails::Past(memory) => {
                if let Some(date) = patch.visited_date {
                    memory.visited_date = Some(date);
                }
                if let Some(note) = &patch.memory_note {
                    memory.memory_note = Some(note.clone());
                }
                if let Some(photos) = &patch.photos {
                    memory.photos = photos.clone();
                }
            }
            PinDetails::Future(trip) => {
                if let Some(date) = patch.trip_start_date {
                    trip.trip_start_date = Some(date);
                }
                if let Some(date) = patch.trip_end_date {
                    trip.trip_end_date = Some(date);
                }
                if let Some(notes) = &patch.trip_notes {
                    trip.trip_notes = Some(notes.clone());
                }
                if let Some(checklist) = &patch.checklist {
                    trip.checklist = checklist.clone();
                }
                if let Some(waypoints) = &patch.waypoints {
                    trip.waypoints = waypoints.clone();
                }
            }
        }
    }
}

/// Partial-field update for [`Pin::apply`]. `None` means "leave unchanged".
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PinPatch {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub title: Option<String>,
    // Past payload
    pub visited_date: Option<NaiveDate>,
    pub memory_note: Option<String>,
    pub photos: Option<Vec<Photo>>,
    // Future payload
    pub trip_start_date: Option<NaiveDate>,
    pub trip_end_date: Option<NaiveDate>,
    pub trip_notes: Option<String>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub waypoints: Option<Vec<RouteWaypoint>>,
}

impl PinPatch {
    pub fn memory_note(note: impl Into<String>) -> Self {
        Self {
            memory_note: Some(note.into()),
            ..Self::default()
        }
    }

    pub fn trip_notes(notes: impl Into<String>) -> Self {
        Self {
            trip_notes: Some(notes.into()),
            ..Self::default()
        }
    }

    pub fn checklist(items: Vec<ChecklistItem>) -> Self {
        Self {
            checklist: Some(items),
            ..Self::default()
        }
    }

    pub fn place(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            country: Some(country.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChecklistItem, Memory, Mode, Pin, PinDetails, PinPatch, RouteWaypoint, Trip};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn waypoint(id: &str, name: &str, order: i32) -> RouteWaypoint {
        RouteWaypoint {
            id: id.to_string(),
            name: name.to_string(),
            order,
        }
    }

    #[test]
    fn display_title_falls_back_to_city() {
        let pin = Pin::past("a", 48.85, 2.35).with_place("Paris", "France");
        assert_eq!(pin.display_title(), "Paris");
        let pin = pin.with_title("The Parisian Dream");
        assert_eq!(pin.display_title(), "The Parisian Dream");
    }

    #[test]
    fn waypoints_sort_by_order_field_not_array_position() {
        let trip = Trip {
            waypoints: vec![
                waypoint("w3", "teamLab Planets", 3),
                waypoint("w1", "Shinjuku Gyoen", 1),
                waypoint("w2", "Senso-ji Temple", 2),
            ],
            ..Trip::default()
        };
        let names: Vec<&str> = trip
            .waypoints_in_order()
            .iter()
            .map(|w| w.name.as_str())
            .collect();
        assert_eq!(names, vec!["Shinjuku Gyoen", "Senso-ji Temple", "teamLab Planets"]);
    }

    #[test]
    fn waypoint_order_ties_keep_insertion_position() {
        let trip = Trip {
            waypoints: vec![
                waypoint("a", "first", 1),
                waypoint("b", "also first", 1),
                waypoint("c", "second", 2),
            ],
            ..Trip::default()
        };
        let ids: Vec<&str> = trip.waypoints_in_order().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn patch_application_is_idempotent() {
        let mut once = Pin::past("a", 0.0, 0.0).with_place("Kyoto", "Japan");
        let patch = PinPatch {
            memory_note: Some("Golden Pavilion at sunset".to_string()),
            visited_date: Some(date("2022-11-10")),
            title: Some("Ancient Kyoto".to_string()),
            ..PinPatch::default()
        };
        once.apply(&patch);
        let mut twice = once.clone();
        twice.apply(&patch);
        assert_eq!(once, twice);
    }

    #[test]
    fn wrong_mode_patch_fields_are_ignored() {
        let mut pin = Pin::past("a", 0.0, 0.0);
        pin.apply(&PinPatch {
            trip_notes: Some("never shown".to_string()),
            checklist: Some(vec![ChecklistItem {
                id: "c1".to_string(),
                text: "x".to_string(),
                done: false,
            }]),
            ..PinPatch::default()
        });
        assert_eq!(pin.details, PinDetails::Past(Memory::default()));
    }

    #[test]
    fn checklist_progress_counts_done_items() {
        let trip = Trip {
            checklist: vec![
                ChecklistItem { id: "1".into(), text: "Book flights".into(), done: true },
                ChecklistItem { id: "2".into(), text: "Get JR Pass".into(), done: false },
            ],
            ..Trip::default()
        };
        assert_eq!(trip.checklist_progress(), (1, 2));
    }

    #[test]
    fn pin_serializes_to_the_flat_legacy_shape() {
        let pin = Pin::past("paris-2023", 48.8566, 2.3522)
            .with_place("Paris", "France")
            .with_details(PinDetails::Past(Memory {
                visited_date: Some(date("2023-05-14")),
                memory_note: None,
                photos: Vec::new(),
            }));
        let json = serde_json::to_value(&pin).unwrap();
        assert_eq!(json["mode"], "past");
        assert_eq!(json["visitedDate"], "2023-05-14");
        assert_eq!(json["city"], "Paris");
        // No nested payload object.
        assert!(json.get("details").is_none());
    }

    #[test]
    fn legacy_flat_json_with_wrong_mode_fields_still_parses() {
        // A snapshot written by an older version could carry a checklist on
        // a past pin; it was never read there and is dropped on parse.
        let json = r#"{
            "id": "a", "lat": 1.0, "lng": 2.0,
            "city": "Oslo", "country": "Norway",
            "mode": "past",
            "memoryNote": "fjords",
            "checklist": [{"id": "c", "text": "stale", "done": false}]
        }"#;
        let pin: Pin = serde_json::from_str(json).unwrap();
        assert_eq!(pin.mode(), Mode::Past);
        let memory = pin.details.as_memory().unwrap();
        assert_eq!(memory.memory_note.as_deref(), Some("fjords"));
    }

    #[test]
    fn mode_round_trips_as_lowercase_strings() {
        assert_eq!(serde_json::to_string(&Mode::Future).unwrap(), "\"future\"");
        assert_eq!(serde_json::from_str::<Mode>("\"past\"").unwrap(), Mode::Past);
        assert_eq!(Mode::Future.to_string(), "future");
    }
}
