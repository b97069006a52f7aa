//! Contracts for the store's external collaborators.
//!
//! Geocoding and photo import run off the store's critical path: they
//! prepare data on their own time and then call a single store mutation
//! (`add_pin` / `update_pin`) with the final payload. A late-arriving
//! result still applies through normal update semantics; last write wins
//! by call order.

use std::path::Path;

use model::geo::LatLng;
use model::pin::Photo;

/// Best-effort place name for a coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub city: String,
    pub country: String,
}

/// Reverse-geocoding collaborator.
///
/// `None` means "leave the fields blank for manual entry" — lookup failure
/// is never an error and never reaches store state.
pub trait Geocoder {
    fn reverse(&self, at: LatLng) -> Option<Place>;
}

/// A geocoder that never resolves; useful in tests and offline builds.
#[derive(Debug, Default)]
pub struct NullGeocoder;

impl Geocoder for NullGeocoder {
    fn reverse(&self, _at: LatLng) -> Option<Place> {
        None
    }
}

/// Photo-import collaborator: turns local image files into [`Photo`]
/// records (caption defaulted from the filename, date taken defaulted to
/// today). Unreadable files are skipped, not reported; the caller passes
/// the resulting full list through `update_pin`.
pub trait PhotoSource {
    fn import(&self, files: &[&Path]) -> Vec<Photo>;
}
