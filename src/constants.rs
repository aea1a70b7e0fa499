//! Centralized constants for the advanced-maps crate
//!
//! Values shared by more than one module live here.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (WGS84 approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Nominatim usage policy allows at most one request per second
    pub const NOMINATIM_MIN_INTERVAL_MS: u64 = 1000;

    /// Public OSRM demo server
    pub const OSRM_URL: &str = "https://router.project-osrm.org";

    /// User agent sent to public services (Nominatim rejects anonymous clients)
    pub const USER_AGENT: &str = concat!("advanced-maps/", env!("CARGO_PKG_VERSION"));
}

/// Search workflow settings
pub mod search {
    /// Quiet interval before a keystroke burst counts as settled
    pub const DEFAULT_QUIET_MS: u64 = 500;

    /// Title of the pin placed at a route's origin
    pub const START_PIN_TITLE: &str = "Starting Point";

    /// Title of the pin placed at a route's destination
    pub const END_PIN_TITLE: &str = "Ending Point";
}
