//! Places and place search
//!
//! Coordinates, viewport regions, search results, and the gateways that turn
//! free text into located places.

pub mod memory;
pub mod nominatim;

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Great-circle distance in meters (haversine)
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlng = (other.lng - self.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
    }
}

impl std::str::FromStr for Coordinates {
    type Err = Error;

    /// Parse "lat,lng"
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s.split_once(',').ok_or_else(|| {
            Error::InvalidCoordinates(format!("Expected \"lat,lng\", got: {}", s))
        })?;
        let lat: f64 = lat.trim().parse().map_err(|_| {
            Error::InvalidCoordinates(format!("Invalid latitude: {}", lat))
        })?;
        let lng: f64 = lng.trim().parse().map_err(|_| {
            Error::InvalidCoordinates(format!("Invalid longitude: {}", lng))
        })?;
        let coords = Self::new(lat, lng);
        coords.validate()?;
        Ok(coords)
    }
}

/// A visible map viewport, used as a search hint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center: Coordinates,
    /// Full north-south extent in degrees
    pub lat_delta: f64,
    /// Full east-west extent in degrees
    pub lng_delta: f64,
}

impl Region {
    pub fn new(center: Coordinates, lat_delta: f64, lng_delta: f64) -> Self {
        Self {
            center,
            lat_delta,
            lng_delta,
        }
    }

    /// Validate the center and that both spans are finite and positive
    pub fn validate(&self) -> Result<()> {
        self.center.validate()?;
        for (axis, delta) in [("Latitude", self.lat_delta), ("Longitude", self.lng_delta)] {
            if !delta.is_finite() || delta <= 0.0 {
                return Err(Error::InvalidCoordinates(format!(
                    "{} span {} must be finite and positive",
                    axis, delta
                )));
            }
        }
        Ok(())
    }

    /// Bounds as (south, west, north, east)
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let half_lat = self.lat_delta / 2.0;
        let half_lng = self.lng_delta / 2.0;
        (
            self.center.lat - half_lat,
            self.center.lng - half_lng,
            self.center.lat + half_lat,
            self.center.lng + half_lng,
        )
    }

    /// Whether a coordinate falls inside the viewport (edges included)
    pub fn contains(&self, coord: &Coordinates) -> bool {
        let (south, west, north, east) = self.bounds();
        coord.lat >= south && coord.lat <= north && coord.lng >= west && coord.lng <= east
    }
}

/// Structured address parts of a place, each optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrative_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedItem {
    pub name: String,
    pub coordinate: Coordinates,
    #[serde(default)]
    pub components: PlaceComponents,
    /// Derived from `components` with [`format_address`]
    pub address: String,
}

impl LocatedItem {
    pub fn new(name: impl Into<String>, coordinate: Coordinates, components: PlaceComponents) -> Self {
        let address = format_address(&components);
        Self {
            name: name.into(),
            coordinate,
            components,
            address,
        }
    }
}

/// Build a single-line address from place components
///
/// Components are joined in a fixed order. Absent (or blank) components are
/// skipped together with their separator, so the result never starts or ends
/// with punctuation. Returns an empty string when nothing is present.
pub fn format_address(components: &PlaceComponents) -> String {
    // (value, separator placed before the next present component)
    let parts = [
        (&components.street_number, " "),
        (&components.street, ", "),
        (&components.postal_code, " "),
        (&components.locality, ", "),
        (&components.administrative_area, " "),
        (&components.country, ""),
    ];

    let mut address = String::new();
    let mut pending_separator = "";
    for (value, separator) in parts {
        let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        address.push_str(pending_separator);
        address.push_str(value);
        pending_separator = separator;
    }
    address
}

/// Trait for place search backends
pub trait SearchGateway: Send + Sync {
    /// Backend name as used in config
    fn name(&self) -> &'static str;

    /// Resolve a free-text query into places, optionally biased to a region
    ///
    /// Completions of concurrent calls may arrive in any order.
    fn search(
        &self,
        query: &str,
        region: Option<Region>,
    ) -> impl std::future::Future<Output = Result<Vec<LocatedItem>>> + Send;
}

/// Information about a search backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayInfo {
    pub name: String,
    pub description: String,
}

/// A concrete search backend chosen at runtime
#[derive(Debug, Clone)]
pub enum Gateway {
    Nominatim(nominatim::NominatimBackend),
    Memory(memory::InMemoryGateway),
}

impl SearchGateway for Gateway {
    fn name(&self) -> &'static str {
        match self {
            Self::Nominatim(backend) => backend.name(),
            Self::Memory(backend) => backend.name(),
        }
    }

    async fn search(&self, query: &str, region: Option<Region>) -> Result<Vec<LocatedItem>> {
        match self {
            Self::Nominatim(backend) => backend.search(query, region).await,
            Self::Memory(backend) => backend.search(query, region).await,
        }
    }
}

/// Get a search backend by name
pub fn get_gateway(name: &str, limit: usize) -> Result<Gateway> {
    match name.to_lowercase().as_str() {
        "nominatim" => Ok(Gateway::Nominatim(nominatim::NominatimBackend::new(limit)?)),
        "memory" => Ok(Gateway::Memory(memory::InMemoryGateway::bay_area().with_limit(limit))),
        _ => Err(Error::Config(format!("Unknown search backend: {}", name))),
    }
}

/// List all available search backends
pub fn available_gateways() -> Vec<GatewayInfo> {
    vec![
        GatewayInfo {
            name: "nominatim".to_string(),
            description: "OpenStreetMap Nominatim geocoder".to_string(),
        },
        GatewayInfo {
            name: "memory".to_string(),
            description: "Built-in offline catalog of Bay Area places".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn components(
        street_number: Option<&str>,
        street: Option<&str>,
        postal_code: Option<&str>,
        locality: Option<&str>,
        administrative_area: Option<&str>,
        country: Option<&str>,
    ) -> PlaceComponents {
        PlaceComponents {
            street_number: street_number.map(String::from),
            street: street.map(String::from),
            postal_code: postal_code.map(String::from),
            locality: locality.map(String::from),
            administrative_area: administrative_area.map(String::from),
            country: country.map(String::from),
        }
    }

    #[test]
    fn test_format_address_without_postal_code() {
        let c = components(
            Some("1"),
            Some("Infinite Loop"),
            None,
            Some("Cupertino"),
            Some("CA"),
            Some("USA"),
        );
        assert_eq!(format_address(&c), "1 Infinite Loop, Cupertino, CA USA");
    }

    #[test]
    fn test_format_address_all_components() {
        let c = components(
            Some("1"),
            Some("Infinite Loop"),
            Some("95014"),
            Some("Cupertino"),
            Some("CA"),
            Some("USA"),
        );
        assert_eq!(format_address(&c), "1 Infinite Loop, 95014 Cupertino, CA USA");
    }

    #[test]
    fn test_format_address_empty() {
        assert_eq!(format_address(&PlaceComponents::default()), "");
    }

    #[test]
    fn test_format_address_no_stray_punctuation() {
        let c = components(None, Some("Market St"), None, None, None, None);
        assert_eq!(format_address(&c), "Market St");

        let c = components(None, None, None, Some("San Francisco"), Some("CA"), None);
        assert_eq!(format_address(&c), "San Francisco, CA");

        let c = components(None, None, None, None, None, Some("USA"));
        assert_eq!(format_address(&c), "USA");
    }

    #[test]
    fn test_format_address_blank_counts_as_absent() {
        let c = components(Some("  "), Some("Castro St"), Some(""), None, None, Some("USA"));
        assert_eq!(format_address(&c), "Castro St, USA");
    }

    #[test]
    fn test_format_address_idempotent() {
        let c = components(Some("1"), Some("Apple Park Way"), None, Some("Cupertino"), None, None);
        assert_eq!(format_address(&c), format_address(&c));
    }

    #[test]
    fn test_located_item_derives_address() {
        let item = LocatedItem::new(
            "Apple Park",
            Coordinates::new(37.3349, -122.009),
            components(Some("1"), Some("Apple Park Way"), None, Some("Cupertino"), Some("CA"), None),
        );
        assert_eq!(item.address, "1 Apple Park Way, Cupertino, CA");
    }

    #[test]
    fn test_coordinates_validate() {
        assert!(Coordinates::new(37.7666, -122.42729).validate().is_ok());
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -181.0).validate().is_err());
    }

    #[test]
    fn test_coordinates_from_str() {
        let c: Coordinates = "37.7666, -122.42729".parse().unwrap();
        assert_relative_eq!(c.lat, 37.7666);
        assert_relative_eq!(c.lng, -122.42729);

        assert!("37.7666".parse::<Coordinates>().is_err());
        assert!("north,west".parse::<Coordinates>().is_err());
        assert!("95,0".parse::<Coordinates>().is_err());
    }

    #[test]
    fn test_distance_to() {
        let sf = Coordinates::new(37.7666, -122.42729);
        let cupertino = Coordinates::new(37.331352, -122.030331);
        let d = sf.distance_to(&cupertino);
        assert!(d > 55_000.0 && d < 62_000.0, "distance was {}", d);
        assert_relative_eq!(sf.distance_to(&sf), 0.0);
    }

    #[test]
    fn test_region_bounds_and_contains() {
        let region = Region::new(Coordinates::new(37.7666, -122.42729), 0.1, 0.1);
        let (south, west, north, east) = region.bounds();
        assert_relative_eq!(south, 37.7166, epsilon = 1e-9);
        assert_relative_eq!(north, 37.8166, epsilon = 1e-9);
        assert_relative_eq!(west, -122.47729, epsilon = 1e-9);
        assert_relative_eq!(east, -122.37729, epsilon = 1e-9);

        assert!(region.contains(&Coordinates::new(37.78, -122.41)));
        assert!(!region.contains(&Coordinates::new(37.331352, -122.030331)));
    }

    #[test]
    fn test_region_validate() {
        let center = Coordinates::new(37.7666, -122.42729);
        assert!(Region::new(center, 0.1, 0.1).validate().is_ok());

        assert!(Region::new(center, 0.0, 0.1).validate().is_err());
        assert!(Region::new(center, 0.1, -1.0).validate().is_err());
        assert!(Region::new(center, f64::NAN, 0.1).validate().is_err());
        assert!(Region::new(center, 0.1, f64::INFINITY).validate().is_err());
        assert!(Region::new(Coordinates::new(91.0, 0.0), 0.1, 0.1).validate().is_err());
    }

    #[test]
    fn test_get_gateway() {
        assert_eq!(get_gateway("memory", 5).unwrap().name(), "memory");
        assert_eq!(get_gateway("Nominatim", 5).unwrap().name(), "nominatim");
        assert!(get_gateway("unknown", 5).is_err());
    }

    #[test]
    fn test_located_item_serialization() {
        let item = LocatedItem::new(
            "Ferry Building",
            Coordinates::new(37.7955, -122.3937),
            PlaceComponents::default(),
        );

        let json = serde_json::to_string(&item).unwrap();
        let parsed: LocatedItem = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, item);
        assert!(!json.contains("street_number"));
    }
}
