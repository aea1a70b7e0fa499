//! Nominatim search backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for place search.
//! Rate limit: 1 request per second. Requests from one backend (and its
//! clones) are spaced at least that far apart.

use crate::constants::api::{NOMINATIM_MIN_INTERVAL_MS, NOMINATIM_URL, USER_AGENT};
use crate::error::{Error, Result};
use crate::geo::{Coordinates, LocatedItem, PlaceComponents, Region, SearchGateway};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};
use tracing::debug;

/// Nominatim search backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
    limit: usize,
    min_interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

/// The `addressdetails=1` block
#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    house_number: Option<String>,
    road: Option<String>,
    postcode: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl NominatimBackend {
    /// Create a new Nominatim backend returning at most `limit` places
    pub fn new(limit: usize) -> Result<Self> {
        Self::with_base_url(NOMINATIM_URL, limit)
    }

    /// Create a backend against a self-hosted Nominatim instance
    pub fn with_base_url(base_url: impl Into<String>, limit: usize) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            limit: limit.max(1),
            min_interval: Duration::from_millis(NOMINATIM_MIN_INTERVAL_MS),
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Wait until the previous request is at least `min_interval` old
    ///
    /// The lock is held while sleeping, so concurrent callers queue up.
    async fn wait_turn(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(at) = *last {
            let ready = at + self.min_interval;
            if ready > Instant::now() {
                let wait = ready.saturating_duration_since(Instant::now());
                debug!(wait_ms = wait.as_millis() as u64, "nominatim throttled");
                sleep_until(ready).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Build the search URL for a query
    fn search_url(&self, query: &str, region: Option<Region>) -> String {
        let mut url = format!(
            "{}/search?q={}&format=json&addressdetails=1&limit={}",
            self.base_url,
            urlencoding::encode(query),
            self.limit
        );

        // Viewbox biases results without excluding places outside it
        if let Some(region) = region {
            let (south, west, north, east) = region.bounds();
            url.push_str(&format!("&viewbox={},{},{},{}", west, north, east, south));
        }

        url
    }

    /// Parse lat/lng strings to f64
    fn parse_coords(lat: &str, lng: &str) -> Result<Coordinates> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::Gateway(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::Gateway(format!("Invalid longitude: {}", lng)))?;
        Ok(Coordinates::new(lat, lng))
    }

    fn to_located_item(result: NominatimResult) -> Result<LocatedItem> {
        let coordinate = Self::parse_coords(&result.lat, &result.lon)?;

        let name = result
            .name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| result.display_name.split(',').next().map(|s| s.trim().to_string()))
            .unwrap_or_default();

        let address = result.address.unwrap_or_default();
        let components = PlaceComponents {
            street_number: address.house_number,
            street: address.road,
            postal_code: address.postcode,
            locality: address.city.or(address.town).or(address.village).or(address.hamlet),
            administrative_area: address.state,
            country: address.country,
        };

        Ok(LocatedItem::new(name, coordinate, components))
    }
}

impl SearchGateway for NominatimBackend {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    async fn search(&self, query: &str, region: Option<Region>) -> Result<Vec<LocatedItem>> {
        let url = self.search_url(query, region);
        self.wait_turn().await;
        debug!(%url, "nominatim search");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Gateway(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Gateway(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| Error::Gateway(format!("Failed to parse Nominatim response: {}", e)))?;

        results.into_iter().map(Self::to_located_item).collect()
    }
}
