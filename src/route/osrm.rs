//! OSRM routing backend
//!
//! Uses the public OSRM demo server by default. The demo server only
//! serves the `driving` profile; self-hosted instances may offer more.

use crate::constants::api::{OSRM_URL, USER_AGENT};
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::route::{Route, RouteRequest, RouteService};
use serde::Deserialize;
use tracing::debug;

/// OSRM routing backend
#[derive(Debug, Clone)]
pub struct OsrmBackend {
    client: reqwest::Client,
    base_url: String,
    profile: String,
}

/// OSRM route response
#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

/// GeoJSON LineString, coordinates in [lng, lat] order
#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

impl OsrmBackend {
    /// Create a backend against the public OSRM server
    pub fn new(profile: &str) -> Result<Self> {
        Self::with_base_url(OSRM_URL, profile)
    }

    pub fn with_base_url(base_url: impl Into<String>, profile: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            profile: profile.to_string(),
        })
    }

    fn route_url(&self, request: &RouteRequest) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson&alternatives={}",
            self.base_url,
            self.profile,
            request.origin.lng,
            request.origin.lat,
            request.destination.lng,
            request.destination.lat,
            request.include_alternates
        )
    }

    fn into_routes(response: OsrmResponse) -> Result<Vec<Route>> {
        match response.code.as_str() {
            "Ok" => Ok(response
                .routes
                .into_iter()
                .map(|r| Route {
                    polyline: r
                        .geometry
                        .coordinates
                        .into_iter()
                        .map(|[lng, lat]| Coordinates::new(lat, lng))
                        .collect(),
                    distance_meters: r.distance,
                    expected_travel_secs: Some(r.duration),
                })
                .collect()),
            "NoRoute" => Ok(Vec::new()),
            code => Err(Error::Routing(format!(
                "OSRM returned {}: {}",
                code,
                response.message.unwrap_or_default()
            ))),
        }
    }
}

impl RouteService for OsrmBackend {
    fn name(&self) -> &'static str {
        "osrm"
    }

    async fn routes(&self, request: &RouteRequest) -> Result<Vec<Route>> {
        let url = self.route_url(request);
        debug!(%url, "osrm route");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Routing(format!("OSRM request failed: {}", e)))?;

        // OSRM reports most failures as 400 with a JSON body carrying `code`
        let status = response.status();
        let body: OsrmResponse = response.json().await.map_err(|e| {
            Error::Routing(format!("Failed to parse OSRM response ({}): {}", status, e))
        })?;

        Self::into_routes(body)
    }
}
