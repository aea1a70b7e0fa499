//! Directions between two coordinates
//!
//! Route computation is delegated to a routing service. Returned polylines
//! are forwarded to the map as-is; nothing here scores or reorders them.

pub mod osrm;
pub mod straight;

use crate::constants::search::{END_PIN_TITLE, START_PIN_TITLE};
use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::search::annotation::Annotation;
use crate::search::surface::MapSurface;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A directions request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: Coordinates,
    pub destination: Coordinates,
    /// Ask the service for alternate routes as well as the primary one
    #[serde(default)]
    pub include_alternates: bool,
}

impl RouteRequest {
    pub fn new(origin: Coordinates, destination: Coordinates) -> Self {
        Self {
            origin,
            destination,
            include_alternates: false,
        }
    }

    pub fn with_alternates(mut self, include_alternates: bool) -> Self {
        self.include_alternates = include_alternates;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.origin.validate()?;
        self.destination.validate()
    }
}

/// One route returned by a routing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub polyline: Vec<Coordinates>,
    pub distance_meters: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_travel_secs: Option<f64>,
}

/// Trait for routing backends
pub trait RouteService: Send + Sync {
    /// Backend name as used in config
    fn name(&self) -> &'static str;

    /// Compute zero or more routes for a request
    fn routes(
        &self,
        request: &RouteRequest,
    ) -> impl std::future::Future<Output = Result<Vec<Route>>> + Send;
}

/// Information about a routing backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterInfo {
    pub name: String,
    pub description: String,
}

/// A concrete routing backend chosen at runtime
#[derive(Debug, Clone)]
pub enum RouteBackend {
    Osrm(osrm::OsrmBackend),
    Straight(straight::StraightLineRouter),
}

impl RouteService for RouteBackend {
    fn name(&self) -> &'static str {
        match self {
            Self::Osrm(backend) => backend.name(),
            Self::Straight(backend) => backend.name(),
        }
    }

    async fn routes(&self, request: &RouteRequest) -> Result<Vec<Route>> {
        match self {
            Self::Osrm(backend) => backend.routes(request).await,
            Self::Straight(backend) => backend.routes(request).await,
        }
    }
}

/// Get a routing backend by name
pub fn get_router(name: &str, profile: &str) -> Result<RouteBackend> {
    match name.to_lowercase().as_str() {
        "osrm" => Ok(RouteBackend::Osrm(osrm::OsrmBackend::new(profile)?)),
        "straight" => Ok(RouteBackend::Straight(straight::StraightLineRouter)),
        _ => Err(Error::Config(format!("Unknown route backend: {}", name))),
    }
}

/// List all available routing backends
pub fn available_routers() -> Vec<RouterInfo> {
    vec![
        RouterInfo {
            name: "osrm".to_string(),
            description: "Open Source Routing Machine".to_string(),
        },
        RouterInfo {
            name: "straight".to_string(),
            description: "Great-circle line between the endpoints (offline)".to_string(),
        },
    ]
}

/// Show a route request on a map
///
/// Pins both endpoints, then draws every returned polyline. If the service
/// fails the pins stay, no overlays are added, and the error is returned.
pub async fn request_directions<R, M>(
    service: &R,
    request: &RouteRequest,
    map: &mut M,
) -> Result<Vec<Route>>
where
    R: RouteService,
    M: MapSurface,
{
    request.validate()?;

    map.replace_annotations(&[
        Annotation::pin(request.origin, START_PIN_TITLE),
        Annotation::pin(request.destination, END_PIN_TITLE),
    ]);

    let routes = service.routes(request).await.inspect_err(|e| {
        warn!(backend = service.name(), error = %e, "failed to get routing info");
    })?;

    debug!(backend = service.name(), count = routes.len(), "drawing routes");
    map.add_overlays(&routes);
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::surface::testing::RecordingMap;

    struct FailingRouter;

    impl RouteService for FailingRouter {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn routes(&self, _request: &RouteRequest) -> Result<Vec<Route>> {
            Err(Error::Routing("no connection".to_string()))
        }
    }

    fn sf_to_cupertino() -> RouteRequest {
        RouteRequest::new(
            Coordinates::new(37.7666, -122.42729),
            Coordinates::new(37.331352, -122.030331),
        )
        .with_alternates(true)
    }

    #[tokio::test]
    async fn test_request_directions_pins_and_overlays() {
        let mut map = RecordingMap::default();
        let routes = request_directions(&straight::StraightLineRouter, &sf_to_cupertino(), &mut map)
            .await
            .unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(map.overlays, routes);

        let titles: Vec<&str> = map.annotations.iter().map(|a| a.title()).collect();
        assert_eq!(titles, vec!["Starting Point", "Ending Point"]);
    }

    #[tokio::test]
    async fn test_request_directions_failure_leaves_overlays() {
        let mut map = RecordingMap::default();
        let result = request_directions(&FailingRouter, &sf_to_cupertino(), &mut map).await;

        assert!(matches!(result, Err(Error::Routing(_))));
        assert!(map.overlays.is_empty());
        assert_eq!(map.annotations.len(), 2);
    }

    #[tokio::test]
    async fn test_request_directions_rejects_invalid() {
        let mut map = RecordingMap::default();
        let request = RouteRequest::new(Coordinates::new(100.0, 0.0), Coordinates::new(0.0, 0.0));
        let result = request_directions(&straight::StraightLineRouter, &request, &mut map).await;

        assert!(matches!(result, Err(Error::InvalidCoordinates(_))));
        assert!(map.annotations.is_empty());
    }

    #[test]
    fn test_get_router() {
        assert_eq!(get_router("osrm", "driving").unwrap().name(), "osrm");
        assert_eq!(get_router("STRAIGHT", "driving").unwrap().name(), "straight");
        assert!(get_router("teleport", "driving").is_err());
    }

    #[test]
    fn test_available_routers() {
        let routers = available_routers();
        assert!(routers.iter().any(|r| r.name == "osrm"));
        assert!(routers.iter().any(|r| r.name == "straight"));
    }
}
