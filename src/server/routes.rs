//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::error::Error;
use crate::format::{available_formats, FormatInfo, RouteReport, SearchReport};
use crate::geo::{available_gateways, Coordinates, GatewayInfo, Region, SearchGateway};
use crate::route::{available_routers, RouteRequest, RouteService, RouterInfo};
use crate::server::state::AppState;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/search", get(search_handler))
        .route("/api/route", get(route_handler))
        .route("/api/status", get(status_handler))
        .route("/api/backends", get(backends_handler))
        .route("/api/formats", get(formats_handler))
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn new(error: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "GATEWAY_ERROR" | "ROUTING_ERROR" => StatusCode::BAD_GATEWAY,
            "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Gateway(_) => "GATEWAY_ERROR",
            Error::Routing(_) => "ROUTING_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError::new(err.to_string(), code)
    }
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text query; blank returns no results
    #[serde(default)]
    pub q: String,
    /// Viewport center latitude
    pub lat: Option<f64>,
    /// Viewport center longitude
    pub lng: Option<f64>,
    /// Viewport span in degrees
    pub span: Option<f64>,
}

/// Place search endpoint
///
/// GET /api/search?q=apple&lat=37.77&lng=-122.43&span=0.1
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchReport>, ApiError> {
    let region = {
        let config = state.config.read().await;
        match (params.lat, params.lng) {
            (Some(lat), Some(lng)) => {
                let span = params.span.unwrap_or(config.region.span);
                let region = Region::new(Coordinates::new(lat, lng), span, span);
                region.validate()?;
                Some(region)
            }
            (None, None) => config.search_region(),
            _ => {
                return Err(ApiError::new(
                    "lat and lng must be given together",
                    "INVALID_COORDINATES",
                ))
            }
        }
    };

    let items = if params.q.trim().is_empty() {
        Vec::new()
    } else {
        state.gateway.search(&params.q, region).await?
    };

    Ok(Json(SearchReport::new(
        params.q,
        region,
        state.gateway_name(),
        items,
    )))
}

/// Directions query parameters
#[derive(Debug, Deserialize)]
pub struct RouteParams {
    /// Origin as "lat,lng"
    pub from: String,
    /// Destination as "lat,lng"
    pub to: String,
    /// Request alternate routes (defaults to config)
    pub alternates: Option<bool>,
}

/// Directions endpoint
///
/// GET /api/route?from=37.7666,-122.42729&to=37.331352,-122.030331
async fn route_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RouteParams>,
) -> Result<Json<RouteReport>, ApiError> {
    let origin: Coordinates = params.from.parse()?;
    let destination: Coordinates = params.to.parse()?;
    let alternates = match params.alternates {
        Some(alternates) => alternates,
        None => state.config.read().await.route.alternates,
    };

    let request = RouteRequest::new(origin, destination).with_alternates(alternates);
    let routes = state.router.routes(&request).await?;

    Ok(Json(RouteReport::new(request, state.router_name(), routes)))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Place search backend
    pub search_backend: String,
    /// Directions backend
    pub route_backend: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        search_backend: state.gateway_name().to_string(),
        route_backend: state.router_name().to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

/// Backends list response
#[derive(Debug, Serialize, Deserialize)]
pub struct BackendsResponse {
    pub search: Vec<GatewayInfo>,
    pub route: Vec<RouterInfo>,
}

/// List available backends
///
/// GET /api/backends
async fn backends_handler() -> Json<BackendsResponse> {
    Json(BackendsResponse {
        search: available_gateways(),
        route: available_routers(),
    })
}

/// Formats list response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// List available output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}
