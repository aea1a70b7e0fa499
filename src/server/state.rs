//! Server shared state
//!
//! Holds configuration and the search and routing backends.

use crate::config::Config;
use crate::error::Result;
use crate::geo::{get_gateway, Gateway, SearchGateway};
use crate::route::{get_router, RouteBackend, RouteService};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    /// Place search backend
    pub gateway: Gateway,

    /// Directions backend
    pub router: RouteBackend,

    started: Instant,
}

impl AppState {
    /// Create state with the backends named in the config
    pub fn new(config: Config) -> Result<Self> {
        let gateway = get_gateway(&config.search.backend, config.search.limit)?;
        let router = get_router(&config.route.backend, &config.route.profile)?;
        Ok(Self::with_backends(config, gateway, router))
    }

    /// Create state with explicit backends
    pub fn with_backends(config: Config, gateway: Gateway, router: RouteBackend) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            gateway,
            router,
            started: Instant::now(),
        }
    }

    pub fn gateway_name(&self) -> &'static str {
        self.gateway.name()
    }

    pub fn router_name(&self) -> &'static str {
        self.router.name()
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
