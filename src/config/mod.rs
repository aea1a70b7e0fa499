//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/advanced-maps/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::geo::{Coordinates, Region};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Place search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Viewport used to bias searches
    #[serde(default)]
    pub region: RegionConfig,

    /// Directions settings
    #[serde(default)]
    pub route: RouteConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Map link settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Place search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search backend
    #[serde(default = "default_search_backend")]
    pub backend: String,

    /// Quiet interval before a typed query is searched
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of results per search
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Search viewport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    /// If false, searches are not biased to a viewport
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_region_lat")]
    pub lat: f64,

    #[serde(default = "default_region_lng")]
    pub lng: f64,

    /// Span in degrees, applied to both latitude and longitude
    #[serde(default = "default_region_span")]
    pub span: f64,
}

/// Directions settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Routing backend
    #[serde(default = "default_route_backend")]
    pub backend: String,

    /// Routing profile (driving, walking, cycling)
    #[serde(default = "default_route_profile")]
    pub profile: String,

    /// Request alternate routes
    #[serde(default = "default_true")]
    pub alternates: bool,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_true() -> bool {
    true
}
fn default_search_backend() -> String {
    DEFAULT_SEARCH_BACKEND.to_string()
}
fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}
fn default_region_lat() -> f64 {
    DEFAULT_REGION_LAT
}
fn default_region_lng() -> f64 {
    DEFAULT_REGION_LNG
}
fn default_region_span() -> f64 {
    DEFAULT_REGION_SPAN
}
fn default_route_backend() -> String {
    DEFAULT_ROUTE_BACKEND.to_string()
}
fn default_route_profile() -> String {
    DEFAULT_ROUTE_PROFILE.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},15z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map=18/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            region: RegionConfig::default(),
            route: RouteConfig::default(),
            output: OutputConfig::default(),
            server: ServerConfig::default(),
            url: UrlConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend: default_search_backend(),
            debounce_ms: default_debounce_ms(),
            limit: default_limit(),
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lat: default_region_lat(),
            lng: default_region_lng(),
            span: default_region_span(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            backend: default_route_backend(),
            profile: default_route_profile(),
            alternates: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["search", "backend"] => Some(self.search.backend.clone()),
            ["search", "debounce_ms"] => Some(self.search.debounce_ms.to_string()),
            ["search", "limit"] => Some(self.search.limit.to_string()),

            ["region", "enabled"] => Some(self.region.enabled.to_string()),
            ["region", "lat"] => Some(self.region.lat.to_string()),
            ["region", "lng"] => Some(self.region.lng.to_string()),
            ["region", "span"] => Some(self.region.span.to_string()),

            ["route", "backend"] => Some(self.route.backend.clone()),
            ["route", "profile"] => Some(self.route.profile.clone()),
            ["route", "alternates"] => Some(self.route.alternates.to_string()),

            ["output", "format"] => Some(self.output.format.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["search", "backend"] => {
                self.search.backend = value.to_string();
            }
            ["search", "debounce_ms"] => {
                self.search.debounce_ms = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid debounce value: {}", value))
                })?;
            }
            ["search", "limit"] => {
                self.search.limit = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid limit value: {}", value))
                })?;
            }

            ["region", "enabled"] => {
                self.region.enabled = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid boolean value: {}", value))
                })?;
            }
            ["region", "lat"] => {
                let lat: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid latitude value: {}", value))
                })?;
                Coordinates::new(lat, self.region.lng).validate()?;
                self.region.lat = lat;
            }
            ["region", "lng"] => {
                let lng: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid longitude value: {}", value))
                })?;
                Coordinates::new(self.region.lat, lng).validate()?;
                self.region.lng = lng;
            }
            ["region", "span"] => {
                let span: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid span value: {}", value))
                })?;
                Region::new(Coordinates::new(self.region.lat, self.region.lng), span, span)
                    .validate()?;
                self.region.span = span;
            }

            ["route", "backend"] => {
                self.route.backend = value.to_string();
            }
            ["route", "profile"] => {
                self.route.profile = value.to_string();
            }
            ["route", "alternates"] => {
                self.route.alternates = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid boolean value: {}", value))
                })?;
            }

            ["output", "format"] => {
                self.output.format = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "search.backend",
            "search.debounce_ms",
            "search.limit",
            "region.enabled",
            "region.lat",
            "region.lng",
            "region.span",
            "route.backend",
            "route.profile",
            "route.alternates",
            "output.format",
            "server.host",
            "server.port",
            "url.default",
        ]
    }

    /// The configured search viewport, if region biasing is enabled
    pub fn search_region(&self) -> Option<Region> {
        self.region.enabled.then(|| {
            Region::new(
                Coordinates::new(self.region.lat, self.region.lng),
                self.region.span,
                self.region.span,
            )
        })
    }

    /// Keystroke quiet interval
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
