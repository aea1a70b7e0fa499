//! Output formatters
//!
//! Provides trait-based output formatting for search and route results.

pub mod gpx;
pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::geo::{LocatedItem, Region};
use crate::route::{Route, RouteRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Results of one place search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    pub backend: String,
    pub items: Vec<LocatedItem>,
    pub searched_at: DateTime<Utc>,
}

impl SearchReport {
    pub fn new(
        query: impl Into<String>,
        region: Option<Region>,
        backend: impl Into<String>,
        items: Vec<LocatedItem>,
    ) -> Self {
        Self {
            query: query.into(),
            region,
            backend: backend.into(),
            items,
            searched_at: Utc::now(),
        }
    }
}

/// Results of one directions request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteReport {
    pub request: RouteRequest,
    pub backend: String,
    pub routes: Vec<Route>,
    pub requested_at: DateTime<Utc>,
}

impl RouteReport {
    pub fn new(request: RouteRequest, backend: impl Into<String>, routes: Vec<Route>) -> Self {
        Self {
            request,
            backend: backend.into(),
            routes,
            requested_at: Utc::now(),
        }
    }
}

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format place search results
    fn format_search(&self, report: &SearchReport, config: &Config) -> Result<String>;

    /// Format directions results
    fn format_routes(&self, report: &RouteReport, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "json".to_string(),
            description: "Full JSON response".to_string(),
        },
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable text".to_string(),
        },
        FormatInfo {
            name: "gpx".to_string(),
            description: "GPX waypoints and tracks".to_string(),
        },
        FormatInfo {
            name: "url".to_string(),
            description: "Map links for each place".to_string(),
        },
    ]
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_formatter() {
        assert!(get_formatter("json").is_some());
        assert!(get_formatter("text").is_some());
        assert!(get_formatter("gpx").is_some());
        assert!(get_formatter("url").is_some());
        assert!(get_formatter("unknown").is_none());
    }

    #[test]
    fn test_get_formatter_case_insensitive() {
        assert!(get_formatter("JSON").is_some());
        assert!(get_formatter("Text").is_some());
        assert!(get_formatter("GPX").is_some());
    }

    #[test]
    fn test_available_formats() {
        let formats = available_formats();
        assert_eq!(formats.len(), 4);
        for format in &formats {
            let formatter = get_formatter(&format.name).unwrap();
            assert_eq!(formatter.name(), format.name);
        }
    }
}
