//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{OutputFormatter, RouteReport, SearchReport};

/// JSON formatter - outputs the full report
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON response"
    }

    fn format_search(&self, report: &SearchReport, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn format_routes(&self, report: &RouteReport, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures::{route_report, search_report};

    #[test]
    fn test_json_search() {
        let output = JsonFormatter
            .format_search(&search_report(), &Config::default())
            .unwrap();

        let parsed: SearchReport = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.query, "apple");
        assert_eq!(parsed.items.len(), 4);
        assert!(!output.contains("\"region\""));
    }

    #[test]
    fn test_json_routes() {
        let output = JsonFormatter
            .format_routes(&route_report(), &Config::default())
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["routes"][0]["polyline"].as_array().unwrap().len(), 3);
        assert_eq!(value["backend"], "osrm");
    }
}
