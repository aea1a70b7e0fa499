//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{OutputFormatter, RouteReport, SearchReport};

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format_search(&self, report: &SearchReport, _config: &Config) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("Search: \"{}\" ({})\n", report.query, report.backend));
        if let Some(region) = &report.region {
            output.push_str(&format!(
                "Near: ({:.6}, {:.6}) ±{}°\n",
                region.center.lat, region.center.lng, region.lat_delta / 2.0
            ));
        }

        if report.items.is_empty() {
            output.push_str("\nNo results\n");
            return Ok(output);
        }

        output.push_str(&format!("\n{} result(s):\n", report.items.len()));
        for (i, item) in report.items.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} ({:.6}, {:.6})\n",
                i + 1,
                item.name,
                item.coordinate.lat,
                item.coordinate.lng
            ));
            if !item.address.is_empty() {
                output.push_str(&format!("     {}\n", item.address));
            }
        }

        Ok(output)
    }

    fn format_routes(&self, report: &RouteReport, _config: &Config) -> Result<String> {
        let mut output = String::new();
        let request = &report.request;

        output.push_str(&format!("Directions ({})\n", report.backend));
        output.push_str(&format!(
            "From: ({:.6}, {:.6})\n",
            request.origin.lat, request.origin.lng
        ));
        output.push_str(&format!(
            "To:   ({:.6}, {:.6})\n",
            request.destination.lat, request.destination.lng
        ));

        if report.routes.is_empty() {
            output.push_str("\nNo route found\n");
            return Ok(output);
        }

        output.push_str(&format!("\n{} route(s):\n", report.routes.len()));
        for (i, route) in report.routes.iter().enumerate() {
            let duration = route
                .expected_travel_secs
                .map(|secs| format!(", ~{} min", (secs / 60.0).round()))
                .unwrap_or_default();
            output.push_str(&format!(
                "  {}. {:.1} km{} ({} points)\n",
                i + 1,
                route.distance_meters / 1000.0,
                duration,
                route.polyline.len()
            ));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures::{route_report, search_report};

    #[test]
    fn test_text_search() {
        let output = TextFormatter
            .format_search(&search_report(), &Config::default())
            .unwrap();

        assert!(output.contains("Search: \"apple\" (memory)"));
        assert!(output.contains("4 result(s):"));
        assert!(output.contains("1. Apple Park"));
        assert!(output.contains("1 Apple Park Way, 95014 Cupertino, CA United States"));
    }

    #[test]
    fn test_text_search_empty() {
        let report = SearchReport::new("zzz", None, "memory", Vec::new());
        let output = TextFormatter.format_search(&report, &Config::default()).unwrap();
        assert!(output.contains("No results"));
    }

    #[test]
    fn test_text_routes() {
        let output = TextFormatter
            .format_routes(&route_report(), &Config::default())
            .unwrap();

        assert!(output.contains("Directions (osrm)"));
        assert!(output.contains("1. 70.5 km, ~61 min (3 points)"));
    }
}
