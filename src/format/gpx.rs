//! GPX output formatter
//!
//! Places become waypoints, routes become tracks.

use crate::config::Config;
use crate::constants::search::{END_PIN_TITLE, START_PIN_TITLE};
use crate::error::Result;
use crate::format::{OutputFormatter, RouteReport, SearchReport};

/// GPX formatter - outputs a GPX 1.1 document
pub struct GpxFormatter;

/// Escape text for XML element content and attributes
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn header(gpx: &mut String, name: &str, time: &str) {
    gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    gpx.push('\n');
    gpx.push_str(r#"<gpx version="1.1" creator="advanced-maps">"#);
    gpx.push('\n');
    gpx.push_str("  <metadata>\n");
    gpx.push_str(&format!("    <name>{}</name>\n", escape(name)));
    gpx.push_str(&format!("    <time>{}</time>\n", time));
    gpx.push_str("  </metadata>\n");
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoints and tracks"
    }

    fn format_search(&self, report: &SearchReport, _config: &Config) -> Result<String> {
        let mut gpx = String::new();
        header(
            &mut gpx,
            &format!("Search: {}", report.query),
            &report.searched_at.to_rfc3339(),
        );

        for item in &report.items {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                item.coordinate.lat, item.coordinate.lng
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape(&item.name)));
            if !item.address.is_empty() {
                gpx.push_str(&format!("    <desc>{}</desc>\n", escape(&item.address)));
            }
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }

    fn format_routes(&self, report: &RouteReport, _config: &Config) -> Result<String> {
        let mut gpx = String::new();
        header(&mut gpx, "Directions", &report.requested_at.to_rfc3339());

        for (title, coord) in [
            (START_PIN_TITLE, report.request.origin),
            (END_PIN_TITLE, report.request.destination),
        ] {
            gpx.push_str(&format!(r#"  <wpt lat="{}" lon="{}">"#, coord.lat, coord.lng));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", title));
            gpx.push_str("  </wpt>\n");
        }

        for (i, route) in report.routes.iter().enumerate() {
            gpx.push_str("  <trk>\n");
            gpx.push_str(&format!("    <name>Route {}</name>\n", i + 1));
            gpx.push_str(&format!(
                "    <desc>distance: {:.0}m</desc>\n",
                route.distance_meters
            ));
            gpx.push_str("    <trkseg>\n");
            for point in &route.polyline {
                gpx.push_str(&format!(
                    "      <trkpt lat=\"{}\" lon=\"{}\"/>\n",
                    point.lat, point.lng
                ));
            }
            gpx.push_str("    </trkseg>\n");
            gpx.push_str("  </trk>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures::{route_report, search_report};

    #[test]
    fn test_gpx_search() {
        let output = GpxFormatter
            .format_search(&search_report(), &Config::default())
            .unwrap();

        assert!(output.contains(r#"<?xml version="1.0""#));
        assert!(output.contains(r#"<gpx version="1.1""#));
        assert_eq!(output.matches("<wpt").count(), 4);
        assert!(output.contains("<name>Apple Park</name>"));
        assert!(output.ends_with("</gpx>\n"));
    }

    #[test]
    fn test_gpx_routes() {
        let output = GpxFormatter
            .format_routes(&route_report(), &Config::default())
            .unwrap();

        assert_eq!(output.matches("<wpt").count(), 2);
        assert_eq!(output.matches("<trk>").count(), 1);
        assert_eq!(output.matches("<trkpt").count(), 3);
        assert!(output.contains("<name>Starting Point</name>"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("Peet's <Coffee> & \"Tea\""), "Peet's &lt;Coffee&gt; &amp; &quot;Tea&quot;");
    }
}
