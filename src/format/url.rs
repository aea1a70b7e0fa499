//! Map link output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{OutputFormatter, RouteReport, SearchReport};

/// URL formatter - one map link per place, using the default provider
pub struct UrlFormatter;

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map links for each place"
    }

    fn format_search(&self, report: &SearchReport, config: &Config) -> Result<String> {
        let links = report
            .items
            .iter()
            .map(|item| config.format_url(None, item.coordinate.lat, item.coordinate.lng))
            .collect::<Result<Vec<_>>>()?;
        Ok(links.join("\n"))
    }

    fn format_routes(&self, report: &RouteReport, config: &Config) -> Result<String> {
        let origin = report.request.origin;
        let destination = report.request.destination;
        Ok(format!(
            "{}\n{}",
            config.format_url(None, origin.lat, origin.lng)?,
            config.format_url(None, destination.lat, destination.lng)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures::{route_report, search_report};

    #[test]
    fn test_url_search() {
        let output = UrlFormatter
            .format_search(&search_report(), &Config::default())
            .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "https://maps.apple.com/?ll=37.3349,-122.009");
    }

    #[test]
    fn test_url_routes() {
        let output = UrlFormatter
            .format_routes(&route_report(), &Config::default())
            .unwrap();
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_url_unknown_provider() {
        let mut config = Config::default();
        config.url.default = "nowhere".to_string();
        assert!(UrlFormatter.format_search(&search_report(), &config).is_err());
    }
}
