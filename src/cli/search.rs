//! Search command handler
//!
//! One-shot place search.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{get_formatter, SearchReport};
use crate::geo::{get_gateway, Coordinates, Region, SearchGateway};
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query
    pub query: String,

    /// Viewport center latitude
    #[arg(long, requires = "lng")]
    pub lat: Option<f64>,

    /// Viewport center longitude
    #[arg(long, requires = "lat")]
    pub lng: Option<f64>,

    /// Viewport span in degrees
    #[arg(long)]
    pub span: Option<f64>,

    /// Don't bias results to any viewport
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub anywhere: bool,

    /// Search backend (nominatim, memory)
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Maximum number of results
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    let config = Config::load()?;

    let region = resolve_region(&args, &config)?;
    let backend = args.backend.as_deref().unwrap_or(&config.search.backend);
    let limit = args.limit.unwrap_or(config.search.limit);
    let format = args.format.as_deref().unwrap_or(&config.output.format);

    let formatter = get_formatter(format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let gateway = get_gateway(backend, limit)?;
    let items = gateway.search(&args.query, region).await?;

    let report = SearchReport::new(args.query, region, gateway.name(), items);
    let output = formatter.format_search(&report, &config)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Pick the search viewport from flags, falling back to config
fn resolve_region(args: &SearchArgs, config: &Config) -> Result<Option<Region>> {
    if args.anywhere {
        return Ok(None);
    }

    let region = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => {
            let span = args.span.unwrap_or(config.region.span);
            Some(Region::new(Coordinates::new(lat, lng), span, span))
        }
        _ => config.search_region().map(|region| match args.span {
            Some(span) => Region::new(region.center, span, span),
            None => region,
        }),
    };

    if let Some(region) = &region {
        region.validate()?;
    }
    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn search_args(argv: &[&str]) -> SearchArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Search(args) => args,
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_region_from_flags() {
        let args = search_args(&["advanced-maps", "search", "apple", "--lat", "37.33", "--lng=-122.02"]);
        let region = resolve_region(&args, &Config::default()).unwrap().unwrap();

        assert_eq!(region.center, Coordinates::new(37.33, -122.02));
        assert_eq!(region.lat_delta, 0.1);
    }

    #[test]
    fn test_region_anywhere() {
        let args = search_args(&["advanced-maps", "search", "apple", "--anywhere"]);
        assert!(resolve_region(&args, &Config::default()).unwrap().is_none());
    }

    #[test]
    fn test_region_rejects_bad_span() {
        let args = search_args(&["advanced-maps", "search", "apple", "--span=-1"]);
        assert!(resolve_region(&args, &Config::default()).is_err());

        let args = search_args(&[
            "advanced-maps", "search", "apple", "--lat", "37.33", "--lng=-122.02", "--span", "NaN",
        ]);
        assert!(resolve_region(&args, &Config::default()).is_err());
    }
}
