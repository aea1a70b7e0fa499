//! Route command handler
//!
//! Directions between two coordinates.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{get_formatter, RouteReport};
use crate::geo::Coordinates;
use crate::route::{get_router, RouteRequest, RouteService};
use clap::Args;

/// Route command arguments
#[derive(Args)]
pub struct RouteArgs {
    /// Origin as "lat,lng"
    #[arg(long, allow_hyphen_values = true)]
    pub from: Coordinates,

    /// Destination as "lat,lng"
    #[arg(long, allow_hyphen_values = true)]
    pub to: Coordinates,

    /// Request alternate routes
    #[arg(long, conflicts_with = "no_alternates")]
    pub alternates: bool,

    /// Only request the primary route
    #[arg(long)]
    pub no_alternates: bool,

    /// Routing backend (osrm, straight)
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Routing profile (driving, walking, cycling)
    #[arg(long)]
    pub profile: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the route command
pub async fn run(args: RouteArgs) -> Result<()> {
    let config = Config::load()?;

    let backend = args.backend.as_deref().unwrap_or(&config.route.backend);
    let profile = args.profile.as_deref().unwrap_or(&config.route.profile);
    let format = args.format.as_deref().unwrap_or(&config.output.format);
    let alternates = if args.alternates {
        true
    } else if args.no_alternates {
        false
    } else {
        config.route.alternates
    };

    let formatter = get_formatter(format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let router = get_router(backend, profile)?;
    let request = RouteRequest::new(args.from, args.to).with_alternates(alternates);
    request.validate()?;
    let routes = router.routes(&request).await?;

    let report = RouteReport::new(request, router.name(), routes);
    let output = formatter.format_routes(&report, &config)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}
