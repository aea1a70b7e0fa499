//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod interactive;
pub mod route;
pub mod search;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Place search, results carousel and directions
#[derive(Parser)]
#[command(name = "advanced-maps")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for places
    Search(search::SearchArgs),

    /// Get directions between two coordinates
    Route(route::RouteArgs),

    /// Type queries line by line and watch results update
    Interactive(interactive::InteractiveArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Initialize logging to stderr
///
/// RUST_LOG wins when set; otherwise `info`, or `debug` with --verbose.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Route(args) => route::run(args).await,
        Commands::Interactive(args) => interactive::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
