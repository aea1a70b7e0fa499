//! advanced-maps CLI entry point
//!
//! Place search, results carousel and directions - CLI + web app

use advanced_maps::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
