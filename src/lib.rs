//! advanced-maps: place search with a synchronized map and results carousel
//!
//! A library and CLI tool that turns free-text queries into map pins and
//! carousel cards, keeping the two views in step and discarding results
//! from searches that have been superseded.
//!
//! ## Features
//!
//! - Debounced search input (only settled text is queried)
//! - Multiple search backends (Nominatim, offline in-memory catalog)
//! - Generation-tagged sessions so stale results never reach the views
//! - Two-way selection between pins and carousel cards
//! - Directions via OSRM or straight-line fallback
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use advanced_maps::geo::{format_address, PlaceComponents};
//!
//! let components = PlaceComponents {
//!     street_number: Some("1".into()),
//!     street: Some("Infinite Loop".into()),
//!     locality: Some("Cupertino".into()),
//!     administrative_area: Some("CA".into()),
//!     country: Some("USA".into()),
//!     ..Default::default()
//! };
//!
//! assert_eq!(format_address(&components), "1 Infinite Loop, Cupertino, CA USA");
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;
pub mod route;
pub mod search;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use geo::{format_address, Coordinates, LocatedItem, PlaceComponents, Region, SearchGateway};
pub use route::{Route, RouteRequest, RouteService};
pub use search::{Annotation, ResultSynchronizer, SearchController};
