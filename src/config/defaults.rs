//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::search::DEFAULT_QUIET_MS;

/// Default search backend
pub const DEFAULT_SEARCH_BACKEND: &str = "nominatim";

/// Default keystroke quiet interval in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = DEFAULT_QUIET_MS;

/// Default maximum number of search results
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Default viewport center (San Francisco)
pub const DEFAULT_REGION_LAT: f64 = 37.7666;
pub const DEFAULT_REGION_LNG: f64 = -122.427290;

/// Default viewport span in degrees
pub const DEFAULT_REGION_SPAN: f64 = 0.1;

/// Default routing backend
pub const DEFAULT_ROUTE_BACKEND: &str = "osrm";

/// Default routing profile
pub const DEFAULT_ROUTE_PROFILE: &str = "driving";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7879;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "apple";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "advanced-maps";
