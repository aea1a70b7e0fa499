//! Search sessions and their generation counter

use crate::geo::Region;
use serde::{Deserialize, Serialize};

/// Monotonically increasing session number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation issued after this one
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One issued query
///
/// Only the newest session may change what is shown; any older session that
/// completes later is discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSession {
    pub query: String,
    pub region: Option<Region>,
    pub generation: Generation,
}

impl SearchSession {
    /// Whether this session asks to clear results rather than search
    pub fn is_clear(&self) -> bool {
        self.query.trim().is_empty()
    }
}
