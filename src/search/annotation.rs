//! Presentation-side wrappers around search results

use crate::geo::{Coordinates, LocatedItem};
use serde::{Deserialize, Serialize};

/// Something drawn as a pin on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// A plain titled pin (route endpoints, fixed markers)
    Pin {
        coordinate: Coordinates,
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
    },
    /// A pin for a place returned by a search
    Place(LocatedItem),
}

impl Annotation {
    /// Create a plain pin
    pub fn pin(coordinate: Coordinates, title: impl Into<String>) -> Self {
        Self::Pin {
            coordinate,
            title: title.into(),
            subtitle: None,
        }
    }

    pub fn coordinate(&self) -> Coordinates {
        match self {
            Self::Pin { coordinate, .. } => *coordinate,
            Self::Place(item) => item.coordinate,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Pin { title, .. } => title,
            Self::Place(item) => &item.name,
        }
    }

    pub fn subtitle(&self) -> Option<&str> {
        match self {
            Self::Pin { subtitle, .. } => subtitle.as_deref(),
            Self::Place(item) if item.address.is_empty() => None,
            Self::Place(item) => Some(&item.address),
        }
    }

    /// The searched place behind this pin, if any
    pub fn place(&self) -> Option<&LocatedItem> {
        match self {
            Self::Pin { .. } => None,
            Self::Place(item) => Some(item),
        }
    }
}

/// One card in the results carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    /// Index in the carousel
    pub position: usize,
    pub item: LocatedItem,
}
