//! In-memory search backend
//!
//! Matches queries against a fixed catalog. Works offline, which makes it the
//! backend of choice for demos and tests.

use crate::error::Result;
use crate::geo::{Coordinates, LocatedItem, PlaceComponents, Region, SearchGateway};

/// Search backend over a fixed list of places
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    places: Vec<LocatedItem>,
    limit: Option<usize>,
}

impl InMemoryGateway {
    /// Create a backend over the given catalog
    pub fn new(places: Vec<LocatedItem>) -> Self {
        Self {
            places,
            limit: None,
        }
    }

    /// Cap the number of returned places
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// A handful of well-known San Francisco Bay Area places
    pub fn bay_area() -> Self {
        fn place(
            name: &str,
            lat: f64,
            lng: f64,
            number: Option<&str>,
            street: &str,
            postal_code: &str,
            locality: &str,
        ) -> LocatedItem {
            LocatedItem::new(
                name,
                Coordinates::new(lat, lng),
                PlaceComponents {
                    street_number: number.map(String::from),
                    street: Some(street.to_string()),
                    postal_code: Some(postal_code.to_string()),
                    locality: Some(locality.to_string()),
                    administrative_area: Some("CA".to_string()),
                    country: Some("United States".to_string()),
                },
            )
        }

        Self::new(vec![
            place("Apple Park", 37.3349, -122.0090, Some("1"), "Apple Park Way", "95014", "Cupertino"),
            place("Apple Infinite Loop", 37.331352, -122.030331, Some("1"), "Infinite Loop", "95014", "Cupertino"),
            place("Apple Union Square", 37.788705, -122.407409, Some("300"), "Post St", "94108", "San Francisco"),
            place("Apple Stonestown", 37.728, -122.4765, Some("3251"), "20th Ave", "94132", "San Francisco"),
            place("Ferry Building", 37.7955, -122.3937, Some("1"), "Ferry Building", "94111", "San Francisco"),
            place("Dolores Park", 37.7596, -122.4269, None, "Dolores St", "94114", "San Francisco"),
            place("Golden Gate Park", 37.7694, -122.4862, None, "John F Kennedy Dr", "94118", "San Francisco"),
            place("Coit Tower", 37.8024, -122.4058, Some("1"), "Telegraph Hill Blvd", "94133", "San Francisco"),
            place("Stanford University", 37.4275, -122.1697, Some("450"), "Serra Mall", "94305", "Stanford"),
        ])
    }

    /// Synchronous lookup shared by the async trait method
    pub fn lookup(&self, query: &str, region: Option<Region>) -> Vec<LocatedItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let matches = self
            .places
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .filter(|p| region.map_or(true, |r| r.contains(&p.coordinate)))
            .cloned();

        match self.limit {
            Some(limit) => matches.take(limit).collect(),
            None => matches.collect(),
        }
    }
}

impl SearchGateway for InMemoryGateway {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn search(&self, query: &str, region: Option<Region>) -> Result<Vec<LocatedItem>> {
        Ok(self.lookup(query, region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_case_insensitive() {
        let gateway = InMemoryGateway::bay_area();
        let results = gateway.lookup("APPLE", None);

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].name, "Apple Park");
        assert!(results.iter().all(|p| p.name.starts_with("Apple")));
    }

    #[test]
    fn test_lookup_empty_query() {
        let gateway = InMemoryGateway::bay_area();
        assert!(gateway.lookup("", None).is_empty());
        assert!(gateway.lookup("   ", None).is_empty());
    }

    #[test]
    fn test_lookup_filters_by_region() {
        let gateway = InMemoryGateway::bay_area();
        let sf = Region::new(Coordinates::new(37.7666, -122.42729), 0.1, 0.1);
        let results = gateway.lookup("apple", Some(sf));

        let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Apple Union Square", "Apple Stonestown"]);
    }

    #[test]
    fn test_lookup_limit() {
        let gateway = InMemoryGateway::bay_area().with_limit(2);
        assert_eq!(gateway.lookup("apple", None).len(), 2);
    }

    #[tokio::test]
    async fn test_search_trait() {
        let gateway = InMemoryGateway::bay_area();
        let results = gateway.search("coit", None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].address, "1 Telegraph Hill Blvd, 94133 San Francisco, CA United States");
    }
}
