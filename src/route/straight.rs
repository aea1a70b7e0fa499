//! Straight-line routing
//!
//! Offline stand-in for a routing service: a single two-point route with
//! great-circle distance and no travel time estimate.

use crate::error::Result;
use crate::route::{Route, RouteRequest, RouteService};

#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineRouter;

impl RouteService for StraightLineRouter {
    fn name(&self) -> &'static str {
        "straight"
    }

    async fn routes(&self, request: &RouteRequest) -> Result<Vec<Route>> {
        Ok(vec![Route {
            polyline: vec![request.origin, request.destination],
            distance_meters: request.origin.distance_to(&request.destination),
            expected_travel_secs: None,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;
    use approx::assert_relative_eq;

    #[tokio::test]
    async fn test_single_route_regardless_of_alternates() {
        let origin = Coordinates::new(37.7666, -122.42729);
        let destination = Coordinates::new(37.331352, -122.030331);
        let request = RouteRequest::new(origin, destination).with_alternates(true);

        let routes = StraightLineRouter.routes(&request).await.unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].polyline, vec![origin, destination]);
        assert_relative_eq!(routes[0].distance_meters, origin.distance_to(&destination));
        assert!(routes[0].expected_travel_secs.is_none());
    }
}
