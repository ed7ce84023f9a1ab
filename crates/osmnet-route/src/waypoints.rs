//! Ordered multi-stop routing.
//!
//! Waypoints are visited exactly in the order given; no reordering is
//! attempted.  The combined route is the concatenation of the per-leg
//! shortest paths.

use osmnet_core::{NetError, NetResult, Optimize, VertexId};
use osmnet_graph::RoadGraph;

use crate::route::{PathOutcome, Route, Router};

/// A route through every waypoint plus its individual legs.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiRoute {
    pub legs:  Vec<Route>,
    pub route: Route,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WaypointOutcome {
    Found(MultiRoute),
    /// Leg `leg` (0-based, from waypoint `leg` to `leg + 1`) has no path.
    LegUnreachable { leg: usize, from: VertexId, to: VertexId },
}

/// Route through `waypoints` in order.
///
/// # Errors
///
/// [`NetError::TooFewPoints`] for fewer than two waypoints.
pub fn route_waypoints(
    graph: &RoadGraph,
    router: &dyn Router,
    waypoints: &[VertexId],
    optimize: Optimize,
) -> NetResult<WaypointOutcome> {
    if waypoints.len() < 2 {
        return Err(NetError::TooFewPoints {
            what: "waypoint route",
            need: 2,
            got:  waypoints.len(),
        });
    }

    let mut legs = Vec::with_capacity(waypoints.len() - 1);
    let mut route = Route::trivial(waypoints[0]);
    for (leg, pair) in waypoints.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        match router.shortest_path(graph, from, to, optimize) {
            PathOutcome::Found(r) => {
                route.extend(&r);
                legs.push(r);
            }
            PathOutcome::Unreachable => {
                log::debug!("waypoint leg {leg} ({from} -> {to}) is unreachable");
                return Ok(WaypointOutcome::LegUnreachable { leg, from, to });
            }
        }
    }

    Ok(WaypointOutcome::Found(MultiRoute { legs, route }))
}
