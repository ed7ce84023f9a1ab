//! Routes, the [`Router`] trait, and the default Dijkstra router.
//!
//! # Pluggability
//!
//! Multi-stop routing and the CLI call path finding through [`Router`], so
//! an A* or contraction-hierarchy router can be dropped in without touching
//! callers.  [`DijkstraRouter`] is the default.
//!
//! # Outcomes
//!
//! An unreachable destination is [`PathOutcome::Unreachable`], a normal
//! value.  Errors are reserved for bad input, unresolvable points, and an
//! empty graph.

use osmnet_core::{EdgeId, GeoPoint, NetResult, Optimize, OsmId, VertexId};
use osmnet_graph::{Network, RoadGraph};

use crate::dijkstra::shortest_path_tree;

// ── Route ─────────────────────────────────────────────────────────────────────

/// A path through the graph with its totals.
///
/// `vertices.len() == edges.len() + 1` always holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub vertices:   Vec<VertexId>,
    pub edges:      Vec<EdgeId>,
    pub distance_m: f64,
    pub time_s:     f64,
}

/// One edge of a route, with the attributes of its way.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteSegment {
    pub edge:       EdgeId,
    pub from:       GeoPoint,
    pub to:         GeoPoint,
    pub way_id:     OsmId,
    pub name:       Option<String>,
    pub highway:    String,
    pub distance_m: f64,
    pub time_s:     f64,
}

impl Route {
    /// Zero-length route that starts and ends at `vertex`.
    pub fn trivial(vertex: VertexId) -> Self {
        Route { vertices: vec![vertex], edges: Vec::new(), distance_m: 0.0, time_s: 0.0 }
    }

    /// Build a route from `origin` along `edges`, summing lengths and times.
    pub fn from_edges(graph: &RoadGraph, origin: VertexId, edges: Vec<EdgeId>) -> Self {
        let mut vertices = Vec::with_capacity(edges.len() + 1);
        vertices.push(origin);
        let mut distance_m = 0.0;
        let mut time_s = 0.0;
        for &e in &edges {
            debug_assert_eq!(graph.edge_from[e.index()], *vertices.last().unwrap_or(&origin));
            vertices.push(graph.edge_to[e.index()]);
            distance_m += graph.edge_length_m[e.index()];
            time_s += graph.edge_time_s[e.index()];
        }
        Route { vertices, edges, distance_m, time_s }
    }

    pub fn origin(&self) -> VertexId {
        self.vertices[0]
    }

    pub fn destination(&self) -> VertexId {
        self.vertices[self.vertices.len() - 1]
    }

    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// Total under the given criterion.
    pub fn cost(&self, optimize: Optimize) -> f64 {
        match optimize {
            Optimize::Time     => self.time_s,
            Optimize::Distance => self.distance_m,
        }
    }

    /// Append `leg`, which must start where `self` ends.
    pub fn extend(&mut self, leg: &Route) {
        debug_assert_eq!(self.destination(), leg.origin());
        self.vertices.extend_from_slice(&leg.vertices[1..]);
        self.edges.extend_from_slice(&leg.edges);
        self.distance_m += leg.distance_m;
        self.time_s += leg.time_s;
    }

    /// Ordered vertex coordinates.
    pub fn polyline(&self, graph: &RoadGraph) -> Vec<GeoPoint> {
        self.vertices.iter().map(|&v| graph.pos(v)).collect()
    }

    pub fn segments(&self, graph: &RoadGraph) -> Vec<RouteSegment> {
        self.edges
            .iter()
            .map(|&e| {
                let way = graph.way_of(e);
                RouteSegment {
                    edge: e,
                    from: graph.pos(graph.edge_from[e.index()]),
                    to: graph.pos(graph.edge_to[e.index()]),
                    way_id: way.osm_id,
                    name: way.name.clone(),
                    highway: way.highway.clone(),
                    distance_m: graph.edge_length_m[e.index()],
                    time_s: graph.edge_time_s[e.index()],
                }
            })
            .collect()
    }

    /// Way labels in travel order with consecutive repeats collapsed.
    pub fn way_transitions(&self, graph: &RoadGraph) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for &e in &self.edges {
            let label = graph.way_of(e).label();
            if names.last() != Some(&label) {
                names.push(label);
            }
        }
        names
    }

    /// Fraction of this route's edges that also appear in `other`.
    /// A trivial route has overlap 1 with anything.
    pub fn overlap(&self, other: &Route) -> f64 {
        if self.edges.is_empty() {
            return 1.0;
        }
        let shared = self.edges.iter().filter(|e| other.edges.contains(e)).count();
        shared as f64 / self.edges.len() as f64
    }
}

/// Result of a point-to-point search.
#[derive(Clone, Debug, PartialEq)]
pub enum PathOutcome {
    Found(Route),
    Unreachable,
}

impl PathOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            PathOutcome::Found(r) => Some(r),
            PathOutcome::Unreachable => None,
        }
    }

    pub fn into_route(self) -> Option<Route> {
        match self {
            PathOutcome::Found(r) => Some(r),
            PathOutcome::Unreachable => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PathOutcome::Found(_))
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable point-to-point path finder.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so they can be shared across Rayon
/// workers.
pub trait Router: Send + Sync {
    /// Minimum-cost route from `origin` to `destination`.
    ///
    /// `origin == destination` yields [`Route::trivial`].
    fn shortest_path(
        &self,
        graph: &RoadGraph,
        origin: VertexId,
        destination: VertexId,
        optimize: Optimize,
    ) -> PathOutcome;
}

/// Dijkstra with early termination once the destination is settled.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn shortest_path(
        &self,
        graph: &RoadGraph,
        origin: VertexId,
        destination: VertexId,
        optimize: Optimize,
    ) -> PathOutcome {
        if origin == destination {
            return PathOutcome::Found(Route::trivial(origin));
        }
        let tree = shortest_path_tree(graph, origin, &optimize, Some(destination), None);
        match tree.edges_to(graph, destination) {
            Some(edges) => PathOutcome::Found(Route::from_edges(graph, origin, edges)),
            None => PathOutcome::Unreachable,
        }
    }
}

/// Resolve two points and route between them.
///
/// # Errors
///
/// [`EmptyGraph`](osmnet_core::NetError::EmptyGraph) when the network has no
/// edges, [`Unresolved`](osmnet_core::NetError::Unresolved) when either point
/// has no vertex within the snapping radius.
pub fn route_between(
    network: &Network,
    router: &dyn Router,
    origin: GeoPoint,
    destination: GeoPoint,
    optimize: Optimize,
) -> NetResult<PathOutcome> {
    network.graph.ensure_routable()?;
    let from = network.resolve(origin, "origin")?;
    let to = network.resolve(destination, "destination")?;
    log::debug!("routing {from} -> {to} by {optimize}");
    Ok(router.shortest_path(&network.graph, from, to, optimize))
}
