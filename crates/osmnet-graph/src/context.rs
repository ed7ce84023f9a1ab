//! A built graph together with its spatial index.

use osmnet_core::{ElementSet, GeoPoint, NetError, NetResult, TravelMode, VertexId};

use crate::build::build_graph;
use crate::network::RoadGraph;
use crate::profile::RoutingProfiles;
use crate::spatial::SpatialIndex;

/// The immutable state every query runs against.
///
/// Built once per invocation; queries only ever borrow it.
pub struct Network {
    pub graph: RoadGraph,
    pub index: SpatialIndex,
    /// Exclusive snapping radius for point resolution, in metres.
    /// `None` snaps to the nearest vertex at any distance.
    pub max_snap_m: Option<f64>,
}

impl Network {
    pub fn build(elements: &ElementSet, mode: TravelMode, profiles: &RoutingProfiles) -> Self {
        Self::from_graph(build_graph(&elements.nodes, &elements.ways, mode, profiles))
    }

    pub fn from_graph(graph: RoadGraph) -> Self {
        let index = SpatialIndex::build(&graph);
        Network { graph, index, max_snap_m: None }
    }

    pub fn with_max_snap(mut self, max_snap_m: Option<f64>) -> Self {
        self.max_snap_m = max_snap_m;
        self
    }

    #[inline]
    pub fn mode(&self) -> TravelMode {
        self.graph.mode
    }

    /// Nearest vertex within the snapping radius, if any.
    pub fn try_resolve(&self, point: GeoPoint) -> Option<VertexId> {
        self.index.nearest_vertex(point, self.max_snap_m).map(|hit| hit.vertex)
    }

    /// Like [`try_resolve`](Self::try_resolve) but reports a miss as
    /// [`NetError::Unresolved`] naming `what` ("origin", "waypoint 3", ...).
    pub fn resolve(&self, point: GeoPoint, what: &str) -> NetResult<VertexId> {
        self.try_resolve(point).ok_or_else(|| NetError::Unresolved { what: what.to_owned(), point })
    }
}
