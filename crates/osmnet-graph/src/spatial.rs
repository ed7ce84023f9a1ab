//! Nearest-vertex and nearest-segment queries.
//!
//! Points are indexed as Earth-centred Cartesian coordinates (see
//! [`GeoPoint::to_ecef`]).  Straight-line chord distance in that space is
//! monotone in great-circle distance, so the R-tree's nearest-neighbour order
//! is the haversine order.  Reported distances are always haversine metres.
//!
//! Exact distance ties between vertices resolve to the lowest `VertexId`.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use osmnet_core::geo::EARTH_RADIUS_M;
use osmnet_core::{EdgeId, GeoPoint, VertexId};

use crate::network::RoadGraph;
use crate::undirected::UndirectedGraph;

/// Chord slack when gathering tie candidates, in metres.
const CHORD_SLACK_M: f64 = 1e-3;
/// Haversine distances closer than this are treated as equal.
const TIE_EPS_M: f64 = 1e-6;
/// How far past the best segment candidate the scan continues, in metres.
/// Covers projection error; chord sagitta is added per index.
const SEGMENT_SLACK_M: f64 = 1.0;

// ── R-tree entries ────────────────────────────────────────────────────────────

#[derive(Clone)]
struct VertexEntry {
    point: [f64; 3],
    pos:   GeoPoint,
    id:    VertexId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        sq_dist(self.point, *point)
    }
}

#[derive(Clone)]
struct SegmentEntry {
    a:     [f64; 3],
    b:     [f64; 3],
    pos_a: GeoPoint,
    pos_b: GeoPoint,
    edge:  EdgeId,
}

impl RTreeObject for SegmentEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.a, self.b)
    }
}

impl PointDistance for SegmentEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let d = sub(self.b, self.a);
        let len2 = dot(d, d);
        let t = if len2 == 0.0 {
            0.0
        } else {
            (dot(sub(*point, self.a), d) / len2).clamp(0.0, 1.0)
        };
        let closest = [self.a[0] + t * d[0], self.a[1] + t * d[1], self.a[2] + t * d[2]];
        sq_dist(closest, *point)
    }
}

#[inline]
fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn sq_dist(a: [f64; 3], b: [f64; 3]) -> f64 {
    let d = sub(a, b);
    dot(d, d)
}

// ── Query results ─────────────────────────────────────────────────────────────

/// Nearest-vertex answer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VertexHit {
    pub vertex:     VertexId,
    pub distance_m: f64,
}

/// Nearest-segment answer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeHit {
    /// Representative directed edge of the segment.
    pub edge:       EdgeId,
    /// Closest point on the segment.
    pub snapped:    GeoPoint,
    pub distance_m: f64,
}

// ── SpatialIndex ──────────────────────────────────────────────────────────────

/// R-trees over the vertices and road segments of one [`RoadGraph`].
///
/// Built once per graph and read-only afterwards, so it can be shared
/// across threads.
pub struct SpatialIndex {
    vertices:      RTree<VertexEntry>,
    segments:      RTree<SegmentEntry>,
    /// Largest depth of any segment's straight chord below the surface.
    max_sagitta_m: f64,
}

impl SpatialIndex {
    pub fn build(graph: &RoadGraph) -> Self {
        let vertex_entries: Vec<VertexEntry> = graph
            .vertices()
            .map(|v| {
                let pos = graph.pos(v);
                VertexEntry { point: pos.to_ecef(), pos, id: v }
            })
            .collect();

        let segment_entries: Vec<SegmentEntry> = UndirectedGraph::from_graph(graph)
            .edges
            .iter()
            .map(|u| {
                let (pos_a, pos_b) = (graph.pos(u.a), graph.pos(u.b));
                SegmentEntry {
                    a: pos_a.to_ecef(),
                    b: pos_b.to_ecef(),
                    pos_a,
                    pos_b,
                    edge: u.rep,
                }
            })
            .collect();

        // A chord of length c dips c²/8R below the sphere at its midpoint.
        let max_sagitta_m = segment_entries
            .iter()
            .map(|s| sq_dist(s.a, s.b) / (8.0 * EARTH_RADIUS_M))
            .fold(0.0, f64::max);

        SpatialIndex {
            vertices: RTree::bulk_load(vertex_entries),
            segments: RTree::bulk_load(segment_entries),
            max_sagitta_m,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.size() == 0
    }

    /// Nearest vertex to `point`, optionally only if strictly closer than
    /// `max_distance_m`.  `None` when the index is empty.
    pub fn nearest_vertex(&self, point: GeoPoint, max_distance_m: Option<f64>) -> Option<VertexHit> {
        let query = point.to_ecef();
        let mut iter = self.vertices.nearest_neighbor_iter_with_distance_2(&query);
        let (first, first_d2) = iter.next()?;

        let cutoff = first_d2.sqrt() + CHORD_SLACK_M;
        let mut candidates = vec![first];
        for (entry, d2) in iter {
            if d2.sqrt() > cutoff {
                break;
            }
            candidates.push(entry);
        }

        let dists: Vec<f64> = candidates.iter().map(|c| point.distance_m(c.pos)).collect();
        let best_d = dists.iter().copied().fold(f64::INFINITY, f64::min);
        let (vertex, distance_m) = candidates
            .iter()
            .zip(&dists)
            .filter(|&(_, &d)| d <= best_d + TIE_EPS_M)
            .map(|(c, &d)| (c.id, d))
            .min_by_key(|&(id, _)| id)?;

        match max_distance_m {
            Some(max) if distance_m >= max => None,
            _ => Some(VertexHit { vertex, distance_m }),
        }
    }

    /// Nearest road segment to `point` whose representative edge passes
    /// `filter`.
    ///
    /// The snapped point is the orthogonal projection onto the segment,
    /// clamped to its endpoints.  Equal distances resolve to the lower edge id.
    pub fn nearest_edge<F>(
        &self,
        point: GeoPoint,
        max_distance_m: Option<f64>,
        filter: F,
    ) -> Option<EdgeHit>
    where
        F: Fn(EdgeId) -> bool,
    {
        let query = point.to_ecef();
        let slack = SEGMENT_SLACK_M + self.max_sagitta_m;
        let mut best: Option<EdgeHit> = None;

        // Distance to a long chord can exceed the surface distance by up to
        // the sagitta, so both cut-offs are widened by it.
        for (entry, d2) in self.segments.nearest_neighbor_iter_with_distance_2(&query) {
            let chord = d2.sqrt();
            if let Some(max) = max_distance_m {
                if chord >= max + slack {
                    break;
                }
            }
            if let Some(b) = &best {
                if chord > b.distance_m + slack {
                    break;
                }
            }
            if !filter(entry.edge) {
                continue;
            }

            let (snapped, distance_m) = point.project_onto_segment(entry.pos_a, entry.pos_b);
            let better = match &best {
                None => true,
                Some(b) => {
                    distance_m < b.distance_m - TIE_EPS_M
                        || (distance_m <= b.distance_m + TIE_EPS_M && entry.edge < b.edge)
                }
            };
            if better {
                best = Some(EdgeHit { edge: entry.edge, snapped, distance_m });
            }
        }

        match (best, max_distance_m) {
            (Some(hit), Some(max)) if hit.distance_m >= max => None,
            (hit, _) => hit,
        }
    }
}
