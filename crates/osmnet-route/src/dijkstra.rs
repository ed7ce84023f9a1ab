//! Single-source Dijkstra over the CSR graph.
//!
//! Every search in this crate (point-to-point, matrix rows, alternatives,
//! isochrones) and the sampled centrality in `osmnet-analysis` goes through
//! [`shortest_path_tree`].  The priority queue orders by `(cost, vertex)`, so
//! equal-cost frontiers always pop in vertex-id order and the resulting tree
//! is deterministic.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use osmnet_core::{EdgeId, Optimize, VertexId};
use osmnet_graph::RoadGraph;

// ── Edge weights ──────────────────────────────────────────────────────────────

/// Cost of traversing one edge.  Must be non-negative.
pub trait EdgeWeight: Sync {
    fn weight(&self, graph: &RoadGraph, edge: EdgeId) -> f64;
}

impl EdgeWeight for Optimize {
    #[inline]
    fn weight(&self, graph: &RoadGraph, edge: EdgeId) -> f64 {
        graph.weight(edge, *self)
    }
}

/// Base weight multiplied by a per-edge factor (1.0 when absent).
pub struct Penalized<'a> {
    pub base:    Optimize,
    pub factors: &'a FxHashMap<EdgeId, f64>,
}

impl EdgeWeight for Penalized<'_> {
    #[inline]
    fn weight(&self, graph: &RoadGraph, edge: EdgeId) -> f64 {
        let factor = self.factors.get(&edge).copied().unwrap_or(1.0);
        graph.weight(edge, self.base) * factor
    }
}

// ── Queue key ─────────────────────────────────────────────────────────────────

/// `f64` with a total order, for the binary heap.
#[derive(Copy, Clone, PartialEq, Debug)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// ── Shortest-path tree ────────────────────────────────────────────────────────

/// Result of one Dijkstra run.
pub struct ShortestPathTree {
    pub source: VertexId,
    /// Best known cost per vertex; `f64::INFINITY` where unreached.  Final
    /// for every settled vertex; a search stopped early at its target may
    /// leave provisional costs on the frontier.
    pub cost: Vec<f64>,
    /// Tree edge into each vertex; `EdgeId::INVALID` for the source and
    /// unreached vertices.
    pub prev_edge: Vec<EdgeId>,
    /// Vertices in the order they were settled (non-decreasing cost).
    pub settled: Vec<VertexId>,
}

impl ShortestPathTree {
    #[inline]
    pub fn reached(&self, v: VertexId) -> bool {
        self.cost[v.index()].is_finite()
    }

    pub fn cost_to(&self, v: VertexId) -> Option<f64> {
        let c = self.cost[v.index()];
        c.is_finite().then_some(c)
    }

    /// Edge sequence from the source to `target`, or `None` if unreached.
    pub fn edges_to(&self, graph: &RoadGraph, target: VertexId) -> Option<Vec<EdgeId>> {
        if !self.reached(target) {
            return None;
        }
        let mut edges = Vec::new();
        let mut cur = target;
        loop {
            let e = self.prev_edge[cur.index()];
            if !e.is_valid() {
                break;
            }
            edges.push(e);
            cur = graph.edge_from[e.index()];
        }
        edges.reverse();
        Some(edges)
    }

    /// Sum `value(edge)` along every tree path.  Entries for unreached
    /// vertices are `f64::INFINITY`.
    pub fn accumulate<F>(&self, graph: &RoadGraph, value: F) -> Vec<f64>
    where
        F: Fn(EdgeId) -> f64,
    {
        let mut acc = vec![f64::INFINITY; self.cost.len()];
        for &v in &self.settled {
            let e = self.prev_edge[v.index()];
            acc[v.index()] = if e.is_valid() {
                acc[graph.edge_from[e.index()].index()] + value(e)
            } else {
                0.0
            };
        }
        acc
    }
}

/// Run Dijkstra from `source`.
///
/// - `target`: stop as soon as this vertex is settled.
/// - `max_cost`: never settle a vertex whose cost exceeds this bound.
///
/// Vertices are only relaxed on a strictly smaller cost, so among equal-cost
/// paths the first one discovered wins.
pub fn shortest_path_tree<W>(
    graph: &RoadGraph,
    source: VertexId,
    weight: &W,
    target: Option<VertexId>,
    max_cost: Option<f64>,
) -> ShortestPathTree
where
    W: EdgeWeight + ?Sized,
{
    let n = graph.vertex_count();
    let limit = max_cost.unwrap_or(f64::INFINITY);

    let mut cost = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];
    let mut settled = Vec::new();

    cost[source.index()] = 0.0;

    let mut heap: BinaryHeap<Reverse<(Cost, VertexId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), source)));

    while let Some(Reverse((Cost(c), v))) = heap.pop() {
        // Skip stale heap entries.
        if c > cost[v.index()] {
            continue;
        }
        settled.push(v);
        if Some(v) == target {
            break;
        }

        for edge in graph.out_edges(v) {
            let next = graph.edge_to[edge.index()];
            let new_cost = c + weight.weight(graph, edge);
            if new_cost < cost[next.index()] && new_cost <= limit {
                cost[next.index()] = new_cost;
                prev_edge[next.index()] = edge;
                heap.push(Reverse((Cost(new_cost), next)));
            }
        }
    }

    ShortestPathTree { source, cost, prev_edge, settled }
}
