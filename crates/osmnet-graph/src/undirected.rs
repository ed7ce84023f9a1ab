//! Undirected projection of a [`RoadGraph`].
//!
//! Connectivity, bridge detection and the network summary look at road
//! segments rather than directed edges.  Two directed edges between the
//! same vertex pair on the same way collapse into one undirected edge;
//! parallel segments from different ways stay distinct, so a pair of roads
//! between the same junctions is never reported as a bridge.

use osmnet_core::{EdgeId, VertexId};

use crate::network::RoadGraph;

/// One road segment.  `a < b` always holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UndirectedEdge {
    pub a:   VertexId,
    pub b:   VertexId,
    pub way: u32,
    /// Lowest directed edge id that maps onto this segment.
    pub rep: EdgeId,
}

impl UndirectedEdge {
    /// The endpoint opposite `v`.
    #[inline]
    pub fn other(&self, v: VertexId) -> VertexId {
        if v == self.a { self.b } else { self.a }
    }
}

/// Undirected adjacency in CSR form.
pub struct UndirectedGraph {
    pub edges: Vec<UndirectedEdge>,
    adj_start: Vec<u32>,
    /// `(neighbour, undirected edge index)`, grouped by vertex.
    adj: Vec<(VertexId, u32)>,
}

impl UndirectedGraph {
    pub fn from_graph(graph: &RoadGraph) -> Self {
        let mut edges: Vec<UndirectedEdge> = graph
            .edges()
            .map(|e| {
                let (u, v) = (graph.edge_from[e.index()], graph.edge_to[e.index()]);
                UndirectedEdge {
                    a: u.min(v),
                    b: u.max(v),
                    way: graph.edge_way[e.index()],
                    rep: e,
                }
            })
            .collect();
        edges.sort_by_key(|u| (u.a, u.b, u.way, u.rep));
        edges.dedup_by_key(|u| (u.a, u.b, u.way));

        let n = graph.vertex_count();
        let mut adj_start = vec![0u32; n + 1];
        for u in &edges {
            adj_start[u.a.index() + 1] += 1;
            adj_start[u.b.index() + 1] += 1;
        }
        for i in 1..=n {
            adj_start[i] += adj_start[i - 1];
        }

        let mut fill = adj_start.clone();
        let mut adj = vec![(VertexId::INVALID, 0u32); edges.len() * 2];
        for (i, u) in edges.iter().enumerate() {
            for (from, to) in [(u.a, u.b), (u.b, u.a)] {
                let slot = &mut fill[from.index()];
                adj[*slot as usize] = (to, i as u32);
                *slot += 1;
            }
        }

        UndirectedGraph { edges, adj_start, adj }
    }

    pub fn vertex_count(&self) -> usize {
        self.adj_start.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// `(neighbour, undirected edge index)` pairs of `v`.
    #[inline]
    pub fn neighbors(&self, v: VertexId) -> &[(VertexId, u32)] {
        let start = self.adj_start[v.index()] as usize;
        let end = self.adj_start[v.index() + 1] as usize;
        &self.adj[start..end]
    }

    /// Number of incident segments.
    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        (self.adj_start[v.index() + 1] - self.adj_start[v.index()]) as usize
    }

    /// Number of distinct neighbouring vertices.
    pub fn distinct_neighbors(&self, v: VertexId) -> usize {
        let mut seen: Vec<VertexId> = self.neighbors(v).iter().map(|&(n, _)| n).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}
