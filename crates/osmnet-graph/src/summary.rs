//! Network overview figures for a built graph.

use std::collections::BTreeMap;

use osmnet_core::TravelMode;

use crate::network::RoadGraph;
use crate::undirected::UndirectedGraph;

/// Per-class segment count and length.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassSummary {
    pub segments: usize,
    pub length_m: f64,
}

/// Size and composition of one mode's graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkSummary {
    pub mode:           TravelMode,
    pub vertices:       usize,
    pub directed_edges: usize,
    /// Undirected road segments.
    pub segments:       usize,
    pub ways:           usize,
    pub total_length_m: f64,
    pub oneway_ways:    usize,
    /// Vertices joining three or more distinct neighbours.
    pub intersections:  usize,
    /// Vertices with exactly one incident segment.
    pub dead_ends:      usize,
    /// Keyed by `highway` class.
    pub by_class:       BTreeMap<String, ClassSummary>,
}

impl NetworkSummary {
    pub fn of(graph: &RoadGraph) -> Self {
        let undirected = UndirectedGraph::from_graph(graph);

        let mut by_class: BTreeMap<String, ClassSummary> = BTreeMap::new();
        let mut total_length_m = 0.0;
        for u in &undirected.edges {
            let length = graph.edge_length_m[u.rep.index()];
            let class = by_class.entry(graph.ways[u.way as usize].highway.clone()).or_default();
            class.segments += 1;
            class.length_m += length;
            total_length_m += length;
        }

        let mut intersections = 0;
        let mut dead_ends = 0;
        for v in graph.vertices() {
            if undirected.degree(v) == 1 {
                dead_ends += 1;
            }
            if undirected.distinct_neighbors(v) >= 3 {
                intersections += 1;
            }
        }

        NetworkSummary {
            mode: graph.mode,
            vertices: graph.vertex_count(),
            directed_edges: graph.edge_count(),
            segments: undirected.edge_count(),
            ways: graph.ways.len(),
            total_length_m,
            oneway_ways: graph.ways.iter().filter(|w| w.oneway.is_oneway()).count(),
            intersections,
            dead_ends,
            by_class,
        }
    }
}

impl std::fmt::Display for NetworkSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} network", self.mode)?;
        writeln!(f, "  vertices:       {}", self.vertices)?;
        writeln!(f, "  directed edges: {}", self.directed_edges)?;
        writeln!(f, "  segments:       {}", self.segments)?;
        writeln!(f, "  total length:   {:.2} km", self.total_length_m / 1_000.0)?;
        writeln!(f, "  intersections:  {}", self.intersections)?;
        write!(f, "  dead ends:      {}", self.dead_ends)?;
        Ok(())
    }
}

