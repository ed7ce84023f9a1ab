//! Bridges and articulation points of the undirected projection.
//!
//! A bridge is a road segment whose removal disconnects its component; an
//! articulation point is a vertex whose removal does.  Both come out of one
//! iterative low-link depth-first search, so deep networks cannot overflow
//! the call stack.
//!
//! Bridges are ranked by the vertex count on the smaller side of the cut,
//! which favours segments that strand a large part of the network over
//! cul-de-sac stubs.  Articulation points are ranked by how many extra
//! components their removal creates.

use osmnet_core::{GeoPoint, OsmId, VertexId};
use osmnet_graph::{RoadGraph, UndirectedEdge, UndirectedGraph};

const UNSEEN: u32 = u32::MAX;
const NO_EDGE: u32 = u32::MAX;

/// Raw scan output in undirected-graph terms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BridgeScan {
    /// `(undirected edge index, vertices on the smaller side)`, in discovery order.
    pub bridges:      Vec<(u32, usize)>,
    /// `(vertex, extra components on removal)`, ascending by vertex.
    pub articulation: Vec<(VertexId, usize)>,
}

pub fn scan_bridges(ug: &UndirectedGraph) -> BridgeScan {
    let n = ug.vertex_count();
    let mut disc = vec![UNSEEN; n];
    let mut low = vec![0u32; n];
    let mut size = vec![1usize; n];
    let mut cut_children = vec![0usize; n];
    let mut is_root = vec![false; n];
    let mut timer = 0u32;

    let mut scan = BridgeScan::default();
    // (vertex, tree edge into it, next neighbour slot)
    let mut stack: Vec<(VertexId, u32, usize)> = Vec::new();

    for root in 0..n {
        if disc[root] != UNSEEN {
            continue;
        }
        is_root[root] = true;
        disc[root] = timer;
        low[root] = timer;
        timer += 1;
        stack.push((VertexId(root as u32), NO_EDGE, 0));

        // (edge, child below the cut)
        let mut pending: Vec<(u32, VertexId)> = Vec::new();

        while let Some(top) = stack.last_mut() {
            let (v, via, slot) = *top;
            let neighbours = ug.neighbors(v);
            if slot < neighbours.len() {
                top.2 += 1;
                let (w, e) = neighbours[slot];
                if e == via {
                    continue;
                }
                if disc[w.index()] == UNSEEN {
                    disc[w.index()] = timer;
                    low[w.index()] = timer;
                    timer += 1;
                    stack.push((w, e, 0));
                } else {
                    low[v.index()] = low[v.index()].min(disc[w.index()]);
                }
                continue;
            }

            stack.pop();
            if let Some(&(parent, _, _)) = stack.last() {
                let (p, c) = (parent.index(), v.index());
                low[p] = low[p].min(low[c]);
                size[p] += size[c];
                if low[c] > disc[p] {
                    pending.push((via, v));
                }
                if low[c] >= disc[p] {
                    cut_children[p] += 1;
                }
            }
        }

        let total = size[root];
        for (edge, child) in pending {
            let below = size[child.index()];
            scan.bridges.push((edge, below.min(total - below)));
        }
    }

    for v in 0..n {
        // Removing a DFS root splits it into one piece per tree child.
        let extra = if is_root[v] { cut_children[v].saturating_sub(1) } else { cut_children[v] };
        if extra > 0 {
            scan.articulation.push((VertexId(v as u32), extra));
        }
    }
    scan
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BottleneckConfig {
    /// Entries kept in each ranking.
    pub top_n: usize,
}

impl Default for BottleneckConfig {
    fn default() -> Self {
        Self { top_n: 20 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bridge {
    pub segment:    UndirectedEdge,
    pub way_id:     OsmId,
    pub road:       String,
    pub highway:    String,
    pub from:       GeoPoint,
    pub to:         GeoPoint,
    pub length_m:   f64,
    /// Vertices cut off on the smaller side.
    pub importance: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArticulationPoint {
    pub vertex:           VertexId,
    pub osm_id:           OsmId,
    pub pos:              GeoPoint,
    pub extra_components: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BottleneckReport {
    pub segments:            usize,
    pub bridge_count:        usize,
    pub articulation_count:  usize,
    /// Top bridges, most important first.
    pub bridges:             Vec<Bridge>,
    /// Top articulation points, most disruptive first.
    pub articulation_points: Vec<ArticulationPoint>,
}

pub fn bottlenecks(graph: &RoadGraph, config: &BottleneckConfig) -> BottleneckReport {
    let ug = UndirectedGraph::from_graph(graph);
    let scan = scan_bridges(&ug);

    let mut ranked = scan.bridges.clone();
    ranked.sort_by(|&(ea, ia), &(eb, ib)| {
        let (sa, sb) = (&ug.edges[ea as usize], &ug.edges[eb as usize]);
        ib.cmp(&ia).then((sa.a, sa.b, sa.way).cmp(&(sb.a, sb.b, sb.way)))
    });
    let bridges = ranked
        .iter()
        .take(config.top_n)
        .map(|&(e, importance)| {
            let segment = ug.edges[e as usize];
            let way = graph.way_of(segment.rep);
            Bridge {
                segment,
                way_id: way.osm_id,
                road: way.label(),
                highway: way.highway.clone(),
                from: graph.pos(segment.a),
                to: graph.pos(segment.b),
                length_m: graph.edge_length_m[segment.rep.index()],
                importance,
            }
        })
        .collect();

    let mut points = scan.articulation.clone();
    points.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let articulation_points = points
        .iter()
        .take(config.top_n)
        .map(|&(vertex, extra_components)| ArticulationPoint {
            vertex,
            osm_id: graph.vertex_osm[vertex.index()],
            pos: graph.pos(vertex),
            extra_components,
        })
        .collect();

    log::debug!(
        "bottlenecks: {} bridges, {} articulation points over {} segments",
        scan.bridges.len(),
        scan.articulation.len(),
        ug.edge_count()
    );
    BottleneckReport {
        segments: ug.edge_count(),
        bridge_count: scan.bridges.len(),
        articulation_count: scan.articulation.len(),
        bridges,
        articulation_points,
    }
}
