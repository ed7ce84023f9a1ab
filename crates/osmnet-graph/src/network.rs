//! Directed road graph and its builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `VertexId v`, its outgoing edges are the `EdgeId`s
//!
//! ```text
//! vertex_out_start[v] .. vertex_out_start[v+1]
//! ```
//!
//! All edge arrays are sorted by source vertex (stable with respect to
//! insertion order) and indexed by `EdgeId`, so identical builder input
//! always produces identical ids.
//!
//! Each edge refers to the way it came from through `edge_way`, an index
//! into `ways`.  Only the fixed [`WayInfo`] schema is kept; the raw tag maps
//! are dropped at build time.

use rustc_hash::FxHashMap;

use osmnet_core::{EdgeId, GeoPoint, ModeSet, NetError, NetResult, Optimize, OsmId, TravelMode, VertexId};

use crate::attrs::Oneway;

/// Way attributes retained on the graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WayInfo {
    pub osm_id:  OsmId,
    pub highway: String,
    pub name:    Option<String>,
    pub oneway:  Oneway,
}

impl WayInfo {
    pub fn new(osm_id: OsmId, highway: &str) -> Self {
        WayInfo { osm_id, highway: highway.to_owned(), name: None, oneway: Oneway::No }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    pub fn with_oneway(mut self, oneway: Oneway) -> Self {
        self.oneway = oneway;
        self
    }

    /// Display label: the name if present, else `"unnamed <class>"`.
    pub fn label(&self) -> String {
        match &self.name {
            Some(n) => n.clone(),
            None => format!("unnamed {}", self.highway),
        }
    }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Directed, mode-specific road graph in CSR format.
///
/// Fields are `pub` for indexed access on hot paths.  Construct through
/// [`build_graph`](crate::build_graph) or [`RoadGraphBuilder`].
#[derive(Clone, Debug)]
pub struct RoadGraph {
    /// Mode this graph was built for.
    pub mode: TravelMode,

    // ── Vertex data ───────────────────────────────────────────────────────
    pub vertex_pos: Vec<GeoPoint>,
    /// Source node id of each vertex.
    pub vertex_osm: Vec<OsmId>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// Length = `vertex_count + 1`.
    pub vertex_out_start: Vec<u32>,

    // ── Edge data ─────────────────────────────────────────────────────────
    pub edge_from:     Vec<VertexId>,
    pub edge_to:       Vec<VertexId>,
    pub edge_length_m: Vec<f64>,
    pub edge_time_s:   Vec<f64>,
    /// Index into `ways`.
    pub edge_way:      Vec<u32>,
    /// Every mode permitted to traverse the edge in this direction.
    pub edge_modes:    Vec<ModeSet>,

    pub ways: Vec<WayInfo>,

    osm_lookup: FxHashMap<OsmId, VertexId>,
}

impl RoadGraph {
    /// A graph with no vertices or edges.
    pub fn empty(mode: TravelMode) -> Self {
        RoadGraphBuilder::new(mode).build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertex_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_pos.is_empty()
    }

    /// Fail with [`NetError::EmptyGraph`] if nothing is routable.
    pub fn ensure_routable(&self) -> NetResult<()> {
        if self.edge_count() == 0 {
            return Err(NetError::EmptyGraph { mode: self.mode });
        }
        Ok(())
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Outgoing edges of `vertex`, in `EdgeId` order.
    #[inline]
    pub fn out_edges(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.vertex_out_start[vertex.index()];
        let end   = self.vertex_out_start[vertex.index() + 1];
        (start..end).map(EdgeId)
    }

    /// Iterator over every `VertexId`.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertex_count() as u32).map(VertexId)
    }

    /// Iterator over every `EdgeId`.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edge_count() as u32).map(EdgeId)
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    #[inline]
    pub fn pos(&self, vertex: VertexId) -> GeoPoint {
        self.vertex_pos[vertex.index()]
    }

    pub fn vertex_by_osm(&self, osm_id: OsmId) -> Option<VertexId> {
        self.osm_lookup.get(&osm_id).copied()
    }

    #[inline]
    pub fn way_of(&self, edge: EdgeId) -> &WayInfo {
        &self.ways[self.edge_way[edge.index()] as usize]
    }

    /// Edge cost under `optimize`.
    #[inline]
    pub fn weight(&self, edge: EdgeId, optimize: Optimize) -> f64 {
        match optimize {
            Optimize::Time     => self.edge_time_s[edge.index()],
            Optimize::Distance => self.edge_length_m[edge.index()],
        }
    }

    /// First edge `from → to`, if any.
    pub fn find_edge(&self, from: VertexId, to: VertexId) -> Option<EdgeId> {
        self.out_edges(from).find(|e| self.edge_to[e.index()] == to)
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// Vertices get sequential ids in insertion order.  Edges may be added in
/// any order; `build()` sorts them by source vertex and lays out the CSR
/// arrays.
///
/// # Example
///
/// ```
/// use osmnet_core::{GeoPoint, ModeSet, TravelMode};
/// use osmnet_graph::{RoadGraphBuilder, WayInfo};
///
/// let mut b = RoadGraphBuilder::new(TravelMode::Drive);
/// let a = b.add_vertex(1, GeoPoint::new(30.69, -88.04));
/// let c = b.add_vertex(2, GeoPoint::new(30.70, -88.03));
/// let way = b.add_way(WayInfo::new(10, "residential"));
/// b.add_segment(a, c, way, 1_200.0, 144.0, ModeSet::only(TravelMode::Drive));
/// let graph = b.build();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // both directions
/// ```
pub struct RoadGraphBuilder {
    mode:      TravelMode,
    positions: Vec<GeoPoint>,
    osm_ids:   Vec<OsmId>,
    ways:      Vec<WayInfo>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:     VertexId,
    to:       VertexId,
    way:      u32,
    length_m: f64,
    time_s:   f64,
    modes:    ModeSet,
}

impl RoadGraphBuilder {
    pub fn new(mode: TravelMode) -> Self {
        Self::with_capacity(mode, 0, 0)
    }

    pub fn with_capacity(mode: TravelMode, vertices: usize, edges: usize) -> Self {
        Self {
            mode,
            positions: Vec::with_capacity(vertices),
            osm_ids:   Vec::with_capacity(vertices),
            ways:      Vec::new(),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a vertex and return its `VertexId` (sequential from 0).
    pub fn add_vertex(&mut self, osm_id: OsmId, pos: GeoPoint) -> VertexId {
        let id = VertexId(self.positions.len() as u32);
        self.positions.push(pos);
        self.osm_ids.push(osm_id);
        id
    }

    /// Register a way and return the index edges refer to it by.
    pub fn add_way(&mut self, info: WayInfo) -> u32 {
        self.ways.push(info);
        (self.ways.len() - 1) as u32
    }

    /// Add a **directed** edge.  Self-loops are ignored.
    pub fn add_directed_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        way: u32,
        length_m: f64,
        time_s: f64,
        modes: ModeSet,
    ) {
        if from == to {
            return;
        }
        self.raw_edges.push(RawEdge { from, to, way, length_m, time_s, modes });
    }

    /// Add both directions of a two-way segment.
    pub fn add_segment(
        &mut self,
        a: VertexId,
        b: VertexId,
        way: u32,
        length_m: f64,
        time_s: f64,
        modes: ModeSet,
    ) {
        self.add_directed_edge(a, b, way, length_m, time_s, modes);
        self.add_directed_edge(b, a, way, length_m, time_s, modes);
    }

    pub fn vertex_pos(&self, id: VertexId) -> GeoPoint {
        self.positions[id.index()]
    }

    pub fn vertex_count(&self) -> usize { self.positions.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadGraph`].
    pub fn build(self) -> RoadGraph {
        let vertex_count = self.positions.len();

        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:     Vec<VertexId> = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<VertexId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>      = raw.iter().map(|e| e.length_m).collect();
        let edge_time_s:   Vec<f64>      = raw.iter().map(|e| e.time_s).collect();
        let edge_way:      Vec<u32>      = raw.iter().map(|e| e.way).collect();
        let edge_modes:    Vec<ModeSet>  = raw.iter().map(|e| e.modes).collect();

        let mut vertex_out_start = vec![0u32; vertex_count + 1];
        for e in &raw {
            vertex_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            vertex_out_start[i] += vertex_out_start[i - 1];
        }
        debug_assert_eq!(vertex_out_start[vertex_count] as usize, raw.len());

        let osm_lookup = self
            .osm_ids
            .iter()
            .enumerate()
            .map(|(i, &osm)| (osm, VertexId(i as u32)))
            .collect();

        RoadGraph {
            mode: self.mode,
            vertex_pos: self.positions,
            vertex_osm: self.osm_ids,
            vertex_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_time_s,
            edge_way,
            edge_modes,
            ways: self.ways,
            osm_lookup,
        }
    }
}
