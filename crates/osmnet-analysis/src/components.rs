//! Connected components of the undirected projection.
//!
//! Components are found with a union-find over road segments.  Component
//! numbering follows the smallest vertex id in each component, and every
//! reported aggregate (count, sorted sizes) is independent of how vertices
//! happen to be numbered.

use osmnet_core::VertexId;
use osmnet_graph::{RoadGraph, UndirectedGraph};

/// Disjoint-set forest with path halving and union by size.
struct DisjointSets {
    parent: Vec<u32>,
    size:   Vec<u32>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        DisjointSets { parent: (0..n as u32).collect(), size: vec![1; n] }
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        let (big, small) = if self.size[ra as usize] >= self.size[rb as usize] { (ra, rb) } else { (rb, ra) };
        self.parent[small as usize] = big;
        self.size[big as usize] += self.size[small as usize];
    }
}

/// Component membership of every vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Components {
    /// Component index per vertex.  Component `0` holds vertex 0, and
    /// indices increase with each component's smallest vertex.
    pub labels: Vec<u32>,
    /// Vertex count per component index.
    pub sizes:  Vec<usize>,
}

impl Components {
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Index of the largest component; ties go to the lower index.
    pub fn largest(&self) -> Option<u32> {
        let mut best: Option<(usize, u32)> = None;
        for (i, &s) in self.sizes.iter().enumerate() {
            if best.is_none_or(|(bs, _)| s > bs) {
                best = Some((s, i as u32));
            }
        }
        best.map(|(_, i)| i)
    }

    /// Vertices of component `label`, ascending.
    pub fn members(&self, label: u32) -> Vec<VertexId> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == label)
            .map(|(v, _)| VertexId(v as u32))
            .collect()
    }
}

pub fn connected_components(ug: &UndirectedGraph) -> Components {
    let n = ug.vertex_count();
    let mut sets = DisjointSets::new(n);
    for e in &ug.edges {
        sets.union(e.a.0, e.b.0);
    }

    let mut label_of_root = vec![u32::MAX; n];
    let mut labels = Vec::with_capacity(n);
    let mut sizes: Vec<usize> = Vec::new();
    for v in 0..n as u32 {
        let root = sets.find(v) as usize;
        if label_of_root[root] == u32::MAX {
            label_of_root[root] = sizes.len() as u32;
            sizes.push(0);
        }
        let label = label_of_root[root];
        sizes[label as usize] += 1;
        labels.push(label);
    }
    Components { labels, sizes }
}

/// Connectivity summary of a network.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectivityReport {
    pub vertices:       usize,
    pub num_components: usize,
    /// Exactly one component.  An empty graph is not connected.
    pub is_connected:   bool,
    /// Component sizes, largest first.
    pub sizes:          Vec<usize>,
    pub largest_size:   usize,
    /// Share of vertices in the largest component, `0.0` for an empty graph.
    pub largest_share:  f64,
    /// Vertices with exactly one incident road segment.
    pub dead_ends:      usize,
}

pub fn connectivity(graph: &RoadGraph) -> ConnectivityReport {
    let ug = UndirectedGraph::from_graph(graph);
    let comps = connected_components(&ug);

    let mut sizes = comps.sizes.clone();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    let largest_size = sizes.first().copied().unwrap_or(0);
    let vertices = graph.vertex_count();
    let dead_ends = graph.vertices().filter(|&v| ug.degree(v) == 1).count();

    log::debug!("connectivity: {} components over {vertices} vertices", sizes.len());
    ConnectivityReport {
        vertices,
        num_components: sizes.len(),
        is_connected: sizes.len() == 1,
        largest_share: if vertices == 0 { 0.0 } else { largest_size as f64 / vertices as f64 },
        largest_size,
        sizes,
        dead_ends,
    }
}
