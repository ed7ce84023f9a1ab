//! N×N distance and time matrices.
//!
//! Each point is resolved once.  A point with no vertex in range, or a pair
//! with no path, yields `None` cells; neither fails the matrix.  Row `i`,
//! column `j` is the trip from point `i` to point `j`, in input order.

use osmnet_core::{GeoPoint, NetError, NetResult, Optimize, VertexId};
use osmnet_graph::{Network, RoadGraph};

use crate::dijkstra::shortest_path_tree;

#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    pub points:     Vec<GeoPoint>,
    /// Snapped vertex per point; `None` if it could not be resolved.
    pub vertices:   Vec<Option<VertexId>>,
    /// Criterion used to pick each path; both matrices describe that path.
    pub optimize:   Optimize,
    pub distance_m: Vec<Vec<Option<f64>>>,
    pub time_s:     Vec<Vec<Option<f64>>>,
}

impl DistanceMatrix {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of ordered pairs `(i, j)`, `i != j`, without a value.
    pub fn unreachable_pairs(&self) -> usize {
        self.distance_m
            .iter()
            .enumerate()
            .map(|(i, row)| row.iter().enumerate().filter(|&(j, c)| i != j && c.is_none()).count())
            .sum()
    }
}

type Row = (Vec<Option<f64>>, Vec<Option<f64>>);

fn matrix_row(
    graph: &RoadGraph,
    source: Option<VertexId>,
    targets: &[Option<VertexId>],
    optimize: Optimize,
) -> Row {
    let Some(source) = source else {
        return (vec![None; targets.len()], vec![None; targets.len()]);
    };
    let tree = shortest_path_tree(graph, source, &optimize, None, None);
    let dist = tree.accumulate(graph, |e| graph.edge_length_m[e.index()]);
    let time = tree.accumulate(graph, |e| graph.edge_time_s[e.index()]);

    let cell = |acc: &[f64], t: &Option<VertexId>| {
        t.and_then(|t| {
            let v = acc[t.index()];
            v.is_finite().then_some(v)
        })
    };
    (
        targets.iter().map(|t| cell(&dist, t)).collect(),
        targets.iter().map(|t| cell(&time, t)).collect(),
    )
}

/// Compute the matrices for `points`.
///
/// # Errors
///
/// [`NetError::TooFewPoints`] for fewer than two points and
/// [`NetError::EmptyGraph`] when the network has no edges.
pub fn distance_matrix(
    network: &Network,
    points: &[GeoPoint],
    optimize: Optimize,
) -> NetResult<DistanceMatrix> {
    if points.len() < 2 {
        return Err(NetError::TooFewPoints { what: "distance matrix", need: 2, got: points.len() });
    }
    network.graph.ensure_routable()?;

    let vertices: Vec<Option<VertexId>> = points.iter().map(|&p| network.try_resolve(p)).collect();
    let unresolved = vertices.iter().filter(|v| v.is_none()).count();
    if unresolved > 0 {
        log::warn!("{unresolved} matrix point(s) have no vertex in range; their cells stay empty");
    }

    let graph = &network.graph;

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Row> = vertices
        .iter()
        .map(|&src| matrix_row(graph, src, &vertices, optimize))
        .collect();

    #[cfg(feature = "parallel")]
    let rows: Vec<Row> = {
        use rayon::prelude::*;
        vertices
            .par_iter()
            .map(|&src| matrix_row(graph, src, &vertices, optimize))
            .collect()
    };

    let (distance_m, time_s) = rows.into_iter().unzip();
    Ok(DistanceMatrix { points: points.to_vec(), vertices, optimize, distance_m, time_s })
}
