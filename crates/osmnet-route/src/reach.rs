//! Reachability sets and isochrone boundaries.
//!
//! One time-weighted Dijkstra from the origin, bounded by the largest
//! threshold, gives every vertex's earliest arrival.  Each threshold then
//! selects the vertices arriving within it.
//!
//! # Boundary
//!
//! The plane around the origin is cut into `resolution` equal bearing
//! sectors.  For each sector the boundary has one vertex on the sector's
//! centre bearing, at the distance of the farthest reached vertex whose
//! bearing falls in that sector (0 when the sector is empty).  Because
//! every threshold uses the same bearings and a larger threshold can only
//! grow each sector's radius, the boundary for a smaller threshold is always
//! inside the boundary for a larger one.  When nothing beyond the origin is
//! reached the boundary degenerates to the origin point alone.

use osmnet_core::{GeoPoint, NetError, NetResult, Optimize, VertexId};
use osmnet_graph::RoadGraph;

use crate::dijkstra::shortest_path_tree;

/// Tuning for isochrone boundaries.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsochroneConfig {
    /// Number of bearing sectors (at least 3).
    pub resolution: usize,
}

impl Default for IsochroneConfig {
    fn default() -> Self {
        IsochroneConfig { resolution: 36 }
    }
}

/// Everything reachable within one threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct IsochroneBand {
    pub threshold_s:    f64,
    /// Reached vertices, ascending id.  Always contains the origin.
    pub vertices:       Vec<VertexId>,
    /// Farthest straight-line distance of a reached vertex.
    pub max_distance_m: f64,
    /// Open ring of `resolution` points, or the single origin point when
    /// nothing beyond the origin is reached.
    pub boundary:       Vec<GeoPoint>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Isochrone {
    pub origin: VertexId,
    pub center: GeoPoint,
    /// One band per distinct threshold, ascending.
    pub bands:  Vec<IsochroneBand>,
}

/// Sort, de-duplicate, and validate thresholds (seconds).
fn normalize_thresholds(thresholds_s: &[f64]) -> NetResult<Vec<f64>> {
    if thresholds_s.is_empty() {
        return Err(NetError::InvalidArgument("at least one time threshold is required".into()));
    }
    if let Some(bad) = thresholds_s.iter().find(|t| !t.is_finite() || **t < 0.0) {
        return Err(NetError::InvalidArgument(format!(
            "time threshold {bad} must be a non-negative number of seconds"
        )));
    }
    let mut sorted = thresholds_s.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    Ok(sorted)
}

fn validate_config(config: &IsochroneConfig) -> NetResult<()> {
    if config.resolution < 3 {
        return Err(NetError::InvalidArgument(format!(
            "isochrone resolution must be at least 3, got {}",
            config.resolution
        )));
    }
    Ok(())
}

/// Compute the isochrone of `origin` for every threshold.
///
/// # Errors
///
/// [`NetError::InvalidArgument`] on an empty or negative threshold list or
/// a resolution below 3.
pub fn isochrone(
    graph: &RoadGraph,
    origin: VertexId,
    thresholds_s: &[f64],
    config: &IsochroneConfig,
) -> NetResult<Isochrone> {
    let thresholds = normalize_thresholds(thresholds_s)?;
    validate_config(config)?;
    Ok(compute(graph, origin, &thresholds, config.resolution))
}

/// [`isochrone`] for several origins, results in input order.
pub fn batch_isochrones(
    graph: &RoadGraph,
    origins: &[VertexId],
    thresholds_s: &[f64],
    config: &IsochroneConfig,
) -> NetResult<Vec<Isochrone>> {
    let thresholds = normalize_thresholds(thresholds_s)?;
    validate_config(config)?;
    let resolution = config.resolution;

    #[cfg(not(feature = "parallel"))]
    let out = origins
        .iter()
        .map(|&o| compute(graph, o, &thresholds, resolution))
        .collect();

    #[cfg(feature = "parallel")]
    let out = {
        use rayon::prelude::*;
        origins
            .par_iter()
            .map(|&o| compute(graph, o, &thresholds, resolution))
            .collect()
    };

    Ok(out)
}

fn compute(graph: &RoadGraph, origin: VertexId, thresholds: &[f64], resolution: usize) -> Isochrone {
    let limit = thresholds[thresholds.len() - 1];
    let tree = shortest_path_tree(graph, origin, &Optimize::Time, None, Some(limit));
    let center = graph.pos(origin);
    let sector_width = 360.0 / resolution as f64;

    // Settled order is non-decreasing in arrival time, so each band is a
    // prefix of it.
    let reached: Vec<(VertexId, f64, usize, f64)> = tree
        .settled
        .iter()
        .map(|&v| {
            let pos = graph.pos(v);
            let dist = center.distance_m(pos);
            let sector = if dist > 0.0 {
                ((center.bearing_deg(pos) / sector_width) as usize).min(resolution - 1)
            } else {
                0
            };
            (v, tree.cost[v.index()], sector, dist)
        })
        .collect();

    let mut radii = vec![0.0f64; resolution];
    let mut taken = 0usize;
    let mut bands = Vec::with_capacity(thresholds.len());
    for &threshold_s in thresholds {
        while taken < reached.len() && reached[taken].1 <= threshold_s {
            let (_, _, sector, dist) = reached[taken];
            radii[sector] = radii[sector].max(dist);
            taken += 1;
        }

        let mut vertices: Vec<VertexId> = reached[..taken].iter().map(|r| r.0).collect();
        vertices.sort_unstable();

        let max_distance_m = radii.iter().copied().fold(0.0, f64::max);
        let boundary = if max_distance_m == 0.0 {
            vec![center]
        } else {
            radii
                .iter()
                .enumerate()
                .map(|(i, &r)| center.destination((i as f64 + 0.5) * sector_width, r))
                .collect()
        };

        bands.push(IsochroneBand { threshold_s, vertices, max_distance_m, boundary });
    }

    log::debug!("isochrone from {origin}: {} vertices within {limit} s", taken);
    Isochrone { origin, center, bands }
}
