//! Detour factor: network distance over straight-line distance.
//!
//! Both distances are measured between graph vertices, so a factor of 1.0
//! means the road runs dead straight between the two snapped vertices.

use std::fmt;

use osmnet_core::{GeoPoint, NetError, NetResult, Optimize, SampleRng, VertexId};
use osmnet_graph::{Network, RoadGraph, UndirectedGraph};
use osmnet_route::shortest_path_tree;

use crate::components::connected_components;

/// Draws allowed per requested sample pair.
const ATTEMPTS_PER_PAIR: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct DetourFactor {
    pub origin:      VertexId,
    pub destination: VertexId,
    pub straight_m:  f64,
    pub network_m:   f64,
    pub factor:      f64,
}

/// Detour factor between two vertices.
///
/// `None` when the destination is unreachable or the vertices coincide.
pub fn detour_between(graph: &RoadGraph, origin: VertexId, destination: VertexId) -> Option<DetourFactor> {
    let straight_m = graph.pos(origin).distance_m(graph.pos(destination));
    if straight_m <= 0.0 {
        return None;
    }
    let tree = shortest_path_tree(graph, origin, &Optimize::Distance, Some(destination), None);
    let network_m = tree.cost_to(destination)?;
    Some(DetourFactor { origin, destination, straight_m, network_m, factor: network_m / straight_m })
}

/// Detour factor between two points, each snapped to its nearest vertex.
///
/// # Errors
///
/// [`NetError::EmptyGraph`] or [`NetError::Unresolved`].  An unreachable
/// pair is `Ok(None)`.
pub fn detour_factor(network: &Network, origin: GeoPoint, destination: GeoPoint) -> NetResult<Option<DetourFactor>> {
    network.graph.ensure_routable()?;
    let o = network.resolve(origin, "origin")?;
    let d = network.resolve(destination, "destination")?;
    Ok(detour_between(&network.graph, o, d))
}

// ── Network-wide statistics ───────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetourSampleConfig {
    /// Requested number of sampled pairs.
    pub pairs:          usize,
    /// Pairs closer than this are skipped.
    pub min_straight_m: f64,
    pub seed:           u64,
}

impl Default for DetourSampleConfig {
    fn default() -> Self {
        Self { pairs: 100, min_straight_m: 100.0, seed: 42 }
    }
}

/// Qualitative reading of a mean detour factor.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DetourRating {
    Excellent,
    Good,
    Average,
    Poor,
}

impl DetourRating {
    pub fn from_mean(mean: f64) -> Self {
        if mean < 1.2 {
            DetourRating::Excellent
        } else if mean < 1.4 {
            DetourRating::Good
        } else if mean < 1.6 {
            DetourRating::Average
        } else {
            DetourRating::Poor
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            DetourRating::Excellent => "excellent network directness",
            DetourRating::Good      => "good network directness",
            DetourRating::Average   => "average network directness",
            DetourRating::Poor      => "poor network directness (many detours required)",
        }
    }
}

impl fmt::Display for DetourRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetourStats {
    /// Vertices in the component the pairs were drawn from.
    pub component_size: usize,
    /// Accepted samples, in draw order.
    pub samples:        Vec<DetourFactor>,
    pub mean:           f64,
    pub median:         f64,
    pub min:            f64,
    pub max:            f64,
    pub p10:            f64,
    pub p90:            f64,
}

impl DetourStats {
    pub fn rating(&self) -> DetourRating {
        DetourRating::from_mean(self.mean)
    }

    pub(crate) fn from_samples(component_size: usize, samples: Vec<DetourFactor>) -> Self {
        let mut sorted: Vec<f64> = samples.iter().map(|s| s.factor).collect();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        let at = |q: f64| sorted[((n as f64 * q) as usize).min(n - 1)];
        DetourStats {
            component_size,
            mean: sorted.iter().sum::<f64>() / n as f64,
            median: if n % 2 == 0 { (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0 } else { sorted[n / 2] },
            min: sorted[0],
            max: sorted[n - 1],
            p10: at(0.1),
            p90: at(0.9),
            samples,
        }
    }
}

/// Sample vertex pairs from the largest component and summarise their
/// detour factors.
///
/// At most `pairs` samples are taken, capped by the number of distinct pairs
/// in the component; draws that are too close or unreachable (possible
/// with oneway roads) are retried up to ten times the requested count.
///
/// # Errors
///
/// [`NetError::EmptyGraph`], [`NetError::InvalidArgument`] for zero pairs,
/// and [`NetError::NoResult`] when no pair could be measured.
pub fn detour_statistics(graph: &RoadGraph, config: &DetourSampleConfig) -> NetResult<DetourStats> {
    graph.ensure_routable()?;
    if config.pairs == 0 {
        return Err(NetError::InvalidArgument("detour sample must contain at least one pair".into()));
    }

    let comps = connected_components(&UndirectedGraph::from_graph(graph));
    let members = comps.largest().map(|l| comps.members(l)).unwrap_or_default();
    let m = members.len();
    if m < 2 {
        return Err(NetError::NoResult("no connected road network to sample".into()));
    }

    let wanted = config.pairs.min(m * (m - 1) / 2);
    let max_attempts = wanted * ATTEMPTS_PER_PAIR;
    log::info!("detour: sampling {wanted} pairs from a component of {m} vertices");

    let mut rng = SampleRng::new(config.seed);
    let mut samples = Vec::with_capacity(wanted);
    let mut attempts = 0;
    while samples.len() < wanted && attempts < max_attempts {
        attempts += 1;
        let i = rng.gen_range(0..m);
        let mut j = rng.gen_range(0..m - 1);
        if j >= i {
            j += 1;
        }
        let (o, d) = (members[i], members[j]);
        if graph.pos(o).distance_m(graph.pos(d)) < config.min_straight_m {
            continue;
        }
        if let Some(s) = detour_between(graph, o, d) {
            samples.push(s);
        }
    }
    log::debug!("detour: {} samples after {attempts} draws", samples.len());

    if samples.is_empty() {
        return Err(NetError::NoResult("no sampled pair could be routed".into()));
    }
    Ok(DetourStats::from_samples(m, samples))
}
