//! Penalty-based alternative routes.
//!
//! After each search, the weights of the edges it used are multiplied by a
//! penalty factor (never removed) and the search is repeated.  A candidate
//! is kept only if its edge overlap with every kept route is below the
//! threshold; a rejected candidate has its edges penalised with the squared
//! factor so the next search is pushed further away.  Search stops after `count`
//! routes or when the attempt budget runs out, whichever comes first.

use rustc_hash::FxHashMap;

use osmnet_core::{EdgeId, NetError, NetResult, Optimize, VertexId};
use osmnet_graph::RoadGraph;

use crate::dijkstra::{Penalized, shortest_path_tree};
use crate::route::Route;

/// Tuning for [`alternative_routes`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlternativesConfig {
    /// Multiplier applied to edges of each accepted route.
    pub penalty_factor: f64,
    /// Candidates whose overlap with a kept route reaches this fraction are
    /// rejected.
    pub max_overlap: f64,
    /// Hard ceiling on searches regardless of the requested count.
    pub max_attempts: usize,
}

impl Default for AlternativesConfig {
    fn default() -> Self {
        AlternativesConfig { penalty_factor: 2.0, max_overlap: 0.8, max_attempts: 64 }
    }
}

/// Up to `count` distinct routes, best first.
///
/// Costs on the returned routes are the true (unpenalised) totals.  An empty
/// vector means the destination is unreachable.  Fewer than `count` routes
/// is a normal result on networks without enough distinct paths.
///
/// # Errors
///
/// [`NetError::InvalidArgument`] if `count` is zero or the configuration is
/// out of range.
pub fn alternative_routes(
    graph: &RoadGraph,
    origin: VertexId,
    destination: VertexId,
    count: usize,
    optimize: Optimize,
    config: &AlternativesConfig,
) -> NetResult<Vec<Route>> {
    if count == 0 {
        return Err(NetError::InvalidArgument(
            "alternative route count must be at least 1".into(),
        ));
    }
    if config.penalty_factor.is_nan()
        || config.penalty_factor <= 1.0
        || !(0.0..=1.0).contains(&config.max_overlap)
    {
        return Err(NetError::InvalidArgument(format!(
            "penalty factor must exceed 1 and overlap must be within [0, 1], got {} and {}",
            config.penalty_factor, config.max_overlap
        )));
    }
    if origin == destination {
        return Ok(vec![Route::trivial(origin)]);
    }

    let attempts = count.saturating_mul(2).saturating_add(1).min(config.max_attempts.max(1));
    let mut factors: FxHashMap<EdgeId, f64> = FxHashMap::default();
    let mut accepted: Vec<Route> = Vec::new();

    for attempt in 0..attempts {
        if accepted.len() == count {
            break;
        }
        let weight = Penalized { base: optimize, factors: &factors };
        let tree = shortest_path_tree(graph, origin, &weight, Some(destination), None);
        let Some(edges) = tree.edges_to(graph, destination) else {
            break;
        };
        let candidate = Route::from_edges(graph, origin, edges);

        let distinct = accepted
            .iter()
            .all(|kept| kept.edges != candidate.edges && candidate.overlap(kept) < config.max_overlap);

        let factor = if distinct {
            config.penalty_factor
        } else {
            config.penalty_factor * config.penalty_factor
        };
        for &e in &candidate.edges {
            *factors.entry(e).or_insert(1.0) *= factor;
        }

        if distinct {
            accepted.push(candidate);
        } else {
            log::debug!("alternative attempt {attempt} rejected: overlaps a kept route");
        }
    }

    Ok(accepted)
}
