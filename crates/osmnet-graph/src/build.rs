//! Graph construction from map elements.
//!
//! # Rules
//!
//! - A way contributes edges only if its `highway` class is permitted by the
//!   requested mode's profile.
//! - Each consecutive pair of resolvable node refs becomes one segment.
//!   Refs whose node is missing (or has an invalid position) are skipped,
//!   which joins their neighbours directly.  Repeated consecutive refs are
//!   collapsed so no self-loop is created.
//! - Oneway restrictions suppress the reverse edge only when the profile
//!   honours them (drive by default).
//! - Vertices are created for every resolvable ref of every accepted way,
//!   in ascending source-id order, so identical input always yields
//!   identical vertex and edge ids.

use log::{debug, info};
use rustc_hash::FxHashMap;

use osmnet_core::{GeoPoint, ModeSet, OsmId, OsmNode, OsmWay, TravelMode};

use crate::attrs::WayAttrs;
use crate::network::{RoadGraph, RoadGraphBuilder, WayInfo};
use crate::profile::RoutingProfiles;

struct AcceptedWay<'a> {
    way:      &'a OsmWay,
    attrs:    WayAttrs,
    speed_ms: f64,
    refs:     Vec<OsmId>,
}

/// Build the directed graph for `mode`.
///
/// Never fails: map data that yields no usable roads produces an empty
/// graph, and callers decide how to report that (see
/// [`RoadGraph::ensure_routable`]).
pub fn build_graph(
    nodes: &[OsmNode],
    ways: &[OsmWay],
    mode: TravelMode,
    profiles: &RoutingProfiles,
) -> RoadGraph {
    let profile = profiles.get(mode);

    let mut positions: FxHashMap<OsmId, GeoPoint> = FxHashMap::default();
    positions.reserve(nodes.len());
    let mut bad_positions = 0usize;
    for node in nodes {
        let pos = node.pos();
        if !pos.is_valid() {
            bad_positions += 1;
            continue;
        }
        positions.entry(node.id).or_insert(pos);
    }
    if bad_positions > 0 {
        debug!("ignored {bad_positions} node(s) with invalid coordinates");
    }

    // ── Pass 1: filter ways by class, resolve refs ────────────────────────
    let mut ordered: Vec<&OsmWay> = ways.iter().collect();
    ordered.sort_by_key(|w| w.id);

    let mut accepted: Vec<AcceptedWay<'_>> = Vec::new();
    let mut unresolved_refs = 0usize;
    for way in ordered {
        let attrs = WayAttrs::from_tags(&way.tags);
        let Some(speed_kmh) = profile.speed_kmh(&attrs) else {
            continue;
        };

        let mut refs: Vec<OsmId> = Vec::with_capacity(way.refs.len());
        for &r in &way.refs {
            if !positions.contains_key(&r) {
                unresolved_refs += 1;
                continue;
            }
            if refs.last() != Some(&r) {
                refs.push(r);
            }
        }
        if refs.is_empty() {
            continue;
        }
        accepted.push(AcceptedWay { way, attrs, speed_ms: speed_kmh / 3.6, refs });
    }
    if unresolved_refs > 0 {
        debug!("skipped {unresolved_refs} unresolvable node reference(s)");
    }

    // ── Pass 2: vertices in ascending source-id order ─────────────────────
    let mut vertex_ids: Vec<OsmId> = accepted.iter().flat_map(|a| a.refs.iter().copied()).collect();
    vertex_ids.sort_unstable();
    vertex_ids.dedup();

    let mut builder = RoadGraphBuilder::with_capacity(mode, vertex_ids.len(), vertex_ids.len() * 2);
    let mut lookup = FxHashMap::default();
    lookup.reserve(vertex_ids.len());
    for osm_id in vertex_ids {
        let pos = positions[&osm_id];
        lookup.insert(osm_id, builder.add_vertex(osm_id, pos));
    }
    drop(positions);

    // ── Pass 3: edges ─────────────────────────────────────────────────────
    for a in &accepted {
        let highway = a.attrs.highway.as_deref().unwrap_or_default();
        let mut info = WayInfo::new(a.way.id, highway).with_oneway(a.attrs.oneway);
        info.name = a.attrs.name.clone();
        let way_idx = builder.add_way(info);

        let forward_modes = permitted_modes(&a.attrs, profiles, true);
        let backward_modes = permitted_modes(&a.attrs, profiles, false);

        for pair in a.refs.windows(2) {
            let (from, to) = (lookup[&pair[0]], lookup[&pair[1]]);
            let length_m = builder.vertex_pos(from).distance_m(builder.vertex_pos(to));
            let time_s = length_m / a.speed_ms;

            if forward_modes.contains(mode) {
                builder.add_directed_edge(from, to, way_idx, length_m, time_s, forward_modes);
            }
            if backward_modes.contains(mode) {
                builder.add_directed_edge(to, from, way_idx, length_m, time_s, backward_modes);
            }
        }
    }

    let graph = builder.build();
    info!(
        "built {mode} graph: {} vertices, {} edges from {} of {} ways",
        graph.vertex_count(),
        graph.edge_count(),
        accepted.len(),
        ways.len()
    );
    graph
}

/// Modes allowed to travel along (`along_way`) or against a way.
fn permitted_modes(attrs: &WayAttrs, profiles: &RoutingProfiles, along_way: bool) -> ModeSet {
    let mut set = ModeSet::EMPTY;
    for mode in TravelMode::ALL {
        let profile = profiles.get(mode);
        let class_ok = attrs.highway.as_deref().is_some_and(|h| profile.accepts(h));
        let direction_ok = !profile.honor_oneway || attrs.oneway.allows(along_way);
        if class_ok && direction_ok {
            set.insert(mode);
        }
    }
    set
}
