//! Subcommand dispatch.
//!
//! Each command parses its point and distance arguments first, then loads
//! the map data, runs one engine operation, and renders the result.  The
//! returned [`ResultClass`] distinguishes a usable answer from a valid query
//! with no answer; errors are classified by the caller.

use std::io::{self, Write};

use log::{debug, info, warn};

use osmnet_analysis::{
    BottleneckConfig, CentralityConfig, DetourSampleConfig, betweenness, bottlenecks, connectivity,
    detour_factor, detour_statistics,
};
use osmnet_core::{
    GeoPoint, NetError, NetResult, ResultClass, VertexId, parse_point, parse_points, parse_radius,
};
use osmnet_graph::{FeatureIndex, Network, NetworkSummary, TagFilter};
use osmnet_output::{
    AlternativesOutput, BottleneckOutput, CentralityOutput, ConnectivityOutput, DetourOutput,
    DetourStatsOutput, DirectionsOutput, IsochroneOutput, MatrixOutput, NearbyOutput, NearestOutput,
    Report, RouteOutput, SummaryOutput, WaypointOutput, render, render_to_path,
};
use osmnet_route::{
    AlternativesConfig, DijkstraRouter, Isochrone, IsochroneConfig, PathOutcome, WaypointOutcome,
    alternative_routes, batch_isochrones, directions, distance_matrix, route_between,
    route_waypoints,
};

use crate::args::{Cli, Command, GlobalArgs, PairArgs};
use crate::input;

pub fn run(cli: &Cli) -> anyhow::Result<ResultClass> {
    let g = &cli.global;
    match &cli.command {
        Command::Route(pair) => route(g, pair),
        Command::Waypoints { points } => waypoints(g, points),
        Command::Alternatives { pair, count } => alternatives(g, pair, *count),
        Command::Directions(pair) => turn_by_turn(g, pair),
        Command::Matrix { points } => matrix(g, points),
        Command::Isochrone { at, times, resolution } => isochrones(g, at, times, *resolution),
        Command::Connectivity => {
            let net = load_network(g)?;
            let report = connectivity(&net.graph);
            emit(&ConnectivityOutput { report: &report, mode: g.mode }, g)?;
            Ok(ResultClass::Success)
        }
        Command::Centrality { sample, top, seed } => {
            let net = load_network(g)?;
            let config = CentralityConfig {
                sample_size: *sample,
                top_n:       *top,
                seed:        *seed,
                optimize:    g.optimize,
            };
            let report = betweenness(&net.graph, &config)?;
            emit(&CentralityOutput { graph: &net.graph, report: &report }, g)?;
            Ok(ResultClass::Success)
        }
        Command::Bottleneck { top } => {
            let net = load_network(g)?;
            let report = bottlenecks(&net.graph, &BottleneckConfig { top_n: *top });
            emit(&BottleneckOutput { report: &report, mode: g.mode }, g)?;
            Ok(ResultClass::Success)
        }
        Command::Detour { from, to, sample, min_distance, seed } => match (from, to) {
            (Some(from), Some(to)) => detour_pair(g, from, to),
            _ => detour_sample(g, *sample, min_distance, *seed),
        },
        Command::Nearest { at } => nearest(g, at),
        Command::Nearby { at, filter, radius, limit } => nearby(g, at, filter.as_deref(), radius, *limit),
        Command::Summary => {
            let net = load_network(g)?;
            let summary = NetworkSummary::of(&net.graph);
            emit(&SummaryOutput { summary: &summary }, g)?;
            Ok(ResultClass::Success)
        }
    }
}

// ── Shared plumbing ───────────────────────────────────────────────────────────

/// Build the routable network for the selected mode.
fn load_network(g: &GlobalArgs) -> NetResult<Network> {
    let max_snap = g.max_snap.as_deref().map(parse_radius).transpose()?;
    let profiles = input::load_profiles(g.profiles.as_deref())?;
    let elements = input::load_elements(g.input.as_deref())?;

    let network = Network::build(&elements, g.mode, &profiles).with_max_snap(max_snap);
    network.graph.ensure_routable()?;
    info!(
        "{} network: {} vertices, {} directed edges",
        g.mode,
        network.graph.vertex_count(),
        network.graph.edge_count()
    );
    Ok(network)
}

fn emit(report: &dyn Report, g: &GlobalArgs) -> anyhow::Result<()> {
    match &g.output {
        Some(path) => {
            render_to_path(report, g.format, path)?;
            debug!("{} written to {}", report.name(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            render(report, g.format, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn found(answered: bool) -> ResultClass {
    if answered { ResultClass::Success } else { ResultClass::NoResult }
}

fn require_points(what: &'static str, points: &[GeoPoint]) -> NetResult<()> {
    if points.len() < 2 {
        return Err(NetError::TooFewPoints { what, need: 2, got: points.len() });
    }
    Ok(())
}

/// Comma-separated minutes to seconds, in the order given.
pub(crate) fn parse_minutes(text: &str) -> NetResult<Vec<f64>> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<f64>()
                .ok()
                .filter(|m| m.is_finite() && *m >= 0.0)
                .map(|m| m * 60.0)
                .ok_or_else(|| NetError::InvalidArgument(format!("invalid time threshold {t:?} (minutes)")))
        })
        .collect()
}

// ── Routing ───────────────────────────────────────────────────────────────────

fn route(g: &GlobalArgs, pair: &PairArgs) -> anyhow::Result<ResultClass> {
    let (origin, destination) = (parse_point(&pair.from)?, parse_point(&pair.to)?);
    let net = load_network(g)?;

    let outcome = route_between(&net, &DijkstraRouter, origin, destination, g.optimize)?;
    emit(
        &RouteOutput { graph: &net.graph, origin, destination, optimize: g.optimize, outcome: &outcome },
        g,
    )?;
    Ok(found(outcome.is_found()))
}

fn waypoints(g: &GlobalArgs, text: &str) -> anyhow::Result<ResultClass> {
    let points = parse_points(text)?;
    require_points("waypoint route", &points)?;
    let net = load_network(g)?;

    let vertices = points
        .iter()
        .enumerate()
        .map(|(i, &p)| net.resolve(p, &format!("waypoint {}", i + 1)))
        .collect::<NetResult<Vec<_>>>()?;
    let outcome = route_waypoints(&net.graph, &DijkstraRouter, &vertices, g.optimize)?;
    emit(
        &WaypointOutput { graph: &net.graph, points: &points, optimize: g.optimize, outcome: &outcome },
        g,
    )?;
    Ok(found(matches!(outcome, WaypointOutcome::Found(_))))
}

fn alternatives(g: &GlobalArgs, pair: &PairArgs, count: i64) -> anyhow::Result<ResultClass> {
    let (origin, destination) = (parse_point(&pair.from)?, parse_point(&pair.to)?);
    let count = usize::try_from(count)
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| NetError::InvalidArgument(format!("route count must be at least 1, got {count}")))?;
    let net = load_network(g)?;

    let from = net.resolve(origin, "origin")?;
    let to = net.resolve(destination, "destination")?;
    let routes = alternative_routes(&net.graph, from, to, count, g.optimize, &AlternativesConfig::default())?;
    if routes.len() < count {
        debug!("found {} of {count} requested routes", routes.len());
    }
    emit(
        &AlternativesOutput {
            graph: &net.graph,
            origin,
            destination,
            optimize: g.optimize,
            routes: &routes,
        },
        g,
    )?;
    Ok(found(!routes.is_empty()))
}

fn turn_by_turn(g: &GlobalArgs, pair: &PairArgs) -> anyhow::Result<ResultClass> {
    let (origin, destination) = (parse_point(&pair.from)?, parse_point(&pair.to)?);
    let net = load_network(g)?;

    let outcome = route_between(&net, &DijkstraRouter, origin, destination, g.optimize)?;
    match &outcome {
        PathOutcome::Found(route) => {
            let steps = directions(&net.graph, route);
            emit(&DirectionsOutput { graph: &net.graph, optimize: g.optimize, route, steps: &steps }, g)?;
            Ok(ResultClass::Success)
        }
        PathOutcome::Unreachable => {
            emit(
                &RouteOutput { graph: &net.graph, origin, destination, optimize: g.optimize, outcome: &outcome },
                g,
            )?;
            Ok(ResultClass::NoResult)
        }
    }
}

fn matrix(g: &GlobalArgs, text: &str) -> anyhow::Result<ResultClass> {
    let points = parse_points(text)?;
    require_points("distance matrix", &points)?;
    let net = load_network(g)?;

    let matrix = distance_matrix(&net, &points, g.optimize)?;
    emit(&MatrixOutput { matrix: &matrix, mode: g.mode }, g)?;
    Ok(ResultClass::Success)
}

/// An origin with no vertex in range keeps its slot in the output and does
/// not abort the others.
fn isochrones(g: &GlobalArgs, at: &str, times: &str, resolution: usize) -> anyhow::Result<ResultClass> {
    let origins = parse_points(at)?;
    let thresholds = parse_minutes(times)?;
    let net = load_network(g)?;

    let snapped: Vec<Option<VertexId>> = origins.iter().map(|&p| net.try_resolve(p)).collect();
    for (i, (p, _)) in origins.iter().zip(&snapped).enumerate().filter(|(_, (_, v))| v.is_none()) {
        warn!("origin {} ({p}) has no vertex in range", i + 1);
    }
    let resolved: Vec<VertexId> = snapped.iter().flatten().copied().collect();
    let config = IsochroneConfig { resolution };
    let mut computed = batch_isochrones(&net.graph, &resolved, &thresholds, &config)?.into_iter();
    let result: Vec<Option<Isochrone>> = snapped
        .into_iter()
        .map(|v| v.and_then(|_| computed.next()))
        .collect();

    emit(&IsochroneOutput { graph: &net.graph, origins: &origins, isochrones: &result }, g)?;
    Ok(found(!resolved.is_empty()))
}

// ── Analysis ──────────────────────────────────────────────────────────────────

fn detour_pair(g: &GlobalArgs, from: &str, to: &str) -> anyhow::Result<ResultClass> {
    let (origin, destination) = (parse_point(from)?, parse_point(to)?);
    let net = load_network(g)?;

    let pair = detour_factor(&net, origin, destination)?;
    emit(&DetourOutput { graph: &net.graph, origin, destination, pair: pair.as_ref() }, g)?;
    Ok(found(pair.is_some()))
}

fn detour_sample(g: &GlobalArgs, pairs: usize, min_distance: &str, seed: u64) -> anyhow::Result<ResultClass> {
    let min_straight_m = parse_radius(min_distance)?;
    let net = load_network(g)?;

    let config = DetourSampleConfig { pairs, min_straight_m, seed };
    let stats = detour_statistics(&net.graph, &config)?;
    emit(&DetourStatsOutput { graph: &net.graph, stats: &stats }, g)?;
    Ok(ResultClass::Success)
}

// ── Lookup ────────────────────────────────────────────────────────────────────

fn nearest(g: &GlobalArgs, at: &str) -> anyhow::Result<ResultClass> {
    let query = parse_point(at)?;
    let net = load_network(g)?;

    let vertex = net.index.nearest_vertex(query, net.max_snap_m);
    let road = net.index.nearest_edge(query, net.max_snap_m, |_| true);
    emit(&NearestOutput { graph: &net.graph, query, vertex, road }, g)?;
    Ok(found(vertex.is_some() || road.is_some()))
}

/// Feature lookups need no road graph, so an area without roads still
/// answers.
fn nearby(
    g: &GlobalArgs,
    at: &str,
    filter: Option<&str>,
    radius: &str,
    limit: usize,
) -> anyhow::Result<ResultClass> {
    let query = parse_point(at)?;
    let filter_text = filter.unwrap_or("*");
    let tag_filter: TagFilter = filter_text.parse()?;
    let radius_m = parse_radius(radius)?;
    let elements = input::load_elements(g.input.as_deref())?;

    let index = FeatureIndex::build(&elements.nodes);
    let hits = index.nearest(query, &tag_filter, radius_m, limit);
    debug!("{} of {} features match {filter_text:?} within {radius_m} m", hits.len(), index.len());
    emit(
        &NearbyOutput { index: &index, query, filter: filter_text, radius_m, hits: &hits },
        g,
    )?;
    Ok(found(!hits.is_empty()))
}
