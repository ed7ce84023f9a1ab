//! Views over Graph Analyzer results.

use std::io::{self, Write};

use osmnet_analysis::{BottleneckReport, CentralityReport, ConnectivityReport, DetourFactor, DetourStats};
use osmnet_core::{GeoPoint, TravelMode};
use osmnet_graph::RoadGraph;
use serde_json::{Value, json};

use crate::geojson::{self, lat_lon, round1, round3};
use crate::{CsvTable, Report};

// ── Connectivity ──────────────────────────────────────────────────────────────

pub struct ConnectivityOutput<'a> {
    pub report: &'a ConnectivityReport,
    pub mode:   TravelMode,
}

impl Report for ConnectivityOutput<'_> {
    fn name(&self) -> &'static str {
        "connectivity"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        let r = self.report;
        writeln!(out, "Network Connectivity ({})", self.mode)?;
        writeln!(out, "{}", "=".repeat(50))?;
        writeln!(out, "Nodes:      {}", r.vertices)?;
        writeln!(out, "Components: {}", r.num_components)?;
        writeln!(out, "Connected:  {}", if r.is_connected { "yes" } else { "no" })?;
        writeln!(out, "Dead ends:  {}", r.dead_ends)?;
        if r.num_components > 0 {
            writeln!(out, "Largest component: {} nodes ({:.1}%)", r.largest_size, r.largest_share * 100.0)?;
        }
        if r.num_components > 1 {
            writeln!(out)?;
            writeln!(out, "Components by size:")?;
            for (i, size) in r.sizes.iter().take(10).enumerate() {
                writeln!(out, "  {:>2}. {size} nodes", i + 1)?;
            }
            if r.sizes.len() > 10 {
                writeln!(out, "  ... and {} more", r.sizes.len() - 10)?;
            }
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        let r = self.report;
        let components: Vec<Value> = r
            .sizes
            .iter()
            .take(20)
            .enumerate()
            .map(|(i, &size)| {
                let pct = if r.vertices == 0 { 0.0 } else { 100.0 * size as f64 / r.vertices as f64 };
                json!({ "id": i + 1, "size": size, "percentage": (pct * 100.0).round() / 100.0 })
            })
            .collect();
        json!({
            "mode": self.mode.as_str(),
            "total_nodes": r.vertices,
            "num_components": r.num_components,
            "is_connected": r.is_connected,
            "num_dead_ends": r.dead_ends,
            "largest_component_size": r.largest_size,
            "components": components,
        })
    }
}

// ── Centrality ────────────────────────────────────────────────────────────────

pub struct CentralityOutput<'a> {
    pub graph:  &'a RoadGraph,
    pub report: &'a CentralityReport,
}

impl Report for CentralityOutput<'_> {
    fn name(&self) -> &'static str {
        "centrality"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        let r = self.report;
        writeln!(out, "Betweenness Centrality ({}, {} sampled sources)", self.graph.mode, r.sources)?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "Top nodes:")?;
        for (i, s) in r.top_vertices.iter().enumerate() {
            writeln!(out, "  {:>2}. node {:<12} {}  score {:.3}", i + 1, s.osm_id, s.pos, s.score)?;
        }
        writeln!(out)?;
        writeln!(out, "Top road segments:")?;
        for (i, s) in r.top_edges.iter().enumerate() {
            writeln!(out, "  {:>2}. {:<30} score {:.3}", i + 1, s.road, s.score)?;
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        let r = self.report;
        let nodes: Vec<Value> = r
            .top_vertices
            .iter()
            .map(|s| json!({ "node_id": s.osm_id, "lat": s.pos.lat, "lon": s.pos.lon, "score": round3(s.score) }))
            .collect();
        let edges: Vec<Value> = r
            .top_edges
            .iter()
            .map(|s| {
                json!({
                    "from_node": self.graph.vertex_osm[s.from.index()],
                    "to_node": self.graph.vertex_osm[s.to.index()],
                    "road": s.road,
                    "score": round3(s.score),
                })
            })
            .collect();
        json!({
            "mode": self.graph.mode.as_str(),
            "sources": r.sources,
            "top_nodes": nodes,
            "top_edges": edges,
        })
    }

    fn to_geojson(&self) -> Option<Value> {
        let r = self.report;
        let mut features: Vec<Value> = r
            .top_edges
            .iter()
            .map(|s| {
                geojson::line(
                    &[self.graph.pos(s.from), self.graph.pos(s.to)],
                    json!({ "road": s.road, "score": round3(s.score) }),
                )
            })
            .collect();
        features.extend(r.top_vertices.iter().enumerate().map(|(i, s)| {
            geojson::point(s.pos, json!({ "rank": i + 1, "node_id": s.osm_id, "score": round3(s.score) }))
        }));
        Some(geojson::collection(features))
    }
}

// ── Bottlenecks ───────────────────────────────────────────────────────────────

pub struct BottleneckOutput<'a> {
    pub report: &'a BottleneckReport,
    pub mode:   TravelMode,
}

impl Report for BottleneckOutput<'_> {
    fn name(&self) -> &'static str {
        "bottleneck"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        let r = self.report;
        writeln!(out, "Network Bottlenecks ({})", self.mode)?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "Road segments:       {}", r.segments)?;
        writeln!(out, "Bridges:             {}", r.bridge_count)?;
        writeln!(out, "Articulation points: {}", r.articulation_count)?;
        if !r.bridges.is_empty() {
            writeln!(out)?;
            writeln!(out, "Critical segments (nodes cut off on removal):")?;
            for (i, b) in r.bridges.iter().enumerate() {
                writeln!(out, "  {:>2}. {:<30} {:>6} nodes  {:.0} m", i + 1, b.road, b.importance, b.length_m)?;
            }
        }
        if !r.articulation_points.is_empty() {
            writeln!(out)?;
            writeln!(out, "Critical junctions (extra components on removal):")?;
            for (i, p) in r.articulation_points.iter().enumerate() {
                writeln!(out, "  {:>2}. node {:<12} {}  +{}", i + 1, p.osm_id, p.pos, p.extra_components)?;
            }
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        let r = self.report;
        let bridges: Vec<Value> = r
            .bridges
            .iter()
            .map(|b| {
                json!({
                    "way_id": b.way_id,
                    "road": b.road,
                    "highway": b.highway,
                    "from": lat_lon(b.from),
                    "to": lat_lon(b.to),
                    "length_m": round1(b.length_m),
                    "importance": b.importance,
                })
            })
            .collect();
        let points: Vec<Value> = r
            .articulation_points
            .iter()
            .map(|p| {
                json!({
                    "node_id": p.osm_id,
                    "lat": p.pos.lat,
                    "lon": p.pos.lon,
                    "extra_components": p.extra_components,
                })
            })
            .collect();
        json!({
            "mode": self.mode.as_str(),
            "segments": r.segments,
            "num_bridges": r.bridge_count,
            "num_articulation_points": r.articulation_count,
            "bridges": bridges,
            "articulation_points": points,
        })
    }

    fn to_geojson(&self) -> Option<Value> {
        let r = self.report;
        let mut features: Vec<Value> = r
            .bridges
            .iter()
            .map(|b| {
                geojson::line(
                    &[b.from, b.to],
                    json!({ "type": "bridge", "road": b.road, "way_id": b.way_id, "importance": b.importance }),
                )
            })
            .collect();
        features.extend(r.articulation_points.iter().map(|p| {
            geojson::point(
                p.pos,
                json!({ "type": "articulation_point", "node_id": p.osm_id, "extra_components": p.extra_components }),
            )
        }));
        Some(geojson::collection(features))
    }
}

// ── Detour factor ─────────────────────────────────────────────────────────────

/// Detour factor for one point pair.  `pair` is `None` when unreachable.
pub struct DetourOutput<'a> {
    pub graph:       &'a RoadGraph,
    pub origin:      GeoPoint,
    pub destination: GeoPoint,
    pub pair:        Option<&'a DetourFactor>,
}

impl Report for DetourOutput<'_> {
    fn name(&self) -> &'static str {
        "detour factor"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Detour factor ({}): {} -> {}", self.graph.mode, self.origin, self.destination)?;
        match self.pair {
            Some(d) => {
                writeln!(out, "  Straight line: {:.2} km", d.straight_m / 1_000.0)?;
                writeln!(out, "  Network:       {:.2} km", d.network_m / 1_000.0)?;
                writeln!(out, "  Factor:        {:.3}", d.factor)
            }
            None => writeln!(out, "  undefined (no route, or both points snap to the same node)"),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "mode": self.graph.mode.as_str(),
            "origin": lat_lon(self.origin),
            "destination": lat_lon(self.destination),
            "straight_line_m": self.pair.map(|d| round1(d.straight_m)),
            "network_m": self.pair.map(|d| round1(d.network_m)),
            "detour_factor": self.pair.map(|d| round3(d.factor)),
        })
    }
}

pub struct DetourStatsOutput<'a> {
    pub graph: &'a RoadGraph,
    pub stats: &'a DetourStats,
}

impl DetourStatsOutput<'_> {
    fn sample_json(&self, d: &DetourFactor) -> Value {
        let (a, b) = (self.graph.pos(d.origin), self.graph.pos(d.destination));
        json!({
            "from": { "node": self.graph.vertex_osm[d.origin.index()], "lat": a.lat, "lon": a.lon },
            "to": { "node": self.graph.vertex_osm[d.destination.index()], "lat": b.lat, "lon": b.lon },
            "straight_line_m": round1(d.straight_m),
            "network_m": round1(d.network_m),
            "detour_factor": round3(d.factor),
        })
    }
}

impl Report for DetourStatsOutput<'_> {
    fn name(&self) -> &'static str {
        "detour statistics"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        let s = self.stats;
        writeln!(out, "Detour Factor Analysis ({})", self.graph.mode)?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "Samples analyzed: {} (component of {} nodes)", s.samples.len(), s.component_size)?;
        writeln!(out)?;
        writeln!(out, "Detour Factor Statistics:")?;
        writeln!(out, "  Mean:   {:.3}", s.mean)?;
        writeln!(out, "  Median: {:.3}", s.median)?;
        writeln!(out, "  Min:    {:.3}", s.min)?;
        writeln!(out, "  Max:    {:.3}", s.max)?;
        writeln!(out, "  10th percentile: {:.3}", s.p10)?;
        writeln!(out, "  90th percentile: {:.3}", s.p90)?;
        writeln!(out)?;
        writeln!(out, "Interpretation: {}", s.rating())
    }

    fn to_json(&self) -> Value {
        let s = self.stats;
        let round4 = |x: f64| (x * 10_000.0).round() / 10_000.0;
        let samples: Vec<Value> = s.samples.iter().take(20).map(|d| self.sample_json(d)).collect();
        json!({
            "mode": self.graph.mode.as_str(),
            "samples": s.samples.len(),
            "statistics": {
                "mean": round4(s.mean),
                "median": round4(s.median),
                "min": round4(s.min),
                "max": round4(s.max),
                "p10": round4(s.p10),
                "p90": round4(s.p90),
            },
            "interpretation": s.rating().describe(),
            "sample_routes": samples,
        })
    }

    fn csv_tables(&self) -> Option<Vec<CsvTable>> {
        let mut t = CsvTable::new(["from_node", "to_node", "straight_line_m", "network_m", "detour_factor"]);
        for d in &self.stats.samples {
            t.push(vec![
                self.graph.vertex_osm[d.origin.index()].to_string(),
                self.graph.vertex_osm[d.destination.index()].to_string(),
                format!("{:.1}", d.straight_m),
                format!("{:.1}", d.network_m),
                format!("{:.3}", d.factor),
            ]);
        }
        Some(vec![t])
    }
}
