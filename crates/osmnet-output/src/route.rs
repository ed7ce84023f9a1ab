//! Views over path-finder results: single routes, waypoint routes,
//! alternatives, and turn-by-turn directions.

use std::io::{self, Write};

use osmnet_core::{GeoPoint, Optimize};
use osmnet_graph::RoadGraph;
use osmnet_route::{Instruction, PathOutcome, Route, WaypointOutcome};
use serde_json::{Map, Value, json};

use crate::csv::cell;
use crate::geojson::{self, lat_lon, round1};
use crate::{CsvTable, Report};

const RULE: &str = "==================================================";

/// JSON fields shared by every rendered route.
fn route_fields(graph: &RoadGraph, route: &Route) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert("distance_m".into(), json!(round1(route.distance_m)));
    m.insert("time_s".into(), json!(round1(route.time_s)));
    m.insert(
        "path".into(),
        json!(route.vertices.iter().map(|v| graph.vertex_osm[v.index()]).collect::<Vec<_>>()),
    );
    m.insert("coordinates".into(), geojson::coords(&route.polyline(graph)));
    m.insert("roads".into(), json!(route.way_transitions(graph)));
    m
}

fn segments_json(graph: &RoadGraph, route: &Route) -> Value {
    route
        .segments(graph)
        .into_iter()
        .map(|s| {
            json!({
                "from": lat_lon(s.from),
                "to": lat_lon(s.to),
                "way_id": s.way_id,
                "name": s.name,
                "highway": s.highway,
                "distance_m": round1(s.distance_m),
                "time_s": round1(s.time_s),
            })
        })
        .collect()
}

fn write_totals(out: &mut dyn Write, route: &Route) -> io::Result<()> {
    writeln!(out, "Distance: {:.2} km", route.distance_m / 1_000.0)?;
    writeln!(out, "Time: {:.1} min", route.time_s / 60.0)
}

fn write_roads(out: &mut dyn Write, graph: &RoadGraph, route: &Route) -> io::Result<()> {
    let roads = route.way_transitions(graph);
    if !roads.is_empty() {
        writeln!(out, "Via: {}", roads.join(" > "))?;
    }
    Ok(())
}

// ── Single route ──────────────────────────────────────────────────────────────

pub struct RouteOutput<'a> {
    pub graph:       &'a RoadGraph,
    pub origin:      GeoPoint,
    pub destination: GeoPoint,
    pub optimize:    Optimize,
    pub outcome:     &'a PathOutcome,
}

impl Report for RouteOutput<'_> {
    fn name(&self) -> &'static str {
        "route"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Route: {} ({})", self.graph.mode, self.optimize)?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "From: {:.6}, {:.6}", self.origin.lat, self.origin.lon)?;
        writeln!(out, "To:   {:.6}, {:.6}", self.destination.lat, self.destination.lon)?;
        writeln!(out)?;
        match self.outcome {
            PathOutcome::Found(route) => {
                write_totals(out, route)?;
                writeln!(out, "Nodes: {}", route.vertices.len())?;
                write_roads(out, self.graph, route)
            }
            PathOutcome::Unreachable => writeln!(out, "No route found"),
        }
    }

    fn to_json(&self) -> Value {
        let mut m = Map::new();
        m.insert("mode".into(), json!(self.graph.mode.as_str()));
        m.insert("optimize".into(), json!(self.optimize.as_str()));
        m.insert("origin".into(), lat_lon(self.origin));
        m.insert("destination".into(), lat_lon(self.destination));
        m.insert("found".into(), json!(self.outcome.is_found()));
        if let PathOutcome::Found(route) = self.outcome {
            m.extend(route_fields(self.graph, route));
            m.insert("segments".into(), segments_json(self.graph, route));
        }
        Value::Object(m)
    }

    fn to_geojson(&self) -> Option<Value> {
        let mut features = Vec::new();
        if let PathOutcome::Found(route) = self.outcome {
            features.push(geojson::line(
                &route.polyline(self.graph),
                json!({
                    "mode": self.graph.mode.as_str(),
                    "optimize": self.optimize.as_str(),
                    "distance_m": round1(route.distance_m),
                    "time_s": round1(route.time_s),
                    "nodes": route.vertices.len(),
                }),
            ));
        }
        features.push(geojson::point(self.origin, json!({ "type": "origin" })));
        features.push(geojson::point(self.destination, json!({ "type": "destination" })));
        Some(geojson::collection(features))
    }

    fn csv_tables(&self) -> Option<Vec<CsvTable>> {
        let mut table = CsvTable::new([
            "from_lat", "from_lon", "to_lat", "to_lon", "way_id", "name", "highway", "distance_m", "time_s",
        ]);
        if let PathOutcome::Found(route) = self.outcome {
            for s in route.segments(self.graph) {
                table.push(vec![
                    s.from.lat.to_string(),
                    s.from.lon.to_string(),
                    s.to.lat.to_string(),
                    s.to.lon.to_string(),
                    s.way_id.to_string(),
                    s.name.unwrap_or_default(),
                    s.highway,
                    cell(Some(s.distance_m)),
                    cell(Some(s.time_s)),
                ]);
            }
        }
        Some(vec![table])
    }
}

// ── Waypoints ─────────────────────────────────────────────────────────────────

pub struct WaypointOutput<'a> {
    pub graph:    &'a RoadGraph,
    pub points:   &'a [GeoPoint],
    pub optimize: Optimize,
    pub outcome:  &'a WaypointOutcome,
}

impl Report for WaypointOutput<'_> {
    fn name(&self) -> &'static str {
        "waypoint route"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Multi-stop route: {} ({}), {} waypoints", self.graph.mode, self.optimize, self.points.len())?;
        writeln!(out, "{RULE}")?;
        match self.outcome {
            WaypointOutcome::Found(multi) => {
                for (i, leg) in multi.legs.iter().enumerate() {
                    writeln!(
                        out,
                        "Leg {}: {} -> {}  {:.2} km, {:.1} min",
                        i + 1,
                        self.points[i],
                        self.points[i + 1],
                        leg.distance_m / 1_000.0,
                        leg.time_s / 60.0
                    )?;
                }
                writeln!(out)?;
                write_totals(out, &multi.route)?;
                write_roads(out, self.graph, &multi.route)
            }
            WaypointOutcome::LegUnreachable { leg, .. } => writeln!(
                out,
                "No route for leg {} ({} -> {})",
                leg + 1,
                self.points[*leg],
                self.points[*leg + 1]
            ),
        }
    }

    fn to_json(&self) -> Value {
        let mut m = Map::new();
        m.insert("mode".into(), json!(self.graph.mode.as_str()));
        m.insert("optimize".into(), json!(self.optimize.as_str()));
        m.insert("waypoints".into(), self.points.iter().map(|&p| lat_lon(p)).collect());
        match self.outcome {
            WaypointOutcome::Found(multi) => {
                m.insert("found".into(), json!(true));
                m.extend(route_fields(self.graph, &multi.route));
                let legs: Vec<Value> = multi
                    .legs
                    .iter()
                    .enumerate()
                    .map(|(i, leg)| {
                        json!({
                            "leg": i + 1,
                            "distance_m": round1(leg.distance_m),
                            "time_s": round1(leg.time_s),
                        })
                    })
                    .collect();
                m.insert("legs".into(), json!(legs));
            }
            WaypointOutcome::LegUnreachable { leg, .. } => {
                m.insert("found".into(), json!(false));
                m.insert("failed_leg".into(), json!(leg + 1));
            }
        }
        Value::Object(m)
    }

    fn to_geojson(&self) -> Option<Value> {
        let mut features = Vec::new();
        if let WaypointOutcome::Found(multi) = self.outcome {
            for (i, leg) in multi.legs.iter().enumerate() {
                features.push(geojson::line(
                    &leg.polyline(self.graph),
                    json!({
                        "leg": i + 1,
                        "distance_m": round1(leg.distance_m),
                        "time_s": round1(leg.time_s),
                    }),
                ));
            }
        }
        for (i, &p) in self.points.iter().enumerate() {
            features.push(geojson::point(p, json!({ "type": "waypoint", "index": i + 1 })));
        }
        Some(geojson::collection(features))
    }
}

// ── Alternatives ──────────────────────────────────────────────────────────────

pub struct AlternativesOutput<'a> {
    pub graph:       &'a RoadGraph,
    pub origin:      GeoPoint,
    pub destination: GeoPoint,
    pub optimize:    Optimize,
    /// Best route first.
    pub routes:      &'a [Route],
}

impl AlternativesOutput<'_> {
    pub fn label(index: usize) -> String {
        if index == 0 { "fastest".to_owned() } else { format!("alternative {index}") }
    }
}

impl Report for AlternativesOutput<'_> {
    fn name(&self) -> &'static str {
        "alternative routes"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Alternative routes: {} ({})", self.graph.mode, self.optimize)?;
        writeln!(out, "{RULE}")?;
        let Some(best) = self.routes.first() else {
            return writeln!(out, "No route found");
        };
        writeln!(out, "Found {} route(s)", self.routes.len())?;
        for (i, route) in self.routes.iter().enumerate() {
            writeln!(out)?;
            writeln!(out, "{}. {}", i + 1, Self::label(i))?;
            let (dd, dt) = (route.distance_m - best.distance_m, route.time_s - best.time_s);
            if i == 0 {
                writeln!(out, "   Distance: {:.2} km", route.distance_m / 1_000.0)?;
                writeln!(out, "   Time: {:.1} min", route.time_s / 60.0)?;
            } else {
                writeln!(out, "   Distance: {:.2} km ({:+.2} km)", route.distance_m / 1_000.0, dd / 1_000.0)?;
                writeln!(out, "   Time: {:.1} min ({:+.1} min)", route.time_s / 60.0, dt / 60.0)?;
            }
            let roads = route.way_transitions(self.graph);
            if !roads.is_empty() {
                writeln!(out, "   Via: {}", roads.join(" > "))?;
            }
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        let best = self.routes.first();
        let routes: Vec<Value> = self
            .routes
            .iter()
            .enumerate()
            .map(|(i, route)| {
                let mut m = Map::new();
                m.insert("label".into(), json!(Self::label(i)));
                m.extend(route_fields(self.graph, route));
                if let Some(b) = best {
                    m.insert("extra_distance_m".into(), json!(round1(route.distance_m - b.distance_m)));
                    m.insert("extra_time_s".into(), json!(round1(route.time_s - b.time_s)));
                }
                Value::Object(m)
            })
            .collect();
        json!({
            "mode": self.graph.mode.as_str(),
            "optimize": self.optimize.as_str(),
            "origin": lat_lon(self.origin),
            "destination": lat_lon(self.destination),
            "count": self.routes.len(),
            "routes": routes,
        })
    }

    fn to_geojson(&self) -> Option<Value> {
        let mut features: Vec<Value> = self
            .routes
            .iter()
            .enumerate()
            .map(|(i, route)| {
                geojson::line(
                    &route.polyline(self.graph),
                    json!({
                        "label": Self::label(i),
                        "rank": i + 1,
                        "distance_m": round1(route.distance_m),
                        "time_s": round1(route.time_s),
                    }),
                )
            })
            .collect();
        features.push(geojson::point(self.origin, json!({ "type": "origin" })));
        features.push(geojson::point(self.destination, json!({ "type": "destination" })));
        Some(geojson::collection(features))
    }
}

// ── Directions ────────────────────────────────────────────────────────────────

pub struct DirectionsOutput<'a> {
    pub graph:    &'a RoadGraph,
    pub optimize: Optimize,
    pub route:    &'a Route,
    pub steps:    &'a [Instruction],
}

impl Report for DirectionsOutput<'_> {
    fn name(&self) -> &'static str {
        "directions"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Directions: {} ({})", self.graph.mode, self.optimize)?;
        writeln!(out, "{RULE}")?;
        write_totals(out, self.route)?;
        writeln!(out)?;
        for (i, step) in self.steps.iter().enumerate() {
            if step.distance_m > 0.0 {
                writeln!(out, "{:>3}. {} ({:.0} m)", i + 1, step.text(), step.distance_m)?;
            } else {
                writeln!(out, "{:>3}. {}", i + 1, step.text())?;
            }
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        let steps: Vec<Value> = self
            .steps
            .iter()
            .map(|s| {
                json!({
                    "maneuver": s.maneuver.as_str(),
                    "instruction": s.text(),
                    "road": s.road,
                    "highway": s.highway,
                    "location": lat_lon(s.location),
                    "bearing_deg": round1(s.bearing_deg),
                    "turn_deg": round1(s.turn_deg),
                    "distance_m": round1(s.distance_m),
                    "time_s": round1(s.time_s),
                })
            })
            .collect();
        json!({
            "mode": self.graph.mode.as_str(),
            "optimize": self.optimize.as_str(),
            "distance_m": round1(self.route.distance_m),
            "time_s": round1(self.route.time_s),
            "steps": steps,
        })
    }

    fn to_geojson(&self) -> Option<Value> {
        let mut features = vec![geojson::line(
            &self.route.polyline(self.graph),
            json!({ "distance_m": round1(self.route.distance_m), "time_s": round1(self.route.time_s) }),
        )];
        for (i, s) in self.steps.iter().enumerate() {
            features.push(geojson::point(
                s.location,
                json!({ "step": i + 1, "maneuver": s.maneuver.as_str(), "instruction": s.text() }),
            ));
        }
        Some(geojson::collection(features))
    }

    fn csv_tables(&self) -> Option<Vec<CsvTable>> {
        let mut table = CsvTable::new(["step", "maneuver", "instruction", "lat", "lon", "distance_m", "time_s"]);
        for (i, s) in self.steps.iter().enumerate() {
            table.push(vec![
                (i + 1).to_string(),
                s.maneuver.as_str().to_owned(),
                s.text(),
                s.location.lat.to_string(),
                s.location.lon.to_string(),
                cell(Some(s.distance_m)),
                cell(Some(s.time_s)),
            ]);
        }
        Some(vec![table])
    }
}
