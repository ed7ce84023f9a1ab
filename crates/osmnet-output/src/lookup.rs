//! Views over point lookups and the network summary.

use std::io::{self, Write};

use osmnet_core::GeoPoint;
use osmnet_graph::{EdgeHit, FeatureHit, FeatureIndex, NetworkSummary, RoadGraph, VertexHit};
use serde_json::{Map, Value, json};

use crate::geojson::{self, lat_lon, round1};
use crate::{CsvTable, Report};

/// Compass label used for feature bearings.
fn compass(bearing_deg: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    POINTS[((bearing_deg.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8]
}

// ── Nearest node / road ───────────────────────────────────────────────────────

pub struct NearestOutput<'a> {
    pub graph:  &'a RoadGraph,
    pub query:  GeoPoint,
    pub vertex: Option<VertexHit>,
    pub road:   Option<EdgeHit>,
}

impl Report for NearestOutput<'_> {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Nearest to {} ({} network)", self.query, self.graph.mode)?;
        match self.vertex {
            Some(hit) => writeln!(
                out,
                "  Node: {} at {} ({:.1} m)",
                self.graph.vertex_osm[hit.vertex.index()],
                self.graph.pos(hit.vertex),
                hit.distance_m
            )?,
            None => writeln!(out, "  Node: none in range")?,
        }
        match self.road {
            Some(hit) => {
                let way = self.graph.way_of(hit.edge);
                writeln!(
                    out,
                    "  Road: {} ({}, way {}) at {} ({:.1} m)",
                    way.label(),
                    way.highway,
                    way.osm_id,
                    hit.snapped,
                    hit.distance_m
                )
            }
            None => writeln!(out, "  Road: none in range"),
        }
    }

    fn to_json(&self) -> Value {
        let mut m = Map::new();
        m.insert("mode".into(), json!(self.graph.mode.as_str()));
        m.insert("query".into(), lat_lon(self.query));
        m.insert(
            "node".into(),
            self.vertex.map_or(Value::Null, |hit| {
                let p = self.graph.pos(hit.vertex);
                json!({
                    "node_id": self.graph.vertex_osm[hit.vertex.index()],
                    "lat": p.lat,
                    "lon": p.lon,
                    "distance_m": round1(hit.distance_m),
                })
            }),
        );
        m.insert(
            "road".into(),
            self.road.map_or(Value::Null, |hit| {
                let way = self.graph.way_of(hit.edge);
                json!({
                    "way_id": way.osm_id,
                    "name": way.name,
                    "highway": way.highway,
                    "snapped": lat_lon(hit.snapped),
                    "distance_m": round1(hit.distance_m),
                })
            }),
        );
        Value::Object(m)
    }

    fn to_geojson(&self) -> Option<Value> {
        let mut features = vec![geojson::point(self.query, json!({ "type": "query" }))];
        if let Some(hit) = self.vertex {
            features.push(geojson::point(
                self.graph.pos(hit.vertex),
                json!({
                    "type": "node",
                    "node_id": self.graph.vertex_osm[hit.vertex.index()],
                    "distance_m": round1(hit.distance_m),
                }),
            ));
        }
        if let Some(hit) = self.road {
            let way = self.graph.way_of(hit.edge);
            features.push(geojson::point(
                hit.snapped,
                json!({ "type": "road", "way_id": way.osm_id, "name": way.name, "distance_m": round1(hit.distance_m) }),
            ));
        }
        Some(geojson::collection(features))
    }
}

// ── Nearby features ───────────────────────────────────────────────────────────

pub struct NearbyOutput<'a> {
    pub index:    &'a FeatureIndex,
    pub query:    GeoPoint,
    /// Filter text as given, for display.
    pub filter:   &'a str,
    pub radius_m: f64,
    pub hits:     &'a [FeatureHit],
}

impl NearbyOutput<'_> {
    fn label(&self, hit: &FeatureHit) -> String {
        let f = &self.index.features[hit.feature];
        match f.name() {
            Some(name) => name.to_owned(),
            None => format!("node {}", f.osm_id),
        }
    }
}

impl Report for NearbyOutput<'_> {
    fn name(&self) -> &'static str {
        "nearby features"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "Features matching {:?} within {:.0} m of {}: {}",
            self.filter,
            self.radius_m,
            self.query,
            self.hits.len()
        )?;
        for (i, hit) in self.hits.iter().enumerate() {
            writeln!(
                out,
                "  {:>3}. {:<32} {:>7.1} m {}",
                i + 1,
                self.label(hit),
                hit.distance_m,
                compass(hit.bearing_deg)
            )?;
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        let features: Vec<Value> = self
            .hits
            .iter()
            .map(|hit| {
                let f = &self.index.features[hit.feature];
                json!({
                    "id": f.osm_id,
                    "lat": f.pos.lat,
                    "lon": f.pos.lon,
                    "name": f.name(),
                    "distance_m": round1(hit.distance_m),
                    "bearing_deg": round1(hit.bearing_deg),
                    "direction": compass(hit.bearing_deg),
                    "tags": f.tags,
                })
            })
            .collect();
        json!({
            "query": lat_lon(self.query),
            "filter": self.filter,
            "radius_m": self.radius_m,
            "count": features.len(),
            "features": features,
        })
    }

    fn to_geojson(&self) -> Option<Value> {
        let mut features = vec![geojson::point(self.query, json!({ "type": "query" }))];
        for hit in self.hits {
            let f = &self.index.features[hit.feature];
            let mut props = Map::new();
            for (k, v) in &f.tags {
                props.insert(k.clone(), json!(v));
            }
            props.insert("id".into(), json!(f.osm_id));
            props.insert("distance_m".into(), json!(round1(hit.distance_m)));
            features.push(geojson::point(f.pos, Value::Object(props)));
        }
        Some(geojson::collection(features))
    }

    fn csv_tables(&self) -> Option<Vec<CsvTable>> {
        let mut t = CsvTable::new(["id", "name", "lat", "lon", "distance_m", "bearing_deg"]);
        for hit in self.hits {
            let f = &self.index.features[hit.feature];
            t.push(vec![
                f.osm_id.to_string(),
                f.name().unwrap_or_default().to_owned(),
                f.pos.lat.to_string(),
                f.pos.lon.to_string(),
                format!("{:.1}", hit.distance_m),
                format!("{:.1}", hit.bearing_deg),
            ]);
        }
        Some(vec![t])
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

pub struct SummaryOutput<'a> {
    pub summary: &'a NetworkSummary,
}

impl Report for SummaryOutput<'_> {
    fn name(&self) -> &'static str {
        "network summary"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        let s = self.summary;
        writeln!(out, "{s}")?;
        writeln!(out, "  ways:           {} ({} oneway)", s.ways, s.oneway_ways)?;
        if !s.by_class.is_empty() {
            writeln!(out)?;
            writeln!(out, "  {:<16} {:>9} {:>10}", "class", "segments", "km")?;
            for (class, c) in &s.by_class {
                writeln!(out, "  {class:<16} {:>9} {:>10.2}", c.segments, c.length_m / 1_000.0)?;
            }
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        let s = self.summary;
        let classes: Map<String, Value> = s
            .by_class
            .iter()
            .map(|(k, c)| (k.clone(), json!({ "segments": c.segments, "length_m": round1(c.length_m) })))
            .collect();
        json!({
            "mode": s.mode.as_str(),
            "nodes": s.vertices,
            "directed_edges": s.directed_edges,
            "segments": s.segments,
            "ways": s.ways,
            "oneway_ways": s.oneway_ways,
            "total_length_m": round1(s.total_length_m),
            "intersections": s.intersections,
            "dead_ends": s.dead_ends,
            "by_class": classes,
        })
    }

    fn csv_tables(&self) -> Option<Vec<CsvTable>> {
        let mut t = CsvTable::new(["highway", "segments", "length_m"]);
        for (class, c) in &self.summary.by_class {
            t.push(vec![class.clone(), c.segments.to_string(), format!("{:.1}", c.length_m)]);
        }
        Some(vec![t])
    }
}
