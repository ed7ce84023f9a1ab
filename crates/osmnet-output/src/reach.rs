use std::io::{self, Write};

use osmnet_core::GeoPoint;
use osmnet_graph::RoadGraph;
use osmnet_route::Isochrone;
use serde_json::{Value, json};

use crate::geojson::{self, coords, lat_lon, round1};
use crate::Report;

/// One or more isochrones; a single origin is the common case.
///
/// `isochrones` is parallel to `origins`; `None` marks an origin with no
/// vertex in range.
pub struct IsochroneOutput<'a> {
    pub graph:      &'a RoadGraph,
    pub origins:    &'a [GeoPoint],
    pub isochrones: &'a [Option<Isochrone>],
}

impl<'a> IsochroneOutput<'a> {
    fn slots(&self) -> impl Iterator<Item = (usize, GeoPoint, Option<&'a Isochrone>)> + '_ {
        self.origins
            .iter()
            .zip(self.isochrones)
            .enumerate()
            .map(|(i, (&p, iso))| (i, p, iso.as_ref()))
    }
}

impl Report for IsochroneOutput<'_> {
    fn name(&self) -> &'static str {
        "isochrone"
    }

    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Isochrones ({})", self.graph.mode)?;
        writeln!(out, "{}", "=".repeat(50))?;
        for (_, point, iso) in self.slots() {
            let Some(iso) = iso else {
                writeln!(out, "Origin: {point} (unresolved)")?;
                continue;
            };
            writeln!(out, "Origin: {}", iso.center)?;
            for band in &iso.bands {
                writeln!(
                    out,
                    "  {:>6.1} min: {:>6} nodes, max radius {:.2} km",
                    band.threshold_s / 60.0,
                    band.vertices.len(),
                    band.max_distance_m / 1_000.0
                )?;
            }
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        let isochrones: Vec<Value> = self
            .slots()
            .map(|(_, point, iso)| {
                let Some(iso) = iso else {
                    return json!({ "query": lat_lon(point), "resolved": false });
                };
                let bands: Vec<Value> = iso
                    .bands
                    .iter()
                    .map(|b| {
                        json!({
                            "threshold_s": b.threshold_s,
                            "threshold_min": round1(b.threshold_s / 60.0),
                            "reachable_nodes": b.vertices.len(),
                            "max_distance_m": round1(b.max_distance_m),
                            "boundary": coords(&b.boundary),
                        })
                    })
                    .collect();
                json!({
                    "query": lat_lon(point),
                    "resolved": true,
                    "origin": lat_lon(iso.center),
                    "origin_node": self.graph.vertex_osm[iso.origin.index()],
                    "bands": bands,
                })
            })
            .collect();
        json!({ "mode": self.graph.mode.as_str(), "isochrones": isochrones })
    }

    fn to_geojson(&self) -> Option<Value> {
        let mut features = Vec::new();
        for (i, point, iso) in self.slots() {
            let Some(iso) = iso else {
                features.push(geojson::point(
                    point,
                    json!({ "type": "unresolved", "origin": i + 1, "mode": self.graph.mode.as_str() }),
                ));
                continue;
            };
            features.push(geojson::point(
                iso.center,
                json!({ "type": "origin", "origin": i + 1, "mode": self.graph.mode.as_str() }),
            ));
            // Largest band first so smaller ones draw on top.
            for band in iso.bands.iter().rev() {
                features.push(geojson::polygon(
                    &band.boundary,
                    json!({
                        "origin": i + 1,
                        "time_minutes": round1(band.threshold_s / 60.0),
                        "threshold_s": band.threshold_s,
                        "mode": self.graph.mode.as_str(),
                        "reachable_nodes": band.vertices.len(),
                    }),
                ));
            }
        }
        Some(geojson::collection(features))
    }
}
