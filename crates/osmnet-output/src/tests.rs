//! Rendering tests for osmnet-output.

#[cfg(test)]
mod helpers {
    use osmnet_core::{GeoPoint, ModeSet, Optimize, TravelMode, VertexId};
    use osmnet_graph::{RoadGraph, RoadGraphBuilder, WayInfo};
    use osmnet_route::{DijkstraRouter, Route, Router};

    /// 0 ─Main─ 1 ─Main─ 2, then north on High St to 3.
    pub fn graph() -> RoadGraph {
        let mut b = RoadGraphBuilder::new(TravelMode::Drive);
        b.add_vertex(11, GeoPoint::new(0.0, 0.0));
        b.add_vertex(12, GeoPoint::new(0.0, 0.001));
        b.add_vertex(13, GeoPoint::new(0.0, 0.002));
        b.add_vertex(14, GeoPoint::new(0.001, 0.002));
        let main = b.add_way(WayInfo::new(100, "residential").named("Main"));
        let high = b.add_way(WayInfo::new(101, "primary").named("High St"));
        let modes = ModeSet::only(TravelMode::Drive);
        b.add_segment(VertexId(0), VertexId(1), main, 111.0, 10.0, modes);
        b.add_segment(VertexId(1), VertexId(2), main, 111.0, 10.0, modes);
        b.add_segment(VertexId(2), VertexId(3), high, 111.0, 8.0, modes);
        b.build()
    }

    pub fn route(graph: &RoadGraph, from: u32, to: u32) -> Route {
        DijkstraRouter
            .shortest_path(graph, VertexId(from), VertexId(to), Optimize::Time)
            .into_route()
            .expect("connected")
    }
}

#[cfg(test)]
mod format {
    use crate::Format;

    #[test]
    fn parse_and_display() {
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("GeoJSON".parse::<Format>().unwrap(), Format::GeoJson);
        assert!("xml".parse::<Format>().is_err());
        assert_eq!(Format::Csv.to_string(), "csv");
        assert_eq!(Format::default(), Format::Text);
    }
}

#[cfg(test)]
mod routes {
    use osmnet_core::{GeoPoint, Optimize};
    use osmnet_route::{PathOutcome, directions};
    use serde_json::Value;

    use super::helpers::{graph, route};
    use crate::{AlternativesOutput, DirectionsOutput, Format, RouteOutput, render_to_string};

    #[test]
    fn route_json_and_geojson() {
        let g = graph();
        let outcome = PathOutcome::Found(route(&g, 0, 3));
        let view = RouteOutput {
            graph: &g,
            origin: GeoPoint::new(0.0, 0.0),
            destination: GeoPoint::new(0.001, 0.002),
            optimize: Optimize::Time,
            outcome: &outcome,
        };

        let json: Value = serde_json::from_str(&render_to_string(&view, Format::Json).unwrap()).unwrap();
        assert_eq!(json["found"], true);
        assert_eq!(json["distance_m"], 333.0);
        assert_eq!(json["time_s"], 28.0);
        assert_eq!(json["path"], serde_json::json!([11, 12, 13, 14]));
        assert_eq!(json["roads"], serde_json::json!(["Main", "High St"]));
        assert_eq!(json["segments"].as_array().unwrap().len(), 3);

        let geo: Value = serde_json::from_str(&render_to_string(&view, Format::GeoJson).unwrap()).unwrap();
        assert_eq!(geo["type"], "FeatureCollection");
        let line = &geo["features"][0]["geometry"];
        assert_eq!(line["type"], "LineString");
        // [lon, lat] order.
        assert_eq!(line["coordinates"][1], serde_json::json!([0.001, 0.0]));
    }

    #[test]
    fn unreachable_route_renders() {
        let g = graph();
        let outcome = PathOutcome::Unreachable;
        let view = RouteOutput {
            graph: &g,
            origin: GeoPoint::new(0.0, 0.0),
            destination: GeoPoint::new(0.0, 0.002),
            optimize: Optimize::Distance,
            outcome: &outcome,
        };
        let text = render_to_string(&view, Format::Text).unwrap();
        assert!(text.contains("No route found"));
        let json: Value = serde_json::from_str(&render_to_string(&view, Format::Json).unwrap()).unwrap();
        assert_eq!(json["found"], false);
        assert!(json.get("distance_m").is_none());
    }

    #[test]
    fn alternatives_are_labelled_with_deltas() {
        let g = graph();
        let mut slower = route(&g, 0, 3);
        slower.time_s += 60.0;
        let routes = [route(&g, 0, 3), slower];
        let view = AlternativesOutput {
            graph: &g,
            origin: GeoPoint::new(0.0, 0.0),
            destination: GeoPoint::new(0.001, 0.002),
            optimize: Optimize::Time,
            routes: &routes,
        };
        let json: Value = serde_json::from_str(&render_to_string(&view, Format::Json).unwrap()).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["routes"][0]["label"], "fastest");
        assert_eq!(json["routes"][1]["label"], "alternative 1");
        assert_eq!(json["routes"][1]["extra_time_s"], 60.0);

        let text = render_to_string(&view, Format::Text).unwrap();
        assert!(text.contains("(+1.0 min)"), "{text}");
    }

    #[test]
    fn directions_text_and_csv() {
        let g = graph();
        let r = route(&g, 0, 3);
        let steps = directions(&g, &r);
        let view = DirectionsOutput { graph: &g, optimize: Optimize::Time, route: &r, steps: &steps };

        let text = render_to_string(&view, Format::Text).unwrap();
        assert!(text.contains("Head east on Main (222 m)"), "{text}");
        assert!(text.contains("Turn left onto High St"), "{text}");
        assert!(text.contains("Arrive at destination"));

        let csv = render_to_string(&view, Format::Csv).unwrap();
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        assert_eq!(rdr.records().count(), 3);
    }
}

#[cfg(test)]
mod matrix {
    use osmnet_core::{GeoPoint, Optimize, TravelMode};
    use osmnet_graph::Network;
    use osmnet_route::distance_matrix;
    use serde_json::Value;

    use super::helpers::graph;
    use crate::{Format, MatrixOutput, render_to_path, render_to_string};

    fn matrix() -> osmnet_route::DistanceMatrix {
        let net = Network::from_graph(graph()).with_max_snap(Some(500.0));
        let pts = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.001, 0.002), GeoPoint::new(10.0, 10.0)];
        distance_matrix(&net, &pts, Optimize::Time).unwrap()
    }

    #[test]
    fn json_uses_null_for_missing_cells() {
        let m = matrix();
        let view = MatrixOutput { matrix: &m, mode: TravelMode::Drive };
        let json: Value = serde_json::from_str(&render_to_string(&view, Format::Json).unwrap()).unwrap();
        assert_eq!(json["distance_matrix_m"][0][1], 333.0);
        assert_eq!(json["time_matrix_s"][1][0], 28.0);
        assert_eq!(json["distance_matrix_m"][0][0], 0.0);
        assert!(json["distance_matrix_m"][0][2].is_null());
        assert_eq!(json["points"][2]["resolved"], false);
        assert_eq!(json["unreachable_pairs"], 4);
    }

    #[test]
    fn csv_has_two_blocks() {
        let m = matrix();
        let view = MatrixOutput { matrix: &m, mode: TravelMode::Drive };
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("matrix.csv");
        render_to_path(&view, Format::Csv, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let blocks: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("Distance (m),P1,P2,P3"));
        assert!(blocks[1].starts_with("Time (s),P1,P2,P3"));
        assert!(blocks[0].lines().nth(1).unwrap().ends_with("333.0,"));
    }

    #[test]
    fn geojson_is_unsupported() {
        let m = matrix();
        let view = MatrixOutput { matrix: &m, mode: TravelMode::Drive };
        let err = render_to_string(&view, Format::GeoJson).unwrap_err();
        assert!(matches!(err, crate::OutputError::Unsupported { .. }));
        assert_eq!(err.to_string(), "distance matrix results cannot be rendered as geojson");
    }

    #[test]
    fn unsupported_format_leaves_existing_file() {
        let m = matrix();
        let view = MatrixOutput { matrix: &m, mode: TravelMode::Drive };
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "keep\n").unwrap();

        assert!(render_to_path(&view, Format::GeoJson, &path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep\n");
    }
}

#[cfg(test)]
mod analysis {
    use osmnet_analysis::{BottleneckConfig, bottlenecks, connectivity};
    use osmnet_core::TravelMode;
    use serde_json::Value;

    use super::helpers::graph;
    use crate::{BottleneckOutput, ConnectivityOutput, Format, render_to_string};

    #[test]
    fn connectivity_json_minimum() {
        let g = graph();
        let report = connectivity(&g);
        let view = ConnectivityOutput { report: &report, mode: TravelMode::Drive };
        let json: Value = serde_json::from_str(&render_to_string(&view, Format::Json).unwrap()).unwrap();
        assert_eq!(json["num_components"], 1);
        assert_eq!(json["is_connected"], true);
        assert_eq!(json["components"][0]["percentage"], 100.0);
    }

    #[test]
    fn bridges_as_geojson_lines() {
        let g = graph();
        let report = bottlenecks(&g, &BottleneckConfig::default());
        let view = BottleneckOutput { report: &report, mode: TravelMode::Drive };
        let geo: Value = serde_json::from_str(&render_to_string(&view, Format::GeoJson).unwrap()).unwrap();
        let features = geo["features"].as_array().unwrap();
        let lines = features.iter().filter(|f| f["geometry"]["type"] == "LineString").count();
        assert_eq!(lines, 3);
        assert_eq!(report.articulation_count, 2);
    }
}

#[cfg(test)]
mod reach {
    use osmnet_core::{GeoPoint, VertexId};
    use osmnet_route::{IsochroneConfig, isochrone};
    use serde_json::Value;

    use super::helpers::graph;
    use crate::{Format, IsochroneOutput, render_to_string};

    #[test]
    fn polygons_are_closed_rings() {
        let g = graph();
        let iso = isochrone(&g, VertexId(1), &[0.0, 30.0], &IsochroneConfig { resolution: 8 }).unwrap();
        let origins = [iso.center];
        let isos = [Some(iso)];
        let view = IsochroneOutput { graph: &g, origins: &origins, isochrones: &isos };
        let geo: Value = serde_json::from_str(&render_to_string(&view, Format::GeoJson).unwrap()).unwrap();
        let features = geo["features"].as_array().unwrap();
        // Origin, then the 30 s polygon, then the degenerate 0 s band.
        assert_eq!(features.len(), 3);
        let ring = features[1]["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 9);
        assert_eq!(ring.first(), ring.last());
        assert_eq!(features[2]["geometry"]["type"], "Point");

        assert!(render_to_string(&view, Format::Csv).is_err());
    }

    #[test]
    fn unresolved_origin_keeps_its_slot() {
        let g = graph();
        let iso = isochrone(&g, VertexId(0), &[60.0], &IsochroneConfig { resolution: 8 }).unwrap();
        let far = GeoPoint::new(10.0, 10.0);
        let origins = [far, iso.center];
        let isos = [None, Some(iso)];
        let view = IsochroneOutput { graph: &g, origins: &origins, isochrones: &isos };

        let json: Value = serde_json::from_str(&render_to_string(&view, Format::Json).unwrap()).unwrap();
        assert_eq!(json["isochrones"][0]["resolved"], false);
        assert_eq!(json["isochrones"][1]["resolved"], true);
        assert_eq!(json["isochrones"][1]["bands"].as_array().unwrap().len(), 1);

        let text = render_to_string(&view, Format::Text).unwrap();
        assert!(text.contains("(unresolved)"));

        let geo: Value = serde_json::from_str(&render_to_string(&view, Format::GeoJson).unwrap()).unwrap();
        assert_eq!(geo["features"][0]["properties"]["type"], "unresolved");
        assert_eq!(geo["features"][1]["properties"]["origin"], 2);
    }
}

#[cfg(test)]
mod lookup {
    use osmnet_core::{GeoPoint, OsmNode};
    use osmnet_graph::{FeatureIndex, NetworkSummary, TagFilter};
    use serde_json::Value;

    use super::helpers::graph;
    use crate::{Format, NearbyOutput, SummaryOutput, render_to_string};

    #[test]
    fn nearby_csv_and_json() {
        let nodes = vec![
            OsmNode::new(1, 0.0, 0.0005).with_tag("amenity", "cafe").with_tag("name", "Bean"),
            OsmNode::new(2, 0.0, 0.003).with_tag("amenity", "cafe"),
            OsmNode::new(3, 0.0, 0.0001).with_tag("amenity", "bench"),
        ];
        let index = FeatureIndex::build(&nodes);
        let filter: TagFilter = "amenity=cafe".parse().unwrap();
        let query = GeoPoint::new(0.0, 0.0);
        let hits = index.nearest(query, &filter, 1_000.0, 10);
        let view = NearbyOutput { index: &index, query, filter: "amenity=cafe", radius_m: 1_000.0, hits: &hits };

        let json: Value = serde_json::from_str(&render_to_string(&view, Format::Json).unwrap()).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["features"][0]["name"], "Bean");
        assert_eq!(json["features"][0]["direction"], "E");

        let csv = render_to_string(&view, Format::Csv).unwrap();
        assert!(csv.starts_with("id,name,lat,lon,distance_m,bearing_deg\n1,Bean,"));
    }

    #[test]
    fn summary_lists_classes() {
        let g = graph();
        let summary = NetworkSummary::of(&g);
        let view = SummaryOutput { summary: &summary };
        let json: Value = serde_json::from_str(&render_to_string(&view, Format::Json).unwrap()).unwrap();
        assert_eq!(json["segments"], 3);
        assert_eq!(json["by_class"]["residential"]["segments"], 2);
        let text = render_to_string(&view, Format::Text).unwrap();
        assert!(text.contains("primary"));
    }
}
