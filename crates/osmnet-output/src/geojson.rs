//! GeoJSON building blocks.  Coordinates are `[lon, lat]`.

use osmnet_core::GeoPoint;
use serde_json::{Value, json};

pub fn coord(p: GeoPoint) -> Value {
    json!([p.lon, p.lat])
}

pub fn coords(points: &[GeoPoint]) -> Value {
    Value::Array(points.iter().map(|&p| coord(p)).collect())
}

pub fn point(p: GeoPoint, properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": coord(p) },
        "properties": properties,
    })
}

pub fn line(points: &[GeoPoint], properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "LineString", "coordinates": coords(points) },
        "properties": properties,
    })
}

/// Polygon from an open ring; the closing vertex is added here.  Rings
/// with fewer than three vertices degrade to a point feature.
pub fn polygon(ring: &[GeoPoint], properties: Value) -> Value {
    if ring.len() < 3 {
        return match ring.first() {
            Some(&p) => point(p, properties),
            None => json!({ "type": "Feature", "geometry": null, "properties": properties }),
        };
    }
    let mut closed: Vec<GeoPoint> = ring.to_vec();
    closed.push(ring[0]);
    json!({
        "type": "Feature",
        "geometry": { "type": "Polygon", "coordinates": [coords(&closed)] },
        "properties": properties,
    })
}

pub fn collection(features: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": features })
}

pub fn lat_lon(p: GeoPoint) -> Value {
    json!({ "lat": p.lat, "lon": p.lon })
}

/// Round to one decimal for metre and second fields.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub fn round3(x: f64) -> f64 {
    (x * 1_000.0).round() / 1_000.0
}
