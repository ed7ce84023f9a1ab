//! Parsing of textual point arguments.
//!
//! All coordinate text is validated here, before any graph or spatial-index
//! work happens, so malformed input is always reported as
//! [`NetError::InvalidCoordinate`] and never reaches the engine.
//!
//! | Syntax             | Example                         |
//! |--------------------|---------------------------------|
//! | point              | `-33.9,151.2`                   |
//! | point list         | `-33.9,151.2; -33.91,151.21`    |
//! | radius             | `500`, `500m`, `2km`            |

use crate::{GeoPoint, NetError, NetResult};

/// Parse a single `"lat,lon"` string.
pub fn parse_point(input: &str) -> NetResult<GeoPoint> {
    let invalid = |reason| NetError::InvalidCoordinate { input: input.to_owned(), reason };

    let text = input.trim();
    if text.is_empty() {
        return Err(invalid("empty coordinate"));
    }

    let mut parts = text.split(',');
    let lat_txt = parts.next().map(str::trim).unwrap_or_default();
    let lon_txt = parts
        .next()
        .map(str::trim)
        .ok_or_else(|| invalid("expected \"lat,lon\""))?;
    if parts.next().is_some() {
        return Err(invalid("expected exactly two comma-separated numbers"));
    }
    if lat_txt.is_empty() || lon_txt.is_empty() {
        return Err(invalid("missing latitude or longitude"));
    }

    let lat: f64 = lat_txt.parse().map_err(|_| invalid("latitude is not a number"))?;
    let lon: f64 = lon_txt.parse().map_err(|_| invalid("longitude is not a number"))?;

    let point = GeoPoint::new(lat, lon);
    if !point.is_valid() {
        return Err(invalid("latitude must be within ±90 and longitude within ±180"));
    }
    Ok(point)
}

/// Parse a `;`-separated list of `"lat,lon"` points, preserving order.
///
/// A single trailing `;` is tolerated; any other empty element is an error.
pub fn parse_points(input: &str) -> NetResult<Vec<GeoPoint>> {
    let text = input.trim();
    if text.is_empty() {
        return Err(NetError::InvalidCoordinate {
            input: input.to_owned(),
            reason: "empty point list",
        });
    }
    let text = text.strip_suffix(';').unwrap_or(text);
    text.split(';').map(parse_point).collect()
}

/// Parse a distance such as `500`, `500m`, or `2km` into metres.
pub fn parse_radius(input: &str) -> NetResult<f64> {
    let text = input.trim().to_ascii_lowercase();
    let (number, scale) = if let Some(km) = text.strip_suffix("km") {
        (km, 1_000.0)
    } else if let Some(m) = text.strip_suffix('m') {
        (m, 1.0)
    } else {
        (text.as_str(), 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| NetError::InvalidArgument(format!("invalid distance {input:?}")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(NetError::InvalidArgument(format!(
            "distance {input:?} must be a non-negative number"
        )));
    }
    Ok(value * scale)
}
