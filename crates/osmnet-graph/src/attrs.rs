//! Reduction of free-form way tags to the fixed attribute schema the graph
//! builder consumes.

use osmnet_core::Tags;

/// Direction restriction carried by a way.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Oneway {
    /// Traversable in both directions.
    #[default]
    No,
    /// Only in the way's node order.
    Forward,
    /// Only against the way's node order (`oneway=-1`).
    Reverse,
}

impl Oneway {
    /// Resolve the oneway state from a `highway` class and the raw tags.
    ///
    /// An explicit `oneway=*` always wins.  Without one, roundabouts and
    /// motorways (including their links) are oneway in node order.
    pub fn from_tags(highway: &str, tags: &Tags) -> Self {
        match tags.get("oneway").map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("yes" | "true" | "1") => return Oneway::Forward,
            Some("-1" | "reverse") => return Oneway::Reverse,
            Some("no" | "false" | "0") => return Oneway::No,
            _ => {}
        }
        let roundabout = matches!(
            tags.get("junction").map(String::as_str),
            Some("roundabout" | "circular")
        );
        if roundabout || matches!(highway, "motorway" | "motorway_link") {
            Oneway::Forward
        } else {
            Oneway::No
        }
    }

    /// `true` if travel in the given direction is permitted.
    #[inline]
    pub fn allows(self, along_way: bool) -> bool {
        match self {
            Oneway::No      => true,
            Oneway::Forward => along_way,
            Oneway::Reverse => !along_way,
        }
    }

    pub fn is_oneway(self) -> bool {
        self != Oneway::No
    }
}

/// The attributes of a way that survive graph construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WayAttrs {
    pub highway:      Option<String>,
    pub name:         Option<String>,
    pub oneway:       Oneway,
    pub maxspeed_kmh: Option<f64>,
}

impl WayAttrs {
    pub fn from_tags(tags: &Tags) -> Self {
        let highway = tags.get("highway").map(|h| h.trim().to_owned()).filter(|h| !h.is_empty());
        let name = tags
            .get("name")
            .or_else(|| tags.get("ref"))
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty());
        let oneway = Oneway::from_tags(highway.as_deref().unwrap_or(""), tags);
        let maxspeed_kmh = tags.get("maxspeed").and_then(|v| parse_maxspeed(v));
        WayAttrs { highway, name, oneway, maxspeed_kmh }
    }
}

/// Largest posted speed accepted as plausible, in km/h.
const MAX_PLAUSIBLE_KMH: f64 = 300.0;

/// Parse an OSM `maxspeed` value into km/h.
///
/// Accepts plain numbers (`"50"`), unit suffixes (`"30 mph"`, `"10 knots"`),
/// and lists (`"50;30"`, first value used).  Symbolic values such as
/// `"none"`, `"signals"`, `"variable"`, `"walk"` and zone codes like
/// `"DE:urban"` yield `None`, as do values outside `(0, 300]`.
pub fn parse_maxspeed(value: &str) -> Option<f64> {
    let text = value.trim().to_ascii_lowercase();
    if matches!(text.as_str(), "" | "none" | "signals" | "variable" | "walk") {
        return None;
    }

    let numeric: String = text
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let raw: f64 = numeric.parse().ok()?;

    let rest = &text[numeric.len()..];
    let rest = rest.split(';').next().unwrap_or("").trim();
    let kmh = if rest.starts_with("mph") {
        raw * 1.609_344
    } else if rest.starts_with("knots") || rest.starts_with("kn") {
        raw * 1.852
    } else {
        raw
    };

    (kmh > 0.0 && kmh <= MAX_PLAUSIBLE_KMH).then_some(kmh)
}
