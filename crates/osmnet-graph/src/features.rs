//! Point-of-interest proximity search over tagged map nodes.
//!
//! Filter syntax:
//!
//! | Filter           | Matches                                  |
//! |------------------|------------------------------------------|
//! | `amenity`        | any node with an `amenity` tag           |
//! | `amenity=*`      | same as above                            |
//! | `amenity=cafe`   | `amenity` equal to `cafe`                |
//! | `shop=bakery,deli` | `shop` equal to either value           |

use std::str::FromStr;

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use osmnet_core::{GeoPoint, NetError, OsmId, OsmNode, Tags};

/// Tag predicate parsed from `key`, `key=*`, `key=value`, or `key=v1,v2`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagFilter {
    Any,
    HasKey(String),
    OneOf(String, Vec<String>),
}

impl TagFilter {
    pub fn matches(&self, tags: &Tags) -> bool {
        match self {
            TagFilter::Any => !tags.is_empty(),
            TagFilter::HasKey(k) => tags.contains_key(k),
            TagFilter::OneOf(k, values) => tags.get(k).is_some_and(|v| values.iter().any(|x| x == v)),
        }
    }
}

impl FromStr for TagFilter {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() || text == "*" {
            return Ok(TagFilter::Any);
        }
        let (key, value) = match text.split_once('=') {
            Some((k, v)) => (k.trim(), Some(v.trim())),
            None => (text, None),
        };
        if key.is_empty() {
            return Err(NetError::InvalidArgument(format!("tag filter {s:?} has an empty key")));
        }
        match value {
            None | Some("*") => Ok(TagFilter::HasKey(key.to_owned())),
            Some(v) => {
                let values: Vec<String> = v
                    .split(',')
                    .map(str::trim)
                    .filter(|x| !x.is_empty())
                    .map(str::to_owned)
                    .collect();
                if values.is_empty() {
                    return Err(NetError::InvalidArgument(format!(
                        "tag filter {s:?} has an empty value list"
                    )));
                }
                Ok(TagFilter::OneOf(key.to_owned(), values))
            }
        }
    }
}

/// A tagged point feature.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub osm_id: OsmId,
    pub pos:    GeoPoint,
    pub tags:   Tags,
}

impl Feature {
    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str)
    }
}

/// A feature found by [`FeatureIndex::nearest`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FeatureHit {
    /// Index into [`FeatureIndex::features`].
    pub feature:     usize,
    pub distance_m:  f64,
    pub bearing_deg: f64,
}

#[derive(Clone)]
struct FeatureEntry {
    point: [f64; 3],
    idx:   usize,
}

impl RTreeObject for FeatureEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for FeatureEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        (0..3).map(|i| (self.point[i] - point[i]).powi(2)).sum()
    }
}

/// R-tree over every node that carries at least one tag.
pub struct FeatureIndex {
    pub features: Vec<Feature>,
    tree: RTree<FeatureEntry>,
}

impl FeatureIndex {
    pub fn build(nodes: &[OsmNode]) -> Self {
        let mut features: Vec<Feature> = nodes
            .iter()
            .filter(|n| !n.tags.is_empty() && n.pos().is_valid())
            .map(|n| Feature { osm_id: n.id, pos: n.pos(), tags: n.tags.clone() })
            .collect();
        features.sort_by_key(|f| f.osm_id);
        features.dedup_by_key(|f| f.osm_id);

        let entries = features
            .iter()
            .enumerate()
            .map(|(idx, f)| FeatureEntry { point: f.pos.to_ecef(), idx })
            .collect();
        FeatureIndex { features, tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Up to `count` matching features within `radius_m` of `point`, nearest
    /// first.  Equal distances are ordered by source id.  `count == 0`
    /// returns nothing.
    pub fn nearest(
        &self,
        point: GeoPoint,
        filter: &TagFilter,
        radius_m: f64,
        count: usize,
    ) -> Vec<FeatureHit> {
        if count == 0 {
            return Vec::new();
        }
        let query = point.to_ecef();
        let mut hits: Vec<FeatureHit> = Vec::new();
        for (entry, d2) in self.tree.nearest_neighbor_iter_with_distance_2(&query) {
            // Chord never exceeds arc length.
            if d2.sqrt() > radius_m {
                break;
            }
            // Keep collecting past `count` only while ties are possible.
            if hits.len() >= count {
                let last = hits[hits.len() - 1].distance_m;
                if d2.sqrt() > last + 1e-3 {
                    break;
                }
            }
            let feature = &self.features[entry.idx];
            if !filter.matches(&feature.tags) {
                continue;
            }
            let distance_m = point.distance_m(feature.pos);
            if distance_m > radius_m {
                continue;
            }
            hits.push(FeatureHit {
                feature: entry.idx,
                distance_m,
                bearing_deg: point.bearing_deg(feature.pos),
            });
        }
        hits.sort_by(|a, b| {
            a.distance_m
                .total_cmp(&b.distance_m)
                .then_with(|| self.features[a.feature].osm_id.cmp(&self.features[b.feature].osm_id))
        });
        hits.truncate(count);
        hits
    }
}
