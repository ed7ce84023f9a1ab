//! Map-element records handed over by the map-data collaborator.
//!
//! These are the loosely typed inputs of the graph builder: tag maps are
//! kept as strings here and reduced to a fixed schema at build time.
//! `BTreeMap` keeps tag iteration order stable, which keeps JSON output and
//! the builder deterministic.

use std::collections::BTreeMap;

use crate::{GeoPoint, OsmId};

/// Free-form `key → value` tag map.
pub type Tags = BTreeMap<String, String>;

/// A point element with position and tags.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OsmNode {
    pub id:   OsmId,
    pub lat:  f64,
    pub lon:  f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Tags,
}

impl OsmNode {
    pub fn new(id: OsmId, lat: f64, lon: f64) -> Self {
        Self { id, lat, lon, tags: Tags::new() }
    }

    /// Builder-style helper used heavily in tests and loaders.
    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_owned(), value.to_owned());
        self
    }

    #[inline]
    pub fn pos(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// An ordered sequence of node references with tags.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OsmWay {
    pub id:   OsmId,
    pub refs: Vec<OsmId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Tags,
}

impl OsmWay {
    pub fn new(id: OsmId, refs: Vec<OsmId>) -> Self {
        Self { id, refs, tags: Tags::new() }
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// The full element snapshot for one invocation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementSet {
    #[cfg_attr(feature = "serde", serde(default))]
    pub nodes: Vec<OsmNode>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ways:  Vec<OsmWay>,
}

impl ElementSet {
    pub fn new(nodes: Vec<OsmNode>, ways: Vec<OsmWay>) -> Self {
        Self { nodes, ways }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.ways.is_empty()
    }
}
