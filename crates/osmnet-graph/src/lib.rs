//! `osmnet-graph`: road graph construction and spatial indexing.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`profile`]    | `RoutingProfiles`, `ModeProfile`: per-mode road tables     |
//! | [`attrs`]      | `WayAttrs`, `Oneway`, `parse_maxspeed`: fixed tag schema   |
//! | [`network`]    | `RoadGraph` (CSR), `RoadGraphBuilder`, `WayInfo`           |
//! | [`build`]      | `build_graph`: nodes + ways + mode → `RoadGraph`           |
//! | [`context`]    | `Network`: graph + spatial index + snapping radius         |
//! | [`undirected`] | `UndirectedGraph`: undirected projection for analyses      |
//! | [`spatial`]    | `SpatialIndex`: nearest vertex / nearest road segment      |
//! | [`features`]   | `FeatureIndex`, `TagFilter`: point-of-interest proximity   |
//! | [`summary`]    | `NetworkSummary`                                           |
//! | [`osm`]        | `load_elements_from_pbf` (feature = `"osm"` only)          |
//! | [`error`]      | `GraphError`, `GraphResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.             |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod attrs;
pub mod build;
pub mod context;
pub mod error;
pub mod features;
pub mod network;
pub mod profile;
pub mod spatial;
pub mod summary;
pub mod undirected;

#[cfg(feature = "osm")]
pub mod osm;


pub use attrs::{Oneway, WayAttrs, parse_maxspeed};
pub use build::build_graph;
pub use context::Network;
pub use error::{GraphError, GraphResult};
pub use features::{Feature, FeatureHit, FeatureIndex, TagFilter};
pub use network::{RoadGraph, RoadGraphBuilder, WayInfo};
pub use profile::{MaxSpeedPolicy, ModeProfile, RoutingProfiles};
pub use spatial::{EdgeHit, SpatialIndex, VertexHit};
pub use summary::{ClassSummary, NetworkSummary};
pub use undirected::{UndirectedEdge, UndirectedGraph};
