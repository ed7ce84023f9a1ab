//! `osmnet-analysis`: whole-network analyses over a [`RoadGraph`].
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`components`]  | connected components of the undirected projection        |
//! | [`centrality`]  | sampled betweenness centrality for vertices and edges    |
//! | [`bridges`]     | bridges, articulation points, and bottleneck ranking     |
//! | [`detour`]      | detour factor for one pair and sampled network statistics |
//!
//! Every analysis is a pure function of the graph and its config; nothing
//! is cached between calls.  Sampled analyses take an explicit seed.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | (default) Rayon for centrality source batches.          |
//! | `serde`    | Derives `Serialize`/`Deserialize` on analysis configs.  |
//!
//! [`RoadGraph`]: osmnet_graph::RoadGraph

pub mod bridges;
pub mod centrality;
pub mod components;
pub mod detour;

#[cfg(test)]
mod tests;

pub use bridges::{
    ArticulationPoint, BottleneckConfig, BottleneckReport, Bridge, BridgeScan, bottlenecks, scan_bridges,
};
pub use centrality::{CentralityConfig, CentralityReport, EdgeScore, VertexScore, betweenness};
pub use components::{Components, ConnectivityReport, connected_components, connectivity};
pub use detour::{
    DetourFactor, DetourRating, DetourSampleConfig, DetourStats, detour_between, detour_factor,
    detour_statistics,
};
