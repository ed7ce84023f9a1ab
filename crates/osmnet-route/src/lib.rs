//! `osmnet-route`: path finding and reachability over a [`RoadGraph`].
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`dijkstra`]     | `shortest_path_tree`, `EdgeWeight`, `Penalized`           |
//! | [`route`]        | `Route`, `PathOutcome`, `Router` trait, `DijkstraRouter`  |
//! | [`waypoints`]    | ordered multi-stop routing                                |
//! | [`alternatives`] | penalty-based alternative routes                          |
//! | [`directions`]   | turn-by-turn instructions                                 |
//! | [`matrix`]       | N×N distance / time matrices                              |
//! | [`reach`]        | reachability sets and isochrone boundaries                |
//!
//! All operations borrow an immutable graph; none of them mutate it.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | (default) Rayon for matrix rows and batched isochrones.    |
//! | `serde`    | Derives `Serialize`/`Deserialize` on query configs.        |
//!
//! [`RoadGraph`]: osmnet_graph::RoadGraph

pub mod alternatives;
pub mod dijkstra;
pub mod directions;
pub mod matrix;
pub mod reach;
pub mod route;
pub mod waypoints;

#[cfg(test)]
mod tests;

pub use alternatives::{AlternativesConfig, alternative_routes};
pub use dijkstra::{EdgeWeight, Penalized, ShortestPathTree, shortest_path_tree};
pub use directions::{Instruction, Maneuver, directions};
pub use matrix::{DistanceMatrix, distance_matrix};
pub use reach::{Isochrone, IsochroneBand, IsochroneConfig, batch_isochrones, isochrone};
pub use route::{DijkstraRouter, PathOutcome, Route, RouteSegment, Router, route_between};
pub use waypoints::{MultiRoute, WaypointOutcome, route_waypoints};
