//! `osmnet-core`: foundational types for the osmnet routing engine.
//!
//! This crate is a dependency of every other `osmnet-*` crate.  It has no
//! `osmnet-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`ids`]       | `VertexId`, `EdgeId`, `OsmId`                            |
//! | [`geo`]       | `GeoPoint`, haversine distance, bearings, projection     |
//! | [`mode`]      | `TravelMode`, `ModeSet`, `Optimize`                      |
//! | [`element`]   | `OsmNode`, `OsmWay`, `ElementSet` input records          |
//! | [`coords`]    | `"lat,lon"` and `;`-separated point parsing              |
//! | [`rng`]       | `SampleRng` (seeded sampling for analyses)               |
//! | [`error`]     | `NetError`, `ErrorKind`, `ResultClass`, `NetResult`      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod coords;
pub mod element;
pub mod error;
pub mod geo;
pub mod ids;
pub mod mode;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coords::{parse_point, parse_points, parse_radius};
pub use element::{ElementSet, OsmNode, OsmWay, Tags};
pub use error::{ErrorKind, NetError, NetResult, ResultClass};
pub use geo::GeoPoint;
pub use ids::{EdgeId, OsmId, VertexId};
pub use mode::{ModeSet, Optimize, TravelMode};
pub use rng::SampleRng;
