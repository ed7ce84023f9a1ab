//! `osmnet-output`: result rendering for the osmnet command line.
//!
//! Every query result is wrapped in a small borrowed view (`RouteOutput`,
//! `MatrixOutput`, …) that implements [`Report`].  [`render`] turns any
//! report into one of four formats:
//!
//! | Format    | Support                                                     |
//! |-----------|-------------------------------------------------------------|
//! | `text`    | every report                                                |
//! | `json`    | every report                                                |
//! | `geojson` | reports with geometry (routes, isochrones, bridges, POIs)   |
//! | `csv`     | tabular reports (matrix, route segments, directions, POIs)  |
//!
//! Requesting a format a report cannot produce is an
//! [`OutputError::Unsupported`] error, never an empty document.
//!
//! # Usage
//!
//! ```rust,ignore
//! use osmnet_output::{Format, MatrixOutput, render};
//!
//! let view = MatrixOutput { matrix: &matrix, mode };
//! render(&view, Format::Csv, &mut std::io::stdout())?;
//! ```

pub mod analysis;
pub mod csv;
pub mod error;
pub mod format;
pub mod geojson;
pub mod lookup;
pub mod matrix;
pub mod reach;
pub mod report;
pub mod route;

#[cfg(test)]
mod tests;

pub use analysis::{BottleneckOutput, CentralityOutput, ConnectivityOutput, DetourOutput, DetourStatsOutput};
pub use error::{OutputError, OutputResult};
pub use format::Format;
pub use lookup::{NearbyOutput, NearestOutput, SummaryOutput};
pub use matrix::MatrixOutput;
pub use reach::IsochroneOutput;
pub use report::{CsvTable, Report, render, render_to_path, render_to_string};
pub use route::{AlternativesOutput, DirectionsOutput, RouteOutput, WaypointOutput};
