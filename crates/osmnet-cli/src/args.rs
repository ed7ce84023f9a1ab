//! Command-line definitions.
//!
//! Point arguments stay plain strings here and are parsed by
//! `osmnet_core::parse_point(s)` before any map data is loaded, so a
//! malformed coordinate is reported as invalid input without the cost of
//! building a graph.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use osmnet_core::{Optimize, TravelMode};
use osmnet_output::Format;

#[derive(Parser)]
#[command(name = "osmnet")]
#[command(about = "Routing and road-network analysis over OpenStreetMap data", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Map data: a JSON element file ({"nodes": [...], "ways": [...]}), or
    /// an OSM PBF extract when built with the `osm` feature
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Travel mode
    #[arg(short, long, global = true, default_value = "drive")]
    pub mode: TravelMode,

    /// Routing criterion
    #[arg(long, global = true, default_value = "time")]
    pub optimize: Optimize,

    /// Output format: text, json, geojson or csv
    #[arg(short, long, global = true, default_value = "text")]
    pub format: Format,

    /// Write the result to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// JSON routing profiles overriding the built-in speed tables
    #[arg(long, global = true)]
    pub profiles: Option<PathBuf>,

    /// Maximum snapping distance for query points, e.g. `250`, `250m`, `1km`
    #[arg(long, global = true)]
    pub max_snap: Option<String>,

    /// Log at debug level (-vv for trace); otherwise RUST_LOG or warn
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Shortest route between two points
    Route(PairArgs),

    /// Route through an ordered list of waypoints
    Waypoints {
        /// Semicolon-separated "lat,lon" list
        #[arg(long, allow_hyphen_values = true)]
        points: String,
    },

    /// Up to N meaningfully different routes between two points
    Alternatives {
        #[command(flatten)]
        pair: PairArgs,

        /// Number of routes wanted
        #[arg(short = 'n', long, default_value_t = 3, allow_negative_numbers = true)]
        count: i64,
    },

    /// Turn-by-turn directions between two points
    Directions(PairArgs),

    /// Distance and time matrix between points
    Matrix {
        /// Semicolon-separated "lat,lon" list
        #[arg(long, allow_hyphen_values = true)]
        points: String,
    },

    /// Areas reachable within travel-time thresholds
    Isochrone {
        /// Origin point, or a semicolon-separated list for a batch
        #[arg(long, allow_hyphen_values = true)]
        at: String,

        /// Comma-separated thresholds in minutes
        #[arg(long, default_value = "5,10,15")]
        times: String,

        /// Number of angular sectors in each boundary
        #[arg(long, default_value_t = 36)]
        resolution: usize,
    },

    /// Connected components of the road network
    Connectivity,

    /// Sampled betweenness centrality
    Centrality {
        /// Number of source vertices
        #[arg(long, default_value_t = 100)]
        sample: usize,

        /// Entries in each ranking
        #[arg(long, default_value_t = 20)]
        top: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Bridges and articulation points
    Bottleneck {
        /// Entries in each ranking
        #[arg(long, default_value_t = 20)]
        top: usize,
    },

    /// Network distance over straight-line distance, for one pair or sampled
    Detour {
        /// Origin; with --to, measures one pair instead of sampling
        #[arg(long, requires = "to", allow_hyphen_values = true)]
        from: Option<String>,

        #[arg(long, requires = "from", allow_hyphen_values = true)]
        to: Option<String>,

        /// Number of sampled pairs
        #[arg(long, default_value_t = 100)]
        sample: usize,

        /// Skip sampled pairs closer than this, e.g. `100m`
        #[arg(long, default_value = "100m")]
        min_distance: String,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Nearest graph node and road segment to a point
    Nearest {
        #[arg(long, allow_hyphen_values = true)]
        at: String,
    },

    /// Tagged features near a point
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        at: String,

        /// `key`, `key=value`, `key=v1,v2` or `key=*`; omit for any tag
        #[arg(long)]
        filter: Option<String>,

        /// Search radius, e.g. `500`, `500m`, `2km`
        #[arg(long, default_value = "500m")]
        radius: String,

        /// Maximum number of results
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },

    /// Size and composition of the road network
    Summary,
}

#[derive(Args)]
pub struct PairArgs {
    /// Origin "lat,lon"
    #[arg(long, allow_hyphen_values = true)]
    pub from: String,

    /// Destination "lat,lon"
    #[arg(long, allow_hyphen_values = true)]
    pub to: String,
}
