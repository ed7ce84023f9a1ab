//! Graph-subsystem error type.

use thiserror::Error;

use osmnet_core::NetError;

/// Errors produced by `osmnet-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid routing profile: {0}")]
    Profile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

impl From<GraphError> for NetError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Profile(msg) => NetError::Config(msg),
            GraphError::Io(e) => NetError::Io(e),
            #[cfg(feature = "osm")]
            GraphError::Osm(msg) => NetError::Parse(msg),
        }
    }
}
