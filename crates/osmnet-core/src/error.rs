//! Engine error type and the shared result classification.
//!
//! Every public operation in the `osmnet-*` crates either returns a value
//! (including "not found" outcomes such as an unreachable destination) or a
//! [`NetError`].  [`NetError::kind`] folds the variants into one
//! [`ErrorKind`], and [`ResultClass`] is the single place where result
//! classes turn into process exit codes.

use thiserror::Error;

use crate::{GeoPoint, TravelMode};

/// The top-level error type shared by all `osmnet-*` crates.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("invalid coordinate {input:?}: {reason}")]
    InvalidCoordinate { input: String, reason: &'static str },

    #[error("{what} needs at least {need} points, got {got}")]
    TooFewPoints { what: &'static str, need: usize, got: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("no usable {mode} network in the supplied map data")]
    EmptyGraph { mode: TravelMode },

    #[error("no graph vertex near {point} for {what}")]
    Unresolved { what: String, point: GeoPoint },

    #[error("no result: {0}")]
    NoResult(String),

    #[error("map data parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `osmnet-*` crates.
pub type NetResult<T> = Result<T, NetError>;

// ── Classification ────────────────────────────────────────────────────────────

/// Coarse classification of a [`NetError`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// The caller's input was malformed; nothing was computed.
    InvalidInput,
    /// The query was valid but has no answer (no route, unresolved point).
    NoResult,
    /// The map data was missing, unreadable, or yielded no usable graph.
    NoData,
}

impl NetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NetError::InvalidCoordinate { .. }
            | NetError::TooFewPoints { .. }
            | NetError::InvalidArgument(_)
            | NetError::Config(_) => ErrorKind::InvalidInput,
            NetError::Unresolved { .. } | NetError::NoResult(_) => ErrorKind::NoResult,
            NetError::EmptyGraph { .. } | NetError::Parse(_) | NetError::Io(_) => ErrorKind::NoData,
        }
    }
}

/// Caller-visible result class of one command invocation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ResultClass {
    /// A usable result was produced.
    Success,
    /// The computation succeeded but the answer is empty or negative.
    NoResult,
    /// Malformed input.
    InvalidInput,
    /// Missing or unusable map data.
    NoData,
}

impl ResultClass {
    /// Process exit code for this class.
    pub fn exit_code(self) -> i32 {
        match self {
            ResultClass::Success      => 0,
            ResultClass::NoResult     => 1,
            ResultClass::InvalidInput => 2,
            ResultClass::NoData       => 3,
        }
    }
}

impl From<ErrorKind> for ResultClass {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidInput => ResultClass::InvalidInput,
            ErrorKind::NoResult     => ResultClass::NoResult,
            ErrorKind::NoData       => ResultClass::NoData,
        }
    }
}

impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        ResultClass::from(self).exit_code()
    }
}
