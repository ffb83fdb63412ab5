//! Error types for the map core.

use thiserror::Error;

/// Failure to parse a `viewBox` attribute string.
#[derive(Debug, Error, PartialEq)]
pub enum ViewBoxParseError {
    #[error("expected 4 numbers in viewBox, found {0}")]
    WrongArity(usize),

    #[error("invalid viewBox number {0:?}")]
    InvalidNumber(String),

    #[error("viewBox width and height must be positive")]
    NonPositiveSize,
}

/// Failure to decode a topology document into geometry.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("invalid topology JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("topology has no object named {0:?}")]
    MissingObject(String),

    #[error("arc index {0} out of range")]
    ArcOutOfRange(i64),

    #[error("object {0:?} is not a geometry collection")]
    NotACollection(String),

    #[error("unsupported geometry type {0:?}")]
    UnsupportedGeometry(String),
}

/// Errors surfaced by the map controller.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("unknown projection {0:?}")]
    UnknownProjection(String),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}
