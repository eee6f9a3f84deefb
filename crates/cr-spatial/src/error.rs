//! Spatial-subsystem error type.

use thiserror::Error;

use cr_core::NodeId;

/// Errors produced by `cr-spatial`.
///
/// A missing path is *not* an error: it is reported as
/// [`PathLength::Unreachable`](crate::PathLength::Unreachable).
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("edge {from} -> {to} has invalid length {length_m} m (must be finite and >= 0)")]
    InvalidWeight { from: NodeId, to: NodeId, length_m: f32 },

    #[error("consolidation tolerance must be finite and >= 0, got {0} m")]
    InvalidTolerance(f32),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
