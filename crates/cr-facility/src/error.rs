//! Facility-routing error type.

use thiserror::Error;

use cr_core::NodeId;
use cr_spatial::SpatialError;

/// Errors produced by `cr-facility`.
///
/// An unreachable facility is not an error; see
/// [`Reach::Unreachable`](crate::Reach::Unreachable).
#[derive(Debug, Error)]
pub enum FacilityError {
    #[error("node {0} is not part of the road network")]
    InvalidNode(NodeId),

    #[error("road network has no nodes to snap to")]
    EmptyNetwork,

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type FacilityResult<T> = Result<T, FacilityError>;
