use thiserror::Error;

use crate::{PointId, RoutingUnavailable};

/// A pair query failed while building a [`DistanceMatrix`](super::DistanceMatrix).
///
/// The partially filled matrix is dropped; callers only receive this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("distance between {from} and {to} is unavailable: {source}")]
pub struct MatrixError {
    /// First point of the failing pair.
    pub from: PointId,
    /// Second point of the failing pair.
    pub to: PointId,
    /// Why the routing service could not answer.
    #[source]
    pub source: RoutingUnavailable,
}
