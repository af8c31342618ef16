//! Choose the visiting order for a trip.

use thiserror::Error;

use crate::{MatrixError, PointId, Route, RouteRequest, RouteRequestError, RoutingUnavailable};

/// Errors raised while searching a prepared distance matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// A cell the search needed was never populated.
    #[error("distance matrix has no entry for {from} -> {to}")]
    IncompleteMatrix {
        /// Row of the missing cell.
        from: PointId,
        /// Column of the missing cell.
        to: PointId,
    },
    /// The matrix was built for a different number of points.
    #[error("distance matrix covers {actual} points but the point set has {expected}")]
    MatrixSizeMismatch {
        /// Number of points in the set.
        expected: usize,
        /// Number of points the matrix covers.
        actual: usize,
    },
    /// An id did not resolve to a point in the set.
    #[error("point {0} is not part of the point set")]
    UnknownPoint(PointId),
}

/// Errors returned by [`RouteSolver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimiseError {
    /// The request was rejected before any routing query.
    #[error(transparent)]
    InvalidRequest(#[from] RouteRequestError),
    /// Building the distance matrix failed.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    /// A live distance query failed.
    #[error(transparent)]
    Routing(#[from] RoutingUnavailable),
    /// The search itself failed.
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Produce the minimum-distance route for a trip.
///
/// Implementations must reject requests lacking an endpoint with
/// [`OptimiseError::InvalidRequest`] before contacting any routing service.
/// Solvers must be `Send + Sync` to operate safely across threads.
pub trait RouteSolver: Send + Sync {
    /// Solve a request, producing a route or an error.
    ///
    /// # Errors
    ///
    /// Returns [`OptimiseError`] when the request is invalid or distances are
    /// unavailable.
    fn solve(&self, request: &RouteRequest) -> Result<Route, OptimiseError>;
}
