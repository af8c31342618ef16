//! Core domain types for the Errand route planner.
//!
//! A trip is described by a [`RouteRequest`]: fixed start and end points,
//! manual intermediate stops and the resolved branches of any chain
//! businesses the user wants to visit. The request is flattened into a
//! [`PointSet`], a road-distance [`DistanceMatrix`] is built over it by
//! querying a [`DistanceOracle`], and a [`RouteSolver`] returns the visiting
//! order with the smallest total distance as a [`Route`].
//!
//! Constructors validate their input and return `Result` so that bad data is
//! rejected before any routing service is contacted.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod directory;
mod distance;
pub mod matrix;
pub mod oracle;
mod point;
mod point_set;
mod request;
mod route;
pub mod solver;

pub use directory::{BranchDirectory, BranchQuery, DirectoryError};
pub use distance::{Distance, InvalidDistance};
pub use matrix::{DistanceMatrix, DistanceMatrixBuilder, MatrixError, build_matrix};
pub use oracle::{DistanceOracle, RoutingUnavailable};
pub use point::{Point, PointKind};
pub use point_set::{PointId, PointSet};
pub use request::{MissingEndpoint, RouteRequest, RouteRequestError};
pub use route::Route;
pub use solver::{OptimiseError, RouteSolver, SolveError};

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
