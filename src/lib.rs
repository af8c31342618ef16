//! Facade crate for the Errand route-optimisation engine.
//!
//! This crate re-exports the core domain types and exposes the solvers and
//! HTTP adapters behind feature flags.

#![forbid(unsafe_code)]

pub use errand_core::{
    BranchDirectory, BranchQuery, DirectoryError, Distance, DistanceMatrix,
    DistanceMatrixBuilder, DistanceOracle, InvalidDistance, MatrixError, MissingEndpoint,
    OptimiseError, Point, PointId, PointKind, PointSet, Route, RouteRequest, RouteRequestError,
    RouteSolver, RoutingUnavailable, SolveError, build_matrix,
};

#[cfg(feature = "test-support")]
pub use errand_core::test_support;

#[cfg(feature = "solver")]
pub use errand_solver::{
    ExactRouteSolver, ExactSolver, GreedyRouteSolver, GreedySolver, Permutations, Strategy,
    optimise_route,
};

#[cfg(feature = "http")]
pub use errand_data::{
    ClientBuildError, HttpDistanceOracle, HttpDistanceOracleConfig, OverpassDirectory,
    OverpassDirectoryConfig,
};
