//! Query road distances between pairs of points.
//!
//! The [`DistanceOracle`] trait abstracts the external routing service. It
//! answers one pair at a time, holds no cache of its own and never retries;
//! memoisation belongs to [`DistanceMatrixBuilder`](crate::DistanceMatrixBuilder)
//! and retry policy belongs to the caller.

mod error;
mod provider;

pub use error::RoutingUnavailable;
pub use provider::DistanceOracle;
