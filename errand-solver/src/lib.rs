//! Route search for Errand.
//!
//! Two strategies are provided. [`ExactSolver`] enumerates every ordering of
//! the free points against a prebuilt [`DistanceMatrix`] and returns the
//! minimum; it is optimal but factorial in the number of free points.
//! [`GreedySolver`] walks to the nearest unvisited point using live oracle
//! queries; it is fast but offers no optimality guarantee.
//!
//! [`optimise_route`] is the single entry point most callers want: it
//! validates a [`RouteRequest`], builds the matrix and runs the exact search.
//!
//! [`DistanceMatrix`]: errand_core::DistanceMatrix

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod exact;
mod greedy;
mod permutation;

use std::fmt;

use errand_core::{
    DistanceMatrixBuilder, DistanceOracle, OptimiseError, Route, RouteRequest, RouteSolver,
};

pub use exact::{ExactRouteSolver, ExactSolver};
pub use greedy::{GreedyRouteSolver, GreedySolver};
pub use permutation::Permutations;

/// Which search a caller wants to run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Exhaustive permutation search over a distance matrix.
    #[default]
    Exact,
    /// Nearest-neighbour heuristic with live queries.
    Greedy,
}

impl Strategy {
    /// Build the [`RouteSolver`] for this strategy around `oracle`.
    ///
    /// # Examples
    /// ```
    /// use errand_core::{Point, RouteRequest};
    /// use errand_core::test_support::EuclideanOracle;
    /// use errand_solver::Strategy;
    ///
    /// let request = RouteRequest::new(
    ///     Point::from_lat_lng(0.0, 0.0),
    ///     Point::from_lat_lng(0.0, 2.0),
    /// )
    /// .with_intermediate(Point::from_lat_lng(0.0, 1.0));
    /// let route = Strategy::Greedy.solver(EuclideanOracle).solve(&request)?;
    /// assert_eq!(route.points().len(), 3);
    /// # Ok::<(), errand_core::OptimiseError>(())
    /// ```
    pub fn solver<'a, O>(self, oracle: O) -> Box<dyn RouteSolver + 'a>
    where
        O: DistanceOracle + Send + Sync + 'a,
    {
        match self {
            Self::Exact => Box::new(ExactRouteSolver::new(oracle)),
            Self::Greedy => Box::new(GreedyRouteSolver::new(oracle)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exact => "exact",
            Self::Greedy => "greedy",
        })
    }
}

/// Return the minimum-distance route for `request`.
///
/// The request is validated before any query, so a missing endpoint never
/// reaches the oracle. Every pair of points is then queried once to build a
/// symmetric matrix and the exact search picks the shortest ordering of the
/// intermediates and chain branches between the fixed endpoints.
///
/// # Errors
///
/// Returns [`OptimiseError::InvalidRequest`] for a request lacking an
/// endpoint, [`OptimiseError::Matrix`] when any distance query fails, and
/// [`OptimiseError::Solve`] if the search cannot read the matrix.
///
/// # Examples
/// ```
/// use errand_core::{Point, RouteRequest};
/// use errand_core::test_support::EuclideanOracle;
/// use errand_solver::optimise_route;
///
/// let request = RouteRequest::new(
///     Point::from_lat_lng(0.0, 0.0).with_label("home"),
///     Point::from_lat_lng(0.0, 3.0).with_label("office"),
/// )
/// .with_intermediate(Point::from_lat_lng(0.0, 2.0).with_label("bakery"))
/// .with_intermediate(Point::from_lat_lng(0.0, 1.0).with_label("post office"));
///
/// let route = optimise_route(&EuclideanOracle, &request)?;
/// let labels: Vec<_> = route.points().iter().filter_map(|p| p.label.as_deref()).collect();
/// assert_eq!(labels, ["home", "post office", "bakery", "office"]);
/// # Ok::<(), errand_core::OptimiseError>(())
/// ```
pub fn optimise_route<O>(oracle: &O, request: &RouteRequest) -> Result<Route, OptimiseError>
where
    O: DistanceOracle + ?Sized,
{
    let points = request.point_set()?;
    log::debug!(
        "optimising route through {} free point(s)",
        points.free().len()
    );
    let matrix = DistanceMatrixBuilder::new(oracle).build(&points)?;
    Ok(ExactSolver.solve(&points, &matrix)?)
}
