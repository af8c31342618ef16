//! Exhaustive search over every ordering of the free points.
//!
//! The search is exact for the supplied matrix but factorial in the number of
//! free points. It is practical for single-digit counts only; callers bound
//! the input size and wall-clock time.

use errand_core::{
    Distance, DistanceMatrix, DistanceMatrixBuilder, DistanceOracle, OptimiseError, PointId,
    PointSet, Route, RouteRequest, RouteSolver, SolveError,
};

use crate::Permutations;

/// Brute-force permutation search over a precomputed [`DistanceMatrix`].
///
/// Ties are broken by generation order: the first ordering reaching the
/// minimum wins, because candidates replace the incumbent only when strictly
/// shorter.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactSolver;

impl ExactSolver {
    /// Return the shortest `[start, free..., end]` route through `points`.
    ///
    /// `matrix` must have been built over the full point set, endpoints
    /// included.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::MatrixSizeMismatch`] when `matrix` does not cover
    /// `points`, and [`SolveError::IncompleteMatrix`] when a needed cell is
    /// missing.
    pub fn solve(&self, points: &PointSet, matrix: &DistanceMatrix) -> Result<Route, SolveError> {
        if matrix.size() != points.len() {
            return Err(SolveError::MatrixSizeMismatch {
                expected: points.len(),
                actual: matrix.size(),
            });
        }

        let start = points.start_id();
        let end = points.end_id();
        let mut orderings = Permutations::new(points.free_ids());
        let first = orderings.next().unwrap_or_default();
        let mut best_distance = tour_distance(start, &first, end, matrix)?;
        let mut best_order = first;
        let mut evaluated = 1_u64;

        for candidate in orderings {
            evaluated += 1;
            let total = tour_distance(start, &candidate, end, matrix)?;
            if total < best_distance {
                best_distance = total;
                best_order = candidate;
            }
        }

        log::info!(
            "exact search evaluated {evaluated} ordering(s); best total {best_distance}"
        );
        let route_points = std::iter::once(start)
            .chain(best_order)
            .chain(std::iter::once(end))
            .map(|id| points.get(id).cloned().ok_or(SolveError::UnknownPoint(id)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Route::new(route_points, best_distance))
    }
}

/// Sum of matrix distances along `start -> interior... -> end`.
fn tour_distance(
    start: PointId,
    interior: &[PointId],
    end: PointId,
    matrix: &DistanceMatrix,
) -> Result<Distance, SolveError> {
    let mut total = Distance::ZERO;
    let mut previous = start;
    for &next in interior.iter().chain(std::iter::once(&end)) {
        total += matrix
            .get(previous, next)
            .ok_or(SolveError::IncompleteMatrix {
                from: previous,
                to: next,
            })?;
        previous = next;
    }
    Ok(total)
}

/// [`RouteSolver`] that builds a matrix with an oracle, then runs
/// [`ExactSolver`].
///
/// The solver is generic over the routing boundary so tests can substitute a
/// deterministic oracle.
#[derive(Debug, Clone)]
pub struct ExactRouteSolver<O> {
    oracle: O,
}

impl<O: DistanceOracle> ExactRouteSolver<O> {
    /// Construct a solver querying `oracle` for pairwise distances.
    pub const fn new(oracle: O) -> Self {
        Self { oracle }
    }
}

impl<O> RouteSolver for ExactRouteSolver<O>
where
    O: DistanceOracle + Send + Sync,
{
    fn solve(&self, request: &RouteRequest) -> Result<Route, OptimiseError> {
        let points = request.point_set()?;
        let matrix = DistanceMatrixBuilder::new(&self.oracle).build(&points)?;
        Ok(ExactSolver.solve(&points, &matrix)?)
    }
}
