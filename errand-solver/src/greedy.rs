//! Nearest-neighbour ordering with live distance queries.
//!
//! The greedy solver needs no matrix: every step asks the oracle for the
//! distance from the last appended point to each unvisited candidate. That is
//! `O(n^2)` queries with no backtracking, so the result is fast but not
//! guaranteed optimal.

use errand_core::{
    Distance, DistanceOracle, OptimiseError, Point, Route, RouteRequest, RouteSolver,
    RoutingUnavailable,
};

/// Nearest-neighbour heuristic over a free-running tour.
///
/// `points[0]` is the fixed start; every other point is ordered. There is no
/// fixed end.
///
/// # Examples
/// ```
/// use errand_core::Point;
/// use errand_core::test_support::EuclideanOracle;
/// use errand_solver::GreedySolver;
///
/// let points = vec![
///     Point::from_lat_lng(0.0, 0.0).with_label("home"),
///     Point::from_lat_lng(0.0, 5.0).with_label("far"),
///     Point::from_lat_lng(0.0, 1.0).with_label("near"),
/// ];
/// let ordered = GreedySolver::new(EuclideanOracle).order(&points)?;
/// let labels: Vec<_> = ordered.iter().filter_map(|p| p.label.as_deref()).collect();
/// assert_eq!(labels, ["home", "near", "far"]);
/// # Ok::<(), errand_core::RoutingUnavailable>(())
/// ```
#[derive(Debug, Clone)]
pub struct GreedySolver<O> {
    oracle: O,
}

impl<O: DistanceOracle> GreedySolver<O> {
    /// Construct a solver querying `oracle` at every step.
    pub const fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Order `points`, starting from `points[0]`.
    ///
    /// Among equally near candidates the one supplied first wins.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingUnavailable`] from the first failing query.
    pub fn order(&self, points: &[Point]) -> Result<Vec<Point>, RoutingUnavailable> {
        let Some(first) = points.first() else {
            return Ok(Vec::new());
        };
        let mut visited = vec![false; points.len()];
        if let Some(flag) = visited.first_mut() {
            *flag = true;
        }
        let mut route = Vec::with_capacity(points.len());
        route.push(first.clone());
        let mut current = first;

        for _ in 1..points.len() {
            let Some((next, distance)) = self.nearest(current, points, &visited)? else {
                break;
            };
            log::debug!("greedy step picked point {next} at {distance}");
            if let Some(flag) = visited.get_mut(next) {
                *flag = true;
            }
            let Some(point) = points.get(next) else {
                break;
            };
            route.push(point.clone());
            current = point;
        }
        Ok(route)
    }

    fn nearest(
        &self,
        from: &Point,
        points: &[Point],
        visited: &[bool],
    ) -> Result<Option<(usize, Distance)>, RoutingUnavailable> {
        let mut best: Option<(usize, Distance)> = None;
        for (index, candidate) in points.iter().enumerate() {
            if visited.get(index).copied().unwrap_or(true) {
                continue;
            }
            let distance = self.oracle.distance(from, candidate)?;
            if best.is_none_or(|(_, shortest)| distance < shortest) {
                best = Some((index, distance));
            }
        }
        Ok(best)
    }
}

/// [`RouteSolver`] running [`GreedySolver`] over `[start, free...]` and then
/// appending the fixed end.
///
/// The total is computed by querying the oracle for every consecutive leg.
#[derive(Debug, Clone)]
pub struct GreedyRouteSolver<O> {
    solver: GreedySolver<O>,
}

impl<O: DistanceOracle> GreedyRouteSolver<O> {
    /// Construct a solver querying `oracle` live.
    pub const fn new(oracle: O) -> Self {
        Self {
            solver: GreedySolver::new(oracle),
        }
    }
}

impl<O> RouteSolver for GreedyRouteSolver<O>
where
    O: DistanceOracle + Send + Sync,
{
    fn solve(&self, request: &RouteRequest) -> Result<Route, OptimiseError> {
        let points = request.point_set()?;
        let tour: Vec<Point> = std::iter::once(points.start())
            .chain(points.free())
            .cloned()
            .collect();
        let mut ordered = self.solver.order(&tour)?;
        ordered.push(points.end().clone());

        let total = ordered
            .windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some(self.solver.oracle.distance(from, to)),
                _ => None,
            })
            .sum::<Result<Distance, _>>()?;
        log::info!("greedy route through {} point(s) totals {total}", ordered.len());
        Ok(Route::new(ordered, total))
    }
}
