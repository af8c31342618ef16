//! Property-based tests for the route solvers.
//!
//! # Invariants tested
//!
//! - **Completeness:** every free point appears exactly once between the
//!   fixed endpoints.
//! - **Order invariance:** shuffling the free points does not change the
//!   optimal total distance.
//! - **Matrix shape:** built matrices are symmetric with a zero diagonal.
//! - **Query budget:** building a matrix over `N` points issues exactly
//!   `N * (N - 1) / 2` oracle queries, none of them repeated.
//! - **Greedy coverage:** the greedy order keeps the first point and visits
//!   every other point once.

use std::collections::HashMap;

use errand_core::test_support::{CountingOracle, EuclideanOracle};
use errand_core::{Point, PointId, PointSet, RouteRequest, build_matrix};
use errand_solver::{GreedySolver, optimise_route};
use proptest::prelude::*;

/// Upper bound on free points; the exact search is factorial.
const MAX_FREE: usize = 5;

/// Strategy for a labelled point near the origin.
fn point_strategy() -> impl Strategy<Value = (f64, f64)> {
    (-1.0_f64..1.0_f64, -1.0_f64..1.0_f64)
}

/// Strategy for `count` free points labelled `p0`, `p1`, ...
fn free_points_strategy(max: usize) -> impl Strategy<Value = Vec<Point>> {
    proptest::collection::vec(point_strategy(), 0..=max).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(i, (lat, lng))| Point::from_lat_lng(lat, lng).with_label(format!("p{i}")))
            .collect()
    })
}

fn trip(free: Vec<Point>) -> RouteRequest {
    let start = Point::from_lat_lng(-2.0, -2.0).with_label("start");
    let end = Point::from_lat_lng(2.0, 2.0).with_label("end");
    free.into_iter()
        .fold(RouteRequest::new(start, end), RouteRequest::with_intermediate)
}

fn label_counts(points: &[Point]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for label in points.iter().filter_map(|point| point.label.clone()) {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the exact route keeps its endpoints and visits every free
    /// point once.
    #[test]
    fn exact_route_visits_each_free_point_once(free in free_points_strategy(MAX_FREE)) {
        let request = trip(free.clone());
        let route = optimise_route(&EuclideanOracle, &request).expect("euclidean never fails");

        prop_assert_eq!(route.points().len(), free.len() + 2);
        prop_assert_eq!(
            route.start().and_then(|p| p.label.as_deref()),
            Some("start")
        );
        prop_assert_eq!(route.end().and_then(|p| p.label.as_deref()), Some("end"));

        let counts = label_counts(route.points());
        for point in &free {
            let label = point.label.as_deref().unwrap_or_default();
            prop_assert_eq!(counts.get(label).copied(), Some(1), "{} visited wrongly", label);
        }
    }

    /// Property: the optimal total does not depend on the order the free
    /// points were supplied in.
    #[test]
    fn exact_total_ignores_input_order(
        (free, shuffled) in free_points_strategy(MAX_FREE)
            .prop_flat_map(|free| (Just(free.clone()), Just(free).prop_shuffle()))
    ) {
        let original = optimise_route(&EuclideanOracle, &trip(free)).expect("solvable");
        let reordered = optimise_route(&EuclideanOracle, &trip(shuffled)).expect("solvable");

        let delta = (original.total_distance().kilometres()
            - reordered.total_distance().kilometres())
        .abs();
        prop_assert!(delta < 1e-9, "totals differ by {}", delta);
    }

    /// Property: matrices are symmetric with zeros on the diagonal.
    #[test]
    fn matrix_is_symmetric(free in free_points_strategy(MAX_FREE)) {
        let points = trip(free).point_set().expect("endpoints present");
        let matrix = build_matrix(&EuclideanOracle, &points).expect("euclidean never fails");

        prop_assert!(matrix.is_complete());
        prop_assert!(matrix.is_symmetric());
        for id in points.ids() {
            prop_assert_eq!(matrix.get(id, id).map(|d| d.kilometres()), Some(0.0));
        }
    }

    /// Property: every unordered pair is queried once and only once.
    #[test]
    fn matrix_queries_each_pair_once(free in free_points_strategy(MAX_FREE)) {
        let start = Point::from_lat_lng(-2.0, -2.0);
        let end = Point::from_lat_lng(2.0, 2.0);
        let points = PointSet::new(start, free, end);
        let oracle = CountingOracle::new(EuclideanOracle);

        build_matrix(&oracle, &points).expect("euclidean never fails");

        let n = points.len();
        let expected = n * (n - 1) / 2;
        prop_assert_eq!(oracle.calls(), expected);
        prop_assert!(oracle.distinct_pairs() <= expected);
        prop_assert!(points.get(PointId::new(n)).is_none());
    }

    /// Property: the greedy order is a permutation anchored at the first point.
    #[test]
    fn greedy_visits_every_point(free in free_points_strategy(8)) {
        let mut points = vec![Point::from_lat_lng(-2.0, -2.0).with_label("start")];
        points.extend(free);

        let ordered = GreedySolver::new(EuclideanOracle)
            .order(&points)
            .expect("euclidean never fails");

        prop_assert_eq!(ordered.len(), points.len());
        prop_assert_eq!(ordered.first(), points.first());
        prop_assert_eq!(label_counts(&ordered), label_counts(&points));
    }
}
