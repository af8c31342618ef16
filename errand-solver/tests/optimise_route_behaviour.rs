//! Behavioural tests for [`optimise_route`] using rstest-bdd.
//!
//! Distances come from in-memory oracles so no routing service is needed.

use std::cell::{Cell, RefCell};

use errand_core::test_support::{CountingOracle, EuclideanOracle, FailingPairOracle, TableOracle};
use errand_core::{
    DistanceOracle, MatrixError, MissingEndpoint, OptimiseError, Point, PointId, Route,
    RouteRequest, RouteRequestError, RoutingUnavailable,
};
use errand_solver::optimise_route;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

fn a() -> Point {
    Point::from_lat_lng(0.0, 0.0).with_label("A")
}

fn b() -> Point {
    Point::from_lat_lng(0.0, 1.0).with_label("B")
}

fn c() -> Point {
    Point::from_lat_lng(1.0, 0.0).with_label("C")
}

fn d() -> Point {
    Point::from_lat_lng(1.0, 1.0).with_label("D")
}

struct TripWorld {
    request: RefCell<RouteRequest>,
    oracle: RefCell<Option<Box<dyn DistanceOracle>>>,
    outcome: RefCell<Option<Result<Route, OptimiseError>>>,
    calls: Cell<usize>,
}

impl TripWorld {
    fn new() -> Self {
        Self {
            request: RefCell::new(RouteRequest::default()),
            oracle: RefCell::new(None),
            outcome: RefCell::new(None),
            calls: Cell::new(0),
        }
    }

    fn outcome(&self) -> Result<Route, OptimiseError> {
        self.outcome
            .borrow()
            .as_ref()
            .cloned()
            .expect("outcome should be recorded before assertions")
    }

    fn route(&self) -> Route {
        self.outcome().expect("expected optimisation to succeed")
    }

    fn failure(&self) -> OptimiseError {
        self.outcome().expect_err("expected optimisation to fail")
    }
}

#[fixture]
fn world() -> TripWorld {
    TripWorld::new()
}

// --- Given steps ---

#[given("a round trip from A through B and C")]
fn round_trip(world: &TripWorld) {
    world.request.replace(
        RouteRequest::new(a(), a())
            .with_intermediate(b())
            .with_intermediate(c()),
    );
}

#[given("a trip from A to D through B and C")]
fn trip_through_two(world: &TripWorld) {
    world.request.replace(
        RouteRequest::new(a(), d())
            .with_intermediate(b())
            .with_intermediate(c()),
    );
}

#[given("a trip from A to D through B")]
fn trip_through_one(world: &TripWorld) {
    world
        .request
        .replace(RouteRequest::new(a(), d()).with_intermediate(b()));
}

#[given("a trip from A to D with no stops")]
fn trip_without_stops(world: &TripWorld) {
    world.request.replace(RouteRequest::new(a(), d()));
}

#[given("a trip from A with no end")]
fn trip_without_end(world: &TripWorld) {
    world.request.replace(RouteRequest {
        start: Some(a()),
        intermediates: vec![b(), c()],
        ..RouteRequest::default()
    });
}

#[given("a routing service with A to B 5, A to C 5 and B to C 3")]
fn triangle_service(world: &TripWorld) {
    let table = TableOracle::default()
        .with_distance(&a(), &b(), 5.0)
        .with_distance(&a(), &c(), 5.0)
        .with_distance(&b(), &c(), 3.0);
    world.oracle.replace(Some(Box::new(table)));
}

#[given("a routing service with A to D 7")]
fn direct_service(world: &TripWorld) {
    let table = TableOracle::default().with_distance(&a(), &d(), 7.0);
    world.oracle.replace(Some(Box::new(table)));
}

#[given("a routing service with A to B 2, B to D 4 and A to D 7")]
fn single_stop_service(world: &TripWorld) {
    let table = TableOracle::default()
        .with_distance(&a(), &b(), 2.0)
        .with_distance(&b(), &d(), 4.0)
        .with_distance(&a(), &d(), 7.0);
    world.oracle.replace(Some(Box::new(table)));
}

#[given("a routing service that cannot route between B and C")]
fn failing_service(world: &TripWorld) {
    let oracle = FailingPairOracle::new(EuclideanOracle, &b(), &c(), RoutingUnavailable::NoRoute);
    world.oracle.replace(Some(Box::new(oracle)));
}

// --- When steps ---

#[when("the route is optimised")]
fn optimise(world: &TripWorld) {
    let guard = world.oracle.borrow();
    let inner = guard.as_deref().expect("oracle must be configured");
    let oracle = CountingOracle::new(inner);
    let outcome = optimise_route(&oracle, &world.request.borrow());
    world.calls.set(oracle.calls());
    world.outcome.replace(Some(outcome));
}

// --- Then steps ---

#[then("the route visits A, B, C, A")]
fn visits_round_trip(world: &TripWorld) {
    assert_labels(&world.route(), &["A", "B", "C", "A"]);
}

#[then("the route visits A, D")]
fn visits_direct(world: &TripWorld) {
    assert_labels(&world.route(), &["A", "D"]);
}

#[then("the route visits A, B, D")]
fn visits_single_stop(world: &TripWorld) {
    assert_labels(&world.route(), &["A", "B", "D"]);
}

#[then("the total distance is 13 km")]
fn total_is_thirteen(world: &TripWorld) {
    assert_total(&world.route(), 13.0);
}

#[then("the total distance is 7 km")]
fn total_is_seven(world: &TripWorld) {
    assert_total(&world.route(), 7.0);
}

#[then("the total distance is 6 km")]
fn total_is_six(world: &TripWorld) {
    assert_total(&world.route(), 6.0);
}

#[then("optimisation fails with a matrix error between B and C")]
fn fails_between_b_and_c(world: &TripWorld) {
    assert_eq!(
        world.failure(),
        OptimiseError::Matrix(MatrixError {
            from: PointId::new(1),
            to: PointId::new(2),
            source: RoutingUnavailable::NoRoute,
        })
    );
}

#[then("optimisation fails because the end is missing")]
fn fails_without_end(world: &TripWorld) {
    assert_eq!(
        world.failure(),
        OptimiseError::InvalidRequest(RouteRequestError::InsufficientEndpoints {
            missing: MissingEndpoint::End,
        })
    );
}

#[then("the routing service was never queried")]
fn never_queried(world: &TripWorld) {
    assert_eq!(world.calls.get(), 0);
}

fn assert_labels(route: &Route, expected: &[&str]) {
    let labels: Vec<&str> = route
        .points()
        .iter()
        .filter_map(|point| point.label.as_deref())
        .collect();
    assert_eq!(labels, expected);
}

#[expect(clippy::float_cmp, reason = "table distances sum exactly")]
fn assert_total(route: &Route, kilometres: f64) {
    assert_eq!(route.total_distance().kilometres(), kilometres);
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/optimise_route.feature", name = $title)]
        fn $fn_name(world: TripWorld) {
            let _ = world;
        }
    };
}

register_scenario!(
    tied_round_trip,
    "returning to the start with tied orderings"
);
register_scenario!(
    failing_pair_aborts,
    "aborting when one pair cannot be routed"
);
register_scenario!(
    direct_route,
    "going straight to the end without stops"
);
register_scenario!(single_stop, "visiting a single stop");
register_scenario!(missing_end, "rejecting a trip without an end");
