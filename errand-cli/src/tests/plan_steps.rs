//! Behaviour-driven step definitions driving the plan CLI scenarios.

use super::helpers::{StubPlanServices, write_request, write_utf8};
use super::*;
use camino::Utf8PathBuf;
use clap::Parser;
use crate::plan::run_plan_with;
use errand_core::{Point, Route, RouteRequest, RouteRequestError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

const COFFEE_BRANCH: &str = "Coffee Co - High Street";

#[derive(Debug)]
struct PlanWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl PlanWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let request_path = root.join("trip.json");

        Self {
            _tmp: tmp,
            request_path,
            include_request: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["errand".to_owned(), "plan".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }

    fn route(&self) -> Route {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
        serde_json::from_slice(&self.stdout.borrow()).expect("output should be a JSON route")
    }
}

#[fixture]
fn world() -> PlanWorld {
    PlanWorld::new()
}

fn labels(route: &Route) -> Vec<String> {
    route
        .points()
        .iter()
        .filter_map(|point| point.label.clone())
        .collect()
}

#[given("a trip with two stops between home and the office")]
fn trip_with_two_stops(#[from(world)] world: &PlanWorld) {
    let request = RouteRequest::new(
        Point::from_lat_lng(0.0, 0.0).with_label("home"),
        Point::from_lat_lng(0.0, 3.0).with_label("office"),
    )
    .with_intermediate(Point::from_lat_lng(0.0, 2.0).with_label("bakery"))
    .with_intermediate(Point::from_lat_lng(0.0, 1.0).with_label("post office"));
    write_request(&world.request_path, &request);
}

#[given("a round trip that visits the Coffee Co chain")]
fn round_trip_with_chain(#[from(world)] world: &PlanWorld) {
    let home = Point::from_lat_lng(0.0, 0.0).with_label("home");
    let request = RouteRequest::new(home.clone(), home).with_chain("Coffee Co");
    write_request(&world.request_path, &request);
}

#[given("the trip request contains invalid JSON")]
fn request_contains_invalid_json(#[from(world)] world: &PlanWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("a trip request without an end location")]
fn request_without_end(#[from(world)] world: &PlanWorld) {
    write_utf8(
        &world.request_path,
        br#"{ "start": { "location": { "x": 0.0, "y": 0.0 }, "label": "home" } }"#,
    );
}

#[given("I omit the trip request path")]
fn omit_request_path(#[from(world)] world: &PlanWorld) {
    *world.include_request.borrow_mut() = false;
}

#[given("I choose the greedy strategy")]
fn choose_greedy(#[from(world)] world: &PlanWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_PLAN_STRATEGY}"), "greedy".to_owned()]);
}

#[when("I run the plan command")]
fn run_plan_command(#[from(world)] world: &PlanWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Plan(args) => {
            let services = StubPlanServices::default().with_branches(
                "Coffee Co",
                vec![Point::from_lat_lng(1.0, 0.0).with_label(COFFEE_BRANCH)],
            );
            let mut buffer = world.stdout.borrow_mut();
            run_plan_with(args, &services, &mut *buffer)
        }
        Command::Chains(_) => panic!("expected plan command"),
    });

    world.result.replace(Some(outcome));
}

#[then("the command succeeds and visits the stops in distance order")]
fn visits_stops_in_order(#[from(world)] world: &PlanWorld) {
    let route = world.route();
    assert_eq!(labels(&route), ["home", "post office", "bakery", "office"]);
    assert!((route.total_distance().kilometres() - 3.0).abs() < 1e-9);
}

#[then("the route passes through the Coffee Co branch")]
fn passes_through_branch(#[from(world)] world: &PlanWorld) {
    let route = world.route();
    assert_eq!(labels(&route), ["home", COFFEE_BRANCH, "home"]);
    assert!((route.total_distance().kilometres() - 2.0).abs() < 1e-9);
}

#[then("the command fails because the request JSON is invalid")]
fn fails_invalid_json(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::ParseRouteRequest { path, .. } => assert_eq!(*path, world.request_path),
        other => panic!("expected ParseRouteRequest, found {other:?}"),
    }
}

#[then("the command fails because the request is invalid")]
fn fails_invalid_request(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::InvalidRouteRequest { source, .. } => assert!(matches!(
            source,
            RouteRequestError::InsufficientEndpoints { .. }
        )),
        other => panic!("expected InvalidRouteRequest, found {other:?}"),
    }
}

#[then("the command fails because the request path is missing")]
fn fails_missing_request_path(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::MissingPositional { field, .. } => assert_eq!(*field, ARG_PLAN_REQUEST),
        other => panic!("expected MissingPositional, found {other:?}"),
    }
}

macro_rules! register_plan_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/plan_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: PlanWorld) {
            let _ = world;
        }
    };
}

register_plan_scenario!(plan_happy_path, "planning a trip from JSON");
register_plan_scenario!(plan_greedy, "planning a trip with the greedy strategy");
register_plan_scenario!(plan_resolves_chains, "resolving chain branches before planning");
register_plan_scenario!(plan_invalid_json, "rejecting invalid JSON input");
register_plan_scenario!(plan_invalid_request, "rejecting requests without an end");
register_plan_scenario!(plan_missing_request, "rejecting missing request paths");
