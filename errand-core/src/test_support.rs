//! Deterministic oracles and directories used by unit and behaviour tests.
//!
//! None of these doubles touch the network. They are exported behind the
//! `test-support` feature so that downstream crates can reuse them.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use geo::Coord;

use crate::{
    BranchDirectory, BranchQuery, DirectoryError, Distance, DistanceOracle, Point,
    RoutingUnavailable,
};

fn to_distance(kilometres: f64) -> Result<Distance, RoutingUnavailable> {
    Distance::from_kilometres(kilometres).map_err(|err| RoutingUnavailable::Parse {
        message: err.to_string(),
    })
}

/// Oracle answering from a fixed table of coordinate pairs.
///
/// Pairs are matched in either direction. Identical coordinates without an
/// explicit entry are zero apart; any other unknown pair has no route.
#[derive(Debug, Clone, Default)]
pub struct TableOracle {
    entries: Vec<(Coord<f64>, Coord<f64>, f64)>,
}

impl TableOracle {
    /// Record the distance in kilometres between `a` and `b`.
    #[must_use]
    pub fn with_distance(mut self, a: &Point, b: &Point, kilometres: f64) -> Self {
        self.entries.push((a.location, b.location, kilometres));
        self
    }

    fn lookup(&self, from: Coord<f64>, to: Coord<f64>) -> Option<f64> {
        self.entries
            .iter()
            .find(|(a, b, _)| (*a == from && *b == to) || (*a == to && *b == from))
            .map(|(_, _, kilometres)| *kilometres)
    }
}

impl DistanceOracle for TableOracle {
    fn distance(&self, from: &Point, to: &Point) -> Result<Distance, RoutingUnavailable> {
        match self.lookup(from.location, to.location) {
            Some(kilometres) => to_distance(kilometres),
            None if from.location == to.location => Ok(Distance::ZERO),
            None => Err(RoutingUnavailable::NoRoute),
        }
    }
}

/// Oracle treating one degree as one kilometre of straight-line travel.
#[derive(Debug, Default, Copy, Clone)]
pub struct EuclideanOracle;

impl DistanceOracle for EuclideanOracle {
    #[expect(
        clippy::float_arithmetic,
        reason = "straight-line distance between coordinates"
    )]
    fn distance(&self, from: &Point, to: &Point) -> Result<Distance, RoutingUnavailable> {
        let dx = from.location.x - to.location.x;
        let dy = from.location.y - to.location.y;
        to_distance(dx.hypot(dy))
    }
}

/// Oracle wrapper recording every query it forwards.
#[derive(Debug)]
pub struct CountingOracle<O> {
    inner: O,
    calls: AtomicUsize,
    queries: Mutex<Vec<(Coord<f64>, Coord<f64>)>>,
}

impl<O> CountingOracle<O> {
    /// Wrap `inner`.
    pub const fn new(inner: O) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Number of queries forwarded so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of distinct unordered coordinate pairs queried so far.
    pub fn distinct_pairs(&self) -> usize {
        let Ok(queries) = self.queries.lock() else {
            return 0;
        };
        let mut distinct: Vec<(Coord<f64>, Coord<f64>)> = Vec::new();
        for &(a, b) in queries.iter() {
            let seen = distinct
                .iter()
                .any(|&(x, y)| (x == a && y == b) || (x == b && y == a));
            if !seen {
                distinct.push((a, b));
            }
        }
        distinct.len()
    }
}

impl<O: DistanceOracle> DistanceOracle for CountingOracle<O> {
    fn distance(&self, from: &Point, to: &Point) -> Result<Distance, RoutingUnavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((from.location, to.location));
        }
        self.inner.distance(from, to)
    }
}

/// Oracle wrapper failing for one chosen pair of coordinates.
#[derive(Debug, Clone)]
pub struct FailingPairOracle<O> {
    inner: O,
    pair: (Coord<f64>, Coord<f64>),
    error: RoutingUnavailable,
}

impl<O> FailingPairOracle<O> {
    /// Fail with `error` whenever `a` and `b` are queried, in either order.
    pub fn new(inner: O, a: &Point, b: &Point, error: RoutingUnavailable) -> Self {
        Self {
            inner,
            pair: (a.location, b.location),
            error,
        }
    }
}

impl<O: DistanceOracle> DistanceOracle for FailingPairOracle<O> {
    fn distance(&self, from: &Point, to: &Point) -> Result<Distance, RoutingUnavailable> {
        let (a, b) = self.pair;
        let hit = (from.location == a && to.location == b)
            || (from.location == b && to.location == a);
        if hit {
            return Err(self.error.clone());
        }
        self.inner.distance(from, to)
    }
}

/// In-memory [`BranchDirectory`] keyed by brand.
///
/// Unknown brands resolve to no branches.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    branches: HashMap<String, Vec<Point>>,
    error: Option<DirectoryError>,
    queries: Mutex<Vec<BranchQuery>>,
}

impl MemoryDirectory {
    /// Register the branches returned for `brand`.
    #[must_use]
    pub fn with_branches(mut self, brand: impl Into<String>, points: Vec<Point>) -> Self {
        self.branches.insert(brand.into(), points);
        self
    }

    /// Fail every lookup with `error`.
    #[must_use]
    pub fn with_error(mut self, error: DirectoryError) -> Self {
        self.error = Some(error);
        self
    }

    /// Brands queried so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.recorded()
            .into_iter()
            .map(|query| query.brand)
            .collect()
    }

    /// Search centres used so far, in order.
    pub fn centres(&self) -> Vec<Coord<f64>> {
        self.recorded()
            .into_iter()
            .map(|query| query.centre)
            .collect()
    }

    fn recorded(&self) -> Vec<BranchQuery> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

impl BranchDirectory for MemoryDirectory {
    fn find_branches(&self, query: &BranchQuery) -> Result<Vec<Point>, DirectoryError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(self.branches.get(&query.brand).cloned().unwrap_or_default())
    }
}
