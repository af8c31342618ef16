//! Test utilities for distance oracles.
//!
//! [`StubDistanceOracle`] is a deterministic test double for
//! [`DistanceOracle`] that answers with a pre-configured response without
//! making HTTP requests.

use errand_core::{Distance, DistanceOracle, Point, RoutingUnavailable};

/// Stub `DistanceOracle` for testing.
///
/// # Example
///
/// ```
/// use errand_core::{DistanceOracle, Point};
/// use errand_data::routing::test_support::StubDistanceOracle;
///
/// let oracle = StubDistanceOracle::with_kilometres(2.5);
/// let distance = oracle.distance(&Point::from_lat_lng(0.0, 0.0), &Point::from_lat_lng(1.0, 1.0))?;
/// assert_eq!(distance.kilometres(), 2.5);
/// # Ok::<(), errand_core::RoutingUnavailable>(())
/// ```
#[derive(Debug, Clone)]
pub struct StubDistanceOracle {
    response: Result<Distance, RoutingUnavailable>,
}

impl StubDistanceOracle {
    /// Create an oracle answering every distinct pair with `kilometres`.
    ///
    /// Invalid values make every query fail with a parse error, mirroring a
    /// service that returned a malformed distance.
    #[must_use]
    pub fn with_kilometres(kilometres: f64) -> Self {
        let response = Distance::from_kilometres(kilometres).map_err(|err| {
            RoutingUnavailable::Parse {
                message: err.to_string(),
            }
        });
        Self { response }
    }

    /// Create an oracle failing every query with `error`.
    #[must_use]
    pub const fn with_error(error: RoutingUnavailable) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl DistanceOracle for StubDistanceOracle {
    fn distance(&self, from: &Point, to: &Point) -> Result<Distance, RoutingUnavailable> {
        if from.location == to.location {
            return Ok(Distance::ZERO);
        }
        self.response.clone()
    }
}
