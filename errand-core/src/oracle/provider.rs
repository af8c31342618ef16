//! Distance oracle trait.

use crate::{Distance, Point};

use super::error::RoutingUnavailable;

/// Answer road-distance queries between two points.
///
/// Implementations return the travel distance from `from` to `to` in the
/// canonical [`Distance`] unit. They must not cache or retry.
///
/// # Examples
///
/// ```rust
/// use errand_core::{Distance, DistanceOracle, Point, RoutingUnavailable};
///
/// struct Manhattan;
///
/// impl DistanceOracle for Manhattan {
///     fn distance(&self, from: &Point, to: &Point) -> Result<Distance, RoutingUnavailable> {
///         let km = (from.latitude() - to.latitude()).abs()
///             + (from.longitude() - to.longitude()).abs();
///         Distance::from_kilometres(km).map_err(|err| RoutingUnavailable::Parse {
///             message: err.to_string(),
///         })
///     }
/// }
///
/// let a = Point::from_lat_lng(0.0, 0.0);
/// let b = Point::from_lat_lng(1.0, 2.0);
/// assert_eq!(Manhattan.distance(&a, &b)?.kilometres(), 3.0);
/// # Ok::<(), RoutingUnavailable>(())
/// ```
pub trait DistanceOracle {
    /// Return the road distance from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingUnavailable`] when the service is unreachable, answers
    /// with malformed data, or reports no viable route.
    fn distance(&self, from: &Point, to: &Point) -> Result<Distance, RoutingUnavailable>;
}

impl<T> DistanceOracle for &T
where
    T: DistanceOracle + ?Sized,
{
    fn distance(&self, from: &Point, to: &Point) -> Result<Distance, RoutingUnavailable> {
        (**self).distance(from, to)
    }
}

impl<T> DistanceOracle for Box<T>
where
    T: DistanceOracle + ?Sized,
{
    fn distance(&self, from: &Point, to: &Point) -> Result<Distance, RoutingUnavailable> {
        (**self).distance(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::TableOracle;

    #[rstest]
    fn looks_up_pairs_in_either_direction() {
        let a = Point::from_lat_lng(0.0, 0.0);
        let b = Point::from_lat_lng(0.0, 1.0);
        let oracle = TableOracle::default().with_distance(&a, &b, 4.0);

        let forward = oracle.distance(&a, &b).expect("known pair");
        let backward = oracle.distance(&b, &a).expect("known pair");

        assert_eq!(forward.kilometres(), 4.0);
        assert_eq!(forward, backward);
    }

    #[rstest]
    fn unknown_pair_has_no_route() {
        let a = Point::from_lat_lng(0.0, 0.0);
        let b = Point::from_lat_lng(0.0, 1.0);
        let err = TableOracle::default()
            .distance(&a, &b)
            .expect_err("unknown pair");
        assert_eq!(err, RoutingUnavailable::NoRoute);
    }

    #[rstest]
    fn boxed_oracles_delegate() {
        let a = Point::from_lat_lng(0.0, 0.0);
        let b = Point::from_lat_lng(0.0, 1.0);
        let oracle: Box<dyn DistanceOracle> =
            Box::new(TableOracle::default().with_distance(&a, &b, 2.0));
        assert_eq!(oracle.distance(&a, &b).expect("known pair").kilometres(), 2.0);
    }
}
