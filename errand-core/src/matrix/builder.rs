//! Fill a [`DistanceMatrix`] by querying a [`DistanceOracle`] once per pair.

use crate::{DistanceOracle, PointSet};

use super::{DistanceMatrix, MatrixError};

/// Builds distance matrices over a [`PointSet`].
///
/// For `n` points the builder issues exactly `n * (n - 1) / 2` oracle calls,
/// sequentially, one per unordered pair `(i, j)` with `i < j`. The diagonal is
/// never queried.
///
/// # Examples
/// ```
/// use errand_core::{
///     Distance, DistanceMatrixBuilder, DistanceOracle, Point, PointId, PointSet,
///     RoutingUnavailable,
/// };
///
/// struct Fixed;
///
/// impl DistanceOracle for Fixed {
///     fn distance(&self, _: &Point, _: &Point) -> Result<Distance, RoutingUnavailable> {
///         Distance::from_kilometres(12.0).map_err(|err| RoutingUnavailable::Parse {
///             message: err.to_string(),
///         })
///     }
/// }
///
/// let (a, b) = (Point::from_lat_lng(0.0, 0.0), Point::from_lat_lng(0.0, 1.0));
/// let oracle = Fixed;
/// let set = PointSet::new(a, Vec::new(), b);
///
/// let matrix = DistanceMatrixBuilder::new(&oracle).build(&set)?;
/// assert_eq!(
///     matrix.get(PointId::new(1), PointId::new(0)).map(|d| d.kilometres()),
///     Some(12.0)
/// );
/// # Ok::<(), errand_core::MatrixError>(())
/// ```
#[derive(Debug)]
pub struct DistanceMatrixBuilder<'a, O: ?Sized> {
    oracle: &'a O,
}

impl<'a, O> DistanceMatrixBuilder<'a, O>
where
    O: DistanceOracle + ?Sized,
{
    /// Create a builder backed by `oracle`.
    #[must_use]
    pub const fn new(oracle: &'a O) -> Self {
        Self { oracle }
    }

    /// Query every unordered pair of `points` and return the full matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError`] for the first pair whose query fails. No partial
    /// matrix is returned.
    pub fn build(&self, points: &PointSet) -> Result<DistanceMatrix, MatrixError> {
        let mut matrix = DistanceMatrix::new(points.len());
        let mut queries = 0_usize;
        for (from_id, to_id) in points.pairs() {
            let (Some(from), Some(to)) = (points.get(from_id), points.get(to_id)) else {
                continue;
            };
            let distance = self.oracle.distance(from, to).map_err(|source| {
                log::warn!("aborting matrix build: {from_id} -> {to_id} failed: {source}");
                MatrixError {
                    from: from_id,
                    to: to_id,
                    source,
                }
            })?;
            log::debug!("distance {from_id} -> {to_id} = {distance}");
            matrix.insert(from_id, to_id, distance);
            queries += 1;
        }
        log::info!(
            "distance matrix for {} points complete after {queries} queries",
            points.len()
        );
        Ok(matrix)
    }
}

/// Build the distance matrix for `points` using `oracle`.
///
/// Shorthand for [`DistanceMatrixBuilder::build`].
///
/// # Errors
///
/// Returns [`MatrixError`] for the first pair whose query fails.
pub fn build_matrix<O>(oracle: &O, points: &PointSet) -> Result<DistanceMatrix, MatrixError>
where
    O: DistanceOracle + ?Sized,
{
    DistanceMatrixBuilder::new(oracle).build(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CountingOracle, FailingPairOracle, TableOracle};
    use crate::{Point, PointId, RoutingUnavailable};
    use rstest::{fixture, rstest};

    #[fixture]
    fn triangle() -> (PointSet, TableOracle) {
        let a = Point::from_lat_lng(0.0, 0.0);
        let b = Point::from_lat_lng(0.0, 1.0);
        let c = Point::from_lat_lng(1.0, 0.0);
        let oracle = TableOracle::default()
            .with_distance(&a, &b, 5.0)
            .with_distance(&a, &c, 5.0)
            .with_distance(&b, &c, 3.0);
        (PointSet::new(a, vec![b], c), oracle)
    }

    #[rstest]
    fn builds_symmetric_complete_matrix(triangle: (PointSet, TableOracle)) {
        let (set, oracle) = triangle;
        let matrix = build_matrix(&oracle, &set).expect("all pairs known");
        assert!(matrix.is_complete());
        assert!(matrix.is_symmetric());
        let b_to_c = matrix
            .get(PointId::new(1), PointId::new(2))
            .expect("populated");
        assert_eq!(b_to_c.kilometres(), 3.0);
    }

    #[rstest]
    #[case(2, 1)]
    #[case(3, 3)]
    #[case(5, 10)]
    fn issues_one_query_per_unordered_pair(#[case] size: u32, #[case] expected: usize) {
        let oracle = CountingOracle::new(crate::test_support::EuclideanOracle);
        let points: Vec<Point> = (0..size)
            .map(|i| Point::from_lat_lng(0.0, f64::from(i)))
            .collect();
        let (first, rest) = points.split_first().expect("non-empty");
        let (last, middle) = rest.split_last().expect("at least two points");
        let set = PointSet::new(first.clone(), middle.to_vec(), last.clone());

        build_matrix(&oracle, &set).expect("euclidean never fails");

        assert_eq!(oracle.calls(), expected);
        assert_eq!(oracle.distinct_pairs(), expected);
    }

    #[rstest]
    fn single_failure_aborts_the_build(triangle: (PointSet, TableOracle)) {
        let (set, oracle) = triangle;
        let b = set.free().first().cloned().expect("one free point");
        let c = set.end().clone();
        let failing = FailingPairOracle::new(oracle, &b, &c, RoutingUnavailable::NoRoute);

        let err = build_matrix(&failing, &set).expect_err("pair b-c fails");

        assert_eq!(err.from, PointId::new(1));
        assert_eq!(err.to, PointId::new(2));
        assert_eq!(err.source, RoutingUnavailable::NoRoute);
    }
}
