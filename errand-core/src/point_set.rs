//! Arena of points used during a single optimisation run.
//!
//! Every point is addressed by a [`PointId`] assigned when the set is built.
//! The start always has id `0` and the end always has the last id; the free
//! points in between may be visited in any order.

use std::fmt;

use crate::Point;

/// Stable position of a point inside a [`PointSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(usize);

impl PointId {
    /// Wrap a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw index, usable as a matrix row or column.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered `[start, free..., end]` sequence fed into matrix construction.
///
/// # Examples
/// ```
/// use errand_core::{Point, PointId, PointSet};
///
/// let set = PointSet::new(
///     Point::from_lat_lng(0.0, 0.0),
///     vec![Point::from_lat_lng(0.0, 1.0)],
///     Point::from_lat_lng(1.0, 0.0),
/// );
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.start_id(), PointId::new(0));
/// assert_eq!(set.end_id(), PointId::new(2));
/// assert_eq!(set.free_ids().collect::<Vec<_>>(), vec![PointId::new(1)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    start: Point,
    free: Vec<Point>,
    end: Point,
}

impl PointSet {
    /// Assemble a set from its fixed endpoints and free points.
    pub fn new(start: Point, free: impl IntoIterator<Item = Point>, end: Point) -> Self {
        Self {
            start,
            free: free.into_iter().collect(),
            end,
        }
    }

    /// Number of points, endpoints included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.free.len() + 2
    }

    /// Always `false`: a set holds at least its two endpoints.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Id of the fixed start.
    #[must_use]
    pub const fn start_id(&self) -> PointId {
        PointId(0)
    }

    /// Id of the fixed end.
    #[must_use]
    pub const fn end_id(&self) -> PointId {
        PointId(self.free.len() + 1)
    }

    /// Ids of the reorderable points, in insertion order.
    pub fn free_ids(&self) -> impl Iterator<Item = PointId> + Clone + use<> {
        (1..=self.free.len()).map(PointId)
    }

    /// Every id in the set, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = PointId> + Clone + use<> {
        (0..self.len()).map(PointId)
    }

    /// Every unordered pair `(i, j)` with `i < j`.
    pub fn pairs(&self) -> impl Iterator<Item = (PointId, PointId)> + use<> {
        let len = self.len();
        (0..len).flat_map(move |i| ((i + 1)..len).map(move |j| (PointId(i), PointId(j))))
    }

    /// The fixed start.
    #[must_use]
    pub const fn start(&self) -> &Point {
        &self.start
    }

    /// The fixed end.
    #[must_use]
    pub const fn end(&self) -> &Point {
        &self.end
    }

    /// The reorderable points, in insertion order.
    #[must_use]
    pub fn free(&self) -> &[Point] {
        &self.free
    }

    /// Look up a point by id.
    #[must_use]
    pub fn get(&self, id: PointId) -> Option<&Point> {
        match id.0 {
            0 => Some(&self.start),
            index if index == self.free.len() + 1 => Some(&self.end),
            index => self.free.get(index - 1),
        }
    }

    /// Iterate over `(id, point)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &Point)> {
        std::iter::once(&self.start)
            .chain(&self.free)
            .chain(std::iter::once(&self.end))
            .enumerate()
            .map(|(index, point)| (PointId(index), point))
    }
}
