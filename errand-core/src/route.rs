//! Optimised visiting orders.
//!
//! Aggregates ordered points with their total road distance.

use crate::{Distance, Point};

/// An ordered path from the start to the end with its total distance.
///
/// # Examples
/// ```
/// use errand_core::{Distance, Point, Route};
///
/// let start = Point::from_lat_lng(0.0, 0.0);
/// let end = Point::from_lat_lng(0.0, 1.0);
/// let route = Route::new(vec![start, end], Distance::from_kilometres(111.0)?);
///
/// assert_eq!(route.points().len(), 2);
/// assert_eq!(route.legs().count(), 1);
/// assert_eq!(route.total_distance().kilometres(), 111.0);
/// # Ok::<(), errand_core::InvalidDistance>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    points: Vec<Point>,
    #[cfg_attr(feature = "serde", serde(rename = "total_distance_km"))]
    total_distance: Distance,
}

impl Route {
    /// Construct a route from ordered points and their total distance.
    #[must_use]
    pub const fn new(points: Vec<Point>, total_distance: Distance) -> Self {
        Self {
            points,
            total_distance,
        }
    }

    /// Points in visiting order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Sum of the consecutive leg distances.
    #[must_use]
    pub const fn total_distance(&self) -> Distance {
        self.total_distance
    }

    /// First point of the route.
    #[must_use]
    pub fn start(&self) -> Option<&Point> {
        self.points.first()
    }

    /// Last point of the route.
    #[must_use]
    pub fn end(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Consecutive `(from, to)` pairs along the route.
    pub fn legs(&self) -> impl Iterator<Item = (&Point, &Point)> {
        self.points.windows(2).filter_map(|pair| match pair {
            [from, to] => Some((from, to)),
            _ => None,
        })
    }

    /// Consume the route, returning its points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}
