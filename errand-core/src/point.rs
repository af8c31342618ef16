use std::fmt;

use geo::Coord;

/// Where a point came from when the trip was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PointKind {
    /// Fixed first stop.
    Start,
    /// Fixed last stop.
    End,
    /// A stop the user entered by hand.
    Intermediate,
    /// A branch of a chain business found through a directory lookup.
    ChainBranch,
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Intermediate => "intermediate",
            Self::ChainBranch => "chain-branch",
        };
        f.write_str(name)
    }
}

/// A geographic location on the trip.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`, matching
/// the `lon,lat` order routing services expect.
///
/// Points are plain values. Two points with identical coordinates are still
/// treated as different stops; the solver tracks them by position in the
/// [`PointSet`](crate::PointSet), never by value.
///
/// # Examples
/// ```
/// use errand_core::{Point, PointKind};
///
/// let bakery = Point::from_lat_lng(51.5, -0.12)
///     .with_label("Bakery")
///     .with_kind(PointKind::Intermediate);
///
/// assert_eq!(bakery.latitude(), 51.5);
/// assert_eq!(bakery.longitude(), -0.12);
/// assert_eq!(bakery.label.as_deref(), Some("Bakery"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Display label, usually an address or a business name.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub label: Option<String>,
    /// Origin of the point within the trip.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub kind: Option<PointKind>,
}

impl Point {
    /// Construct an unlabelled point at `location`.
    #[must_use]
    pub const fn new(location: Coord<f64>) -> Self {
        Self {
            location,
            label: None,
            kind: None,
        }
    }

    /// Construct a point from latitude and longitude in degrees.
    #[must_use]
    pub const fn from_lat_lng(latitude: f64, longitude: f64) -> Self {
        Self::new(Coord {
            x: longitude,
            y: latitude,
        })
    }

    /// Attach a display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach a source-kind tag.
    #[must_use]
    pub const fn with_kind(mut self, kind: PointKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label} ({}, {})", self.latitude(), self.longitude()),
            None => write!(f, "({}, {})", self.latitude(), self.longitude()),
        }
    }
}
