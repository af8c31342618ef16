//! Road distances in a single canonical unit.
//!
//! Every distance that flows through the planner is stored in kilometres.
//! Routing services typically answer in metres; [`Distance::from_metres`]
//! performs the conversion once at the boundary so matrices never mix units.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use thiserror::Error;

/// A non-negative, finite road distance in kilometres.
///
/// # Examples
/// ```
/// use errand_core::Distance;
///
/// let leg = Distance::from_metres(1500.0)?;
/// assert_eq!(leg.kilometres(), 1.5);
///
/// let total: Distance = [leg, leg].into_iter().sum();
/// assert_eq!(total.kilometres(), 3.0);
/// # Ok::<(), errand_core::InvalidDistance>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Distance(f64);

/// Raised when a raw value cannot represent a road distance.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("distance must be finite and non-negative, got {value}")]
pub struct InvalidDistance {
    /// The rejected raw value.
    pub value: f64,
}

impl Distance {
    /// The empty distance.
    pub const ZERO: Self = Self(0.0);

    /// Construct a distance from kilometres.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDistance`] for negative, NaN or infinite input.
    pub fn from_kilometres(kilometres: f64) -> Result<Self, InvalidDistance> {
        if kilometres.is_finite() && kilometres >= 0.0 {
            Ok(Self(kilometres))
        } else {
            Err(InvalidDistance { value: kilometres })
        }
    }

    /// Construct a distance from metres.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDistance`] for negative, NaN or infinite input.
    #[expect(
        clippy::float_arithmetic,
        reason = "unit conversion from metres to kilometres"
    )]
    pub fn from_metres(metres: f64) -> Result<Self, InvalidDistance> {
        Self::from_kilometres(metres / 1000.0).map_err(|_| InvalidDistance { value: metres })
    }

    /// The distance in kilometres.
    #[must_use]
    pub const fn kilometres(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Distance {
    type Error = InvalidDistance;

    fn try_from(kilometres: f64) -> Result<Self, Self::Error> {
        Self::from_kilometres(kilometres)
    }
}

impl From<Distance> for f64 {
    fn from(distance: Distance) -> Self {
        distance.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} km", self.0)
    }
}

/// Sums saturate at `f64::MAX` so totals stay finite.
#[expect(
    clippy::float_arithmetic,
    reason = "adding two non-negative distances; overflow is clamped to stay finite"
)]
impl Add for Distance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self((self.0 + rhs.0).min(f64::MAX))
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
