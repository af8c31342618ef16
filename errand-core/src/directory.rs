//! Resolve chain businesses into nearby branch locations.
//!
//! The planner treats the points-of-interest directory as an external
//! collaborator: it only consumes the [`Point`]s a [`BranchDirectory`]
//! returns and never inspects how they were found.

use geo::Coord;
use thiserror::Error;

use crate::Point;

/// Parameters for a single branch lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchQuery {
    /// Brand tag to match, e.g. `"Tesco"`.
    pub brand: String,
    /// Centre of the search area (`x = longitude`, `y = latitude`).
    pub centre: Coord<f64>,
    /// Search radius in metres.
    pub radius_metres: f64,
}

impl BranchQuery {
    /// Construct a query for `brand` around `centre`.
    #[must_use]
    pub fn new(brand: impl Into<String>, centre: Coord<f64>, radius_metres: f64) -> Self {
        Self {
            brand: brand.into(),
            centre,
            radius_metres,
        }
    }
}

/// Errors from [`BranchDirectory::find_branches`] and chain resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The directory could not be reached.
    #[error("network error querying {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The directory did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The directory answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response could not be decoded.
    #[error("malformed directory response: {message}")]
    Parse {
        /// Decoding error description.
        message: String,
    },
    /// Chains were requested but neither a search centre nor a start exists.
    #[error("chain lookup needs a search centre or a start location")]
    MissingCentre,
}

/// Look up branches of a chain business near a location.
///
/// Returning an empty list is not an error: a chain may simply have no
/// branch within the radius.
pub trait BranchDirectory {
    /// Return the branches matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the directory cannot answer.
    fn find_branches(&self, query: &BranchQuery) -> Result<Vec<Point>, DirectoryError>;
}

impl<T> BranchDirectory for &T
where
    T: BranchDirectory + ?Sized,
{
    fn find_branches(&self, query: &BranchQuery) -> Result<Vec<Point>, DirectoryError> {
        (**self).find_branches(query)
    }
}

impl<T> BranchDirectory for Box<T>
where
    T: BranchDirectory + ?Sized,
{
    fn find_branches(&self, query: &BranchQuery) -> Result<Vec<Point>, DirectoryError> {
        (**self).find_branches(query)
    }
}
