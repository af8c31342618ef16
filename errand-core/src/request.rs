//! Trip descriptions handed to the planner.

use std::fmt;

use geo::Coord;
use thiserror::Error;

use crate::{BranchDirectory, BranchQuery, DirectoryError, Point, PointKind, PointSet};

/// Which fixed endpoint a request is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingEndpoint {
    /// No start point was supplied.
    Start,
    /// No end point was supplied.
    End,
    /// Neither endpoint was supplied.
    Both,
}

impl fmt::Display for MissingEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Both => "start and end",
        };
        f.write_str(name)
    }
}

/// Errors returned by [`RouteRequest::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteRequestError {
    /// The caller omitted a fixed endpoint.
    #[error("route request is missing its {missing} location")]
    InsufficientEndpoints {
        /// The absent endpoint(s).
        missing: MissingEndpoint,
    },
}

/// An immutable description of one trip to optimise.
///
/// `chains` holds brand names still to be resolved into branch locations;
/// `chain_branches` holds branches that have already been resolved. Only
/// resolved branches take part in optimisation.
///
/// # Examples
/// ```
/// use errand_core::{Point, PointKind, RouteRequest};
///
/// let request = RouteRequest::new(
///     Point::from_lat_lng(0.0, 0.0),
///     Point::from_lat_lng(1.0, 1.0),
/// )
/// .with_intermediate(Point::from_lat_lng(0.5, 0.5));
///
/// let set = request.point_set()?;
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.start().kind, Some(PointKind::Start));
/// # Ok::<(), errand_core::RouteRequestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    /// Fixed first stop.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Option<Point>,
    /// Fixed last stop.
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: Option<Point>,
    /// Stops entered by hand.
    #[cfg_attr(feature = "serde", serde(default))]
    pub intermediates: Vec<Point>,
    /// Chain businesses whose nearby branches should be visited.
    #[cfg_attr(feature = "serde", serde(default))]
    pub chains: Vec<String>,
    /// Branch locations already resolved from `chains`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub chain_branches: Vec<Point>,
    /// Centre for branch searches; the start is used when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub search_centre: Option<Coord<f64>>,
}

impl RouteRequest {
    /// Construct a request between two fixed endpoints.
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    /// Append a manual stop.
    #[must_use]
    pub fn with_intermediate(mut self, point: Point) -> Self {
        self.intermediates.push(point);
        self
    }

    /// Append a chain name to resolve later.
    #[must_use]
    pub fn with_chain(mut self, chain: impl Into<String>) -> Self {
        self.chains.push(chain.into());
        self
    }

    /// Append an already resolved chain branch.
    #[must_use]
    pub fn with_chain_branch(mut self, point: Point) -> Self {
        self.chain_branches.push(point);
        self
    }

    /// Check that both fixed endpoints are present.
    ///
    /// # Errors
    ///
    /// Returns [`RouteRequestError::InsufficientEndpoints`] naming the missing
    /// endpoint(s).
    pub fn validate(&self) -> Result<(&Point, &Point), RouteRequestError> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => Ok((start, end)),
            (None, Some(_)) => Err(RouteRequestError::InsufficientEndpoints {
                missing: MissingEndpoint::Start,
            }),
            (Some(_), None) => Err(RouteRequestError::InsufficientEndpoints {
                missing: MissingEndpoint::End,
            }),
            (None, None) => Err(RouteRequestError::InsufficientEndpoints {
                missing: MissingEndpoint::Both,
            }),
        }
    }

    /// Flatten the request into `[start, intermediates..., branches..., end]`.
    ///
    /// Each point is tagged with the [`PointKind`] matching its role.
    ///
    /// # Errors
    ///
    /// Returns [`RouteRequestError::InsufficientEndpoints`] when an endpoint is
    /// missing.
    pub fn point_set(&self) -> Result<PointSet, RouteRequestError> {
        let (start, end) = self.validate()?;
        if !self.chains.is_empty() {
            log::warn!(
                "{} chain name(s) have not been resolved and will not be visited",
                self.chains.len()
            );
        }
        let free = self
            .intermediates
            .iter()
            .map(|point| point.clone().with_kind(PointKind::Intermediate))
            .chain(
                self.chain_branches
                    .iter()
                    .map(|point| point.clone().with_kind(PointKind::ChainBranch)),
            );
        Ok(PointSet::new(
            start.clone().with_kind(PointKind::Start),
            free,
            end.clone().with_kind(PointKind::End),
        ))
    }

    /// Number of reorderable points once the request is flattened.
    #[must_use]
    pub fn free_point_count(&self) -> usize {
        self.intermediates.len() + self.chain_branches.len()
    }

    /// Resolve every chain name into branch points using `directory`.
    ///
    /// Chains are queried in order and duplicate names are looked up once.
    /// Branches are searched within `radius_metres` of `search_centre`, or of
    /// the start when no centre is set. The returned request has an empty
    /// chain list.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] from the first failing lookup.
    pub fn with_resolved_chains<D>(
        mut self,
        directory: &D,
        radius_metres: f64,
    ) -> Result<Self, DirectoryError>
    where
        D: BranchDirectory + ?Sized,
    {
        if self.chains.is_empty() {
            return Ok(self);
        }
        let centre = self
            .search_centre
            .or_else(|| self.start.as_ref().map(|start| start.location))
            .ok_or(DirectoryError::MissingCentre)?;

        let mut seen: Vec<&str> = Vec::with_capacity(self.chains.len());
        let mut resolved = Vec::new();
        for chain in &self.chains {
            if seen.contains(&chain.as_str()) {
                continue;
            }
            seen.push(chain);
            let query = BranchQuery::new(chain.clone(), centre, radius_metres);
            let branches = directory.find_branches(&query)?;
            log::debug!("chain {chain:?} resolved to {} branch(es)", branches.len());
            resolved.extend(
                branches
                    .into_iter()
                    .map(|point| point.with_kind(PointKind::ChainBranch)),
            );
        }
        self.chain_branches.extend(resolved);
        self.chains.clear();
        Ok(self)
    }
}
