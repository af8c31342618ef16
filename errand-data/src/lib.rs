//! HTTP adapters for the Errand route planner.
//!
//! Responsibilities:
//! - Answer road-distance queries from an OSRM route service
//!   ([`routing::HttpDistanceOracle`]).
//! - Resolve chain businesses into branch locations through an Overpass
//!   interpreter ([`directory::OverpassDirectory`]).
//!
//! Boundaries:
//! - Do not encode planning rules (live in `errand-core`).
//! - Expose synchronous traits; async HTTP stays behind a blocking bridge.
//!
//! Invariants:
//! - Every query is issued on its own and awaited before the next.
//! - No global mutable state.

#![forbid(unsafe_code)]

mod blocking;
pub mod directory;
pub mod routing;

pub use blocking::ClientBuildError;
pub use directory::{OverpassDirectory, OverpassDirectoryConfig};
pub use routing::{HttpDistanceOracle, HttpDistanceOracleConfig};
