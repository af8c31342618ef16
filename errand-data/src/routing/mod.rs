//! Road-distance queries against an OSRM route service.
//!
//! [`HttpDistanceOracle`] implements [`errand_core::DistanceOracle`] by
//! asking the OSRM Route API for the cheapest route between two points and
//! reporting its length in kilometres.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use errand_core::{DistanceOracle, Point};
//! use errand_data::routing::{HttpDistanceOracle, HttpDistanceOracleConfig};
//!
//! let config = HttpDistanceOracleConfig::new("http://localhost:5000")
//!     .with_profile("driving")
//!     .with_timeout(Duration::from_secs(10));
//! let oracle = HttpDistanceOracle::with_config(config)?;
//!
//! let home = Point::from_lat_lng(51.5, -0.1);
//! let shop = Point::from_lat_lng(51.6, -0.2);
//! let distance = oracle.distance(&home, &shop)?;
//! println!("{distance}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod osrm;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{DEFAULT_USER_AGENT, HttpDistanceOracle, HttpDistanceOracleConfig};
