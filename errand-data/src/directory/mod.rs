//! Chain-branch lookups against an Overpass API interpreter.
//!
//! [`OverpassDirectory`] implements [`errand_core::BranchDirectory`] by
//! searching OpenStreetMap for elements tagged `brand=<chain>` around a
//! centre point.
//!
//! # Example
//!
//! ```no_run
//! use errand_core::{BranchDirectory, BranchQuery};
//! use errand_data::directory::OverpassDirectory;
//! use geo::Coord;
//!
//! let directory = OverpassDirectory::new("https://overpass-api.de/api/interpreter")?;
//! let query = BranchQuery::new("Tesco", Coord { x: -0.12, y: 51.5 }, 5_000.0);
//! for branch in directory.find_branches(&query)? {
//!     println!("{branch}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod overpass;
mod provider;

pub use provider::{OverpassDirectory, OverpassDirectoryConfig};
