//! Error types emitted by the Errand CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use errand_core::{DirectoryError, OptimiseError, RouteRequestError};
use errand_data::ClientBuildError;
use thiserror::Error;

/// Errors emitted by the Errand CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// Installing the log backend failed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] log::SetLoggerError),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A required positional argument is missing after configuration merging.
    #[error("missing <{field}> argument (pass it on the command line or set {env})")]
    MissingPositional {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A numeric option is outside its accepted range.
    #[error("{field} must be a positive, finite number of metres (got {value})")]
    InvalidRadius {
        /// Option name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A coordinate option is not a finite angle within its range.
    #[error("{field} must be a finite number of degrees between -{limit} and {limit} (got {value})")]
    InvalidCoordinate {
        /// Option name.
        field: &'static str,
        /// Largest accepted magnitude in degrees.
        limit: f64,
        /// Rejected value.
        value: f64,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the route request file failed.
    #[error("failed to open route request at {path:?}: {source}")]
    OpenRouteRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Route request JSON could not be decoded.
    #[error("failed to parse route request JSON at {path:?}: {source}")]
    ParseRouteRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// The route request lacks an endpoint.
    #[error("route request in {path:?} is invalid: {source}")]
    InvalidRouteRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: RouteRequestError,
    },
    /// Constructing the distance oracle failed.
    #[error("failed to build distance oracle for {base_url:?}: {source}")]
    BuildDistanceOracle {
        /// Configured OSRM base URL.
        base_url: String,
        /// Construction failure.
        #[source]
        source: ClientBuildError,
    },
    /// Constructing the branch directory failed.
    #[error("failed to build branch directory for {endpoint:?}: {source}")]
    BuildDirectory {
        /// Configured Overpass endpoint.
        endpoint: String,
        /// Construction failure.
        #[source]
        source: ClientBuildError,
    },
    /// Looking up chain branches or brands failed.
    #[error("branch lookup failed: {source}")]
    Directory {
        /// Directory failure.
        #[source]
        source: DirectoryError,
    },
    /// Route optimisation failed.
    #[error("optimisation failed: {source}")]
    Optimise {
        /// Optimisation failure.
        #[source]
        source: OptimiseError,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
