//! HTTP-based `BranchDirectory` using an Overpass API interpreter.

use std::time::Duration;

use errand_core::{BranchDirectory, BranchQuery, DirectoryError, Point};
use geo::Coord;
use reqwest::StatusCode;

use super::overpass::{OverpassResponse, brand_listing_query, branch_query};
use crate::blocking::{BlockingClient, ClientBuildError};
use crate::routing::DEFAULT_USER_AGENT;

/// Public Overpass interpreter.
const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`OverpassDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassDirectoryConfig {
    /// Interpreter URL queries are posted to.
    pub endpoint: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OverpassDirectoryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OverpassDirectoryConfig {
    /// Create a new configuration for the given interpreter URL.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Branch directory backed by OpenStreetMap data served through Overpass.
///
/// Nodes, ways and relations tagged `brand=<chain>` within the radius are
/// returned. Area elements are placed at their computed centre.
#[derive(Debug)]
pub struct OverpassDirectory {
    http: BlockingClient,
    config: OverpassDirectoryConfig,
}

impl OverpassDirectory {
    /// Create a directory for `endpoint` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(OverpassDirectoryConfig::new(endpoint))
    }

    /// Create a directory with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: OverpassDirectoryConfig) -> Result<Self, ClientBuildError> {
        let http = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self { http, config })
    }

    /// The configuration this directory was built with.
    #[must_use]
    pub const fn config(&self) -> &OverpassDirectoryConfig {
        &self.config
    }

    /// List the distinct brands with named branches near `centre`, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the interpreter cannot be reached or
    /// answers with something other than Overpass JSON.
    pub fn nearby_brands(
        &self,
        centre: Coord<f64>,
        radius_metres: f64,
    ) -> Result<Vec<String>, DirectoryError> {
        let response = self.run(brand_listing_query(centre, radius_metres))?;
        let brands = response.brands();
        log::info!("found {} brand(s) near {centre:?}", brands.len());
        Ok(brands)
    }

    fn run(&self, query: String) -> Result<OverpassResponse, DirectoryError> {
        log::debug!("posting Overpass query to {}", self.config.endpoint);
        self.http.block_on(self.post_async(query))
    }

    async fn post_async(&self, query: String) -> Result<OverpassResponse, DirectoryError> {
        let url = self.config.endpoint.as_str();
        let response = self
            .http
            .client()
            .post(url)
            .body(query)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        interpret_response(status, &body, url)
    }

    /// Convert a reqwest error to a [`DirectoryError`].
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> DirectoryError {
        if error.is_timeout() {
            return DirectoryError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return DirectoryError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        DirectoryError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl BranchDirectory for OverpassDirectory {
    fn find_branches(&self, query: &BranchQuery) -> Result<Vec<Point>, DirectoryError> {
        let response = self.run(branch_query(query))?;
        let branches = response.branches(&query.brand);
        log::info!(
            "found {} branch(es) of {} within {} m",
            branches.len(),
            query.brand,
            query.radius_metres
        );
        Ok(branches)
    }
}

/// Interpret an interpreter reply.
///
/// Overpass explains failures (rate limits, query timeouts) in HTML, so any
/// non-success status is reported without decoding the body.
fn interpret_response(
    status: StatusCode,
    body: &str,
    url: &str,
) -> Result<OverpassResponse, DirectoryError> {
    if !status.is_success() {
        return Err(DirectoryError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_owned(),
        });
    }
    serde_json::from_str(body).map_err(|err| DirectoryError::Parse {
        message: err.to_string(),
    })
}
