//! HTTP-based `DistanceOracle` using OSRM's Route API.
//!
//! The [`DistanceOracle`] trait is synchronous so that the planner stays
//! embeddable in synchronous contexts. This oracle bridges the async HTTP
//! call to the sync interface by blocking on a Tokio runtime internally.

use std::time::Duration;

use errand_core::{Distance, DistanceOracle, Point, RoutingUnavailable};
use reqwest::StatusCode;

use super::osrm::RouteResponse;
use crate::blocking::{BlockingClient, ClientBuildError};

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "errand-routing/0.1";

/// Public OSRM demo server.
const DEFAULT_BASE_URL: &str = "http://router.project-osrm.org";

/// Default routing profile.
const DEFAULT_PROFILE: &str = "driving";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpDistanceOracle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpDistanceOracleConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Routing profile, e.g. `"driving"`, `"walking"` or `"cycling"`.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpDistanceOracleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpDistanceOracleConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
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

/// Road-distance oracle backed by the OSRM Route API.
///
/// One HTTP request is issued per [`DistanceOracle::distance`] call and the
/// caller is suspended until it completes. The length of the first (cheapest)
/// route is reported in kilometres.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime, or inside a `current_thread` runtime, the
/// oracle drives requests on its own stored runtime. Inside a multi-threaded
/// runtime it borrows the caller's handle through
/// [`tokio::task::block_in_place`].
#[derive(Debug)]
pub struct HttpDistanceOracle {
    http: BlockingClient,
    config: HttpDistanceOracleConfig,
}

impl HttpDistanceOracle {
    /// Create an oracle for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpDistanceOracleConfig::new(base_url))
    }

    /// Create an oracle with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpDistanceOracleConfig) -> Result<Self, ClientBuildError> {
        let http = BlockingClient::new(&config.user_agent, config.timeout)?;
        Ok(Self { http, config })
    }

    /// The configuration this oracle was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpDistanceOracleConfig {
        &self.config
    }

    /// Build the OSRM Route API URL for a pair of points.
    ///
    /// The URL format is
    /// `{base_url}/route/v1/{profile}/{lon},{lat};{lon},{lat}?overview=false`.
    fn build_route_url(&self, from: &Point, to: &Point) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            from.longitude(),
            from.latitude(),
            to.longitude(),
            to.latitude(),
        )
    }

    async fn fetch_distance_async(&self, url: &str) -> Result<Distance, RoutingUnavailable> {
        let response = self
            .http
            .client()
            .get(url)
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

    /// Convert a reqwest error to a [`RoutingUnavailable`].
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RoutingUnavailable {
        if error.is_timeout() {
            return RoutingUnavailable::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RoutingUnavailable::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RoutingUnavailable::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl DistanceOracle for HttpDistanceOracle {
    /// Query OSRM for the road distance between two points.
    ///
    /// # Runtime requirements
    ///
    /// Inside an existing Tokio runtime the runtime must be multi-threaded.
    /// A `current_thread` caller falls back to the oracle's own runtime,
    /// which may deadlock if the caller's runtime drives IO this request
    /// needs.
    fn distance(&self, from: &Point, to: &Point) -> Result<Distance, RoutingUnavailable> {
        let url = self.build_route_url(from, to);
        log::debug!("querying OSRM: {url}");
        let outcome = self.http.block_on(self.fetch_distance_async(&url));
        if let Err(err) = &outcome {
            log::debug!("OSRM query failed: {err}");
        }
        outcome
    }
}

/// Interpret an OSRM reply.
///
/// OSRM reports application errors such as `NoRoute` with a 4xx status and a
/// JSON body, so the body is decoded before the status is considered.
fn interpret_response(
    status: StatusCode,
    body: &str,
    url: &str,
) -> Result<Distance, RoutingUnavailable> {
    match serde_json::from_str::<RouteResponse>(body) {
        Ok(response) => convert_response(response),
        Err(err) if status.is_success() => Err(RoutingUnavailable::Parse {
            message: err.to_string(),
        }),
        Err(_) => Err(RoutingUnavailable::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_owned(),
        }),
    }
}

/// Convert a decoded OSRM response into a distance.
fn convert_response(response: RouteResponse) -> Result<Distance, RoutingUnavailable> {
    if response.is_no_route() {
        return Err(RoutingUnavailable::NoRoute);
    }
    if !response.is_ok() {
        return Err(RoutingUnavailable::Service {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let route = response.routes.first().ok_or(RoutingUnavailable::NoRoute)?;
    Distance::from_metres(route.distance).map_err(|err| RoutingUnavailable::Parse {
        message: err.to_string(),
    })
}
