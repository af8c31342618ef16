use thiserror::Error;

/// The routing service could not answer for a pair of points.
///
/// Every variant aborts the current optimisation attempt; a placeholder
/// distance would make the search report a wrong optimum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingUnavailable {
    /// The service could not be reached.
    #[error("network error querying {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The service reported an application-level error.
    #[error("routing service error {code}: {message}")]
    Service {
        /// Service status code, e.g. `"InvalidQuery"`.
        code: String,
        /// Service error message.
        message: String,
    },
    /// The response could not be decoded or held an invalid distance.
    #[error("malformed routing response: {message}")]
    Parse {
        /// Decoding error description.
        message: String,
    },
    /// The service found no viable route between the two points.
    #[error("no route between the requested points")]
    NoRoute,
}
