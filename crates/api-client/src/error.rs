//! Error types for the Open Food Facts client

use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Failure taxonomy surfaced to callers
///
/// Every operation on [`crate::FoodFactsClient`] resolves to one of these
/// five conditions. Only [`ClientError::NetworkUnavailable`] is retried;
/// an HTTP error status that was actually received is definitive.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A required identifier (category, barcode) was missing or empty
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The upstream could not be reached at all (probe failure, DNS,
    /// connection refused, timeout)
    #[error("upstream unreachable: {0}")]
    NetworkUnavailable(String),

    /// Upstream responded 404
    #[error("not found: {0}")]
    NotFound(String),

    /// Upstream responded with a 5xx status
    #[error("upstream server error ({status}): {message}")]
    UpstreamServer {
        /// HTTP status code
        status: u16,
        /// Error message from the upstream body
        message: String,
    },

    /// Any other failure (malformed JSON body, unexpected status, ...)
    #[error("request failed: {0}")]
    General(String),
}

impl ClientError {
    /// Create an invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Check whether this failure class is transient and worth retrying
    ///
    /// Deliberately narrow: only the no-response class retries. Received
    /// 4xx/5xx statuses are definitive answers from the upstream.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkUnavailable(_))
    }

    /// Check if this is the upstream-5xx class
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::UpstreamServer { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::NetworkUnavailable(e.to_string())
        } else if e.is_decode() {
            Self::General(format!("malformed response body: {e}"))
        } else {
            Self::General(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::General(format!("malformed response body: {e}"))
    }
}
