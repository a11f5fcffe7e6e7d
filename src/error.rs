//! Error types for wallet service calls.

/// Errors raised while talking to the wallet service or validating
/// operator input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Login was rejected by the service. Fatal: the session never
    /// starts and logout is not attempted.
    #[error("authentication failed ({status}): {body}")]
    Authentication {
        /// HTTP status of the rejected login.
        status: reqwest::StatusCode,
        /// Response body, surfaced to the operator.
        body: String,
    },

    /// Any other request that came back non-2xx.
    #[error("request failed ({status}): {body}")]
    Request {
        /// HTTP status of the failed request.
        status: reqwest::StatusCode,
        /// Response body, surfaced to the operator.
        body: String,
    },

    /// Network-level failure: connection refused, timeout, malformed
    /// response payload.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Operator input that failed local validation. Raised before any
    /// request is issued.
    #[error("{0}")]
    Validation(String),
}
