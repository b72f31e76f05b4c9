//! Forwarder error types.

use thiserror::Error;

/// Errors from the upstream forwarders.
///
/// `Upstream` carries the status and body text of a non-success upstream
/// reply so the HTTP layer can surface the diagnostic text. Transport
/// failures (DNS, connect, timeout) arrive as `Request`.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A required credential or endpoint is missing from settings.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
    /// The upstream replied with a non-success status.
    #[error("upstream returned status {status}: {body}")]
    Upstream {
        /// HTTP status code of the upstream reply.
        status: u16,
        /// Body text of the upstream reply, empty when unreadable.
        body: String,
    },
    /// The request never completed (connect failure, timeout, bad URL).
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The upstream replied 2xx but the body was not in the expected shape.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

/// Result type for forwarder operations.
pub type Result<T> = std::result::Result<T, RelayError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
