//! Error types for transport operations.

use thiserror::Error;

/// Error raised when no HTTP response was received.
///
/// A response with a non-success status is *not* a transport error; it is
/// classified later by the response envelope.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and errors while reading the response body.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built for the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
