//! Failure taxonomy shared by every service client.
//!
//! Each client operation returns [`ServiceResult`]; a failed call carries
//! exactly one [`ServiceError`] and nothing is retried or swallowed.

use thiserror::Error;

use crate::config::{ConfigError, Provider};
use crate::transport::TransportError;

/// Result of one client operation.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Classified failure of a client operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required setting is missing or malformed.
    ///
    /// Always raised before any network attempt.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// A caller-supplied argument violates a documented precondition.
    #[error("{message}")]
    Validation {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable description of the violated rule
        message: String,
    },

    /// No response was received.
    #[error("{provider} network error: {source}")]
    Network {
        /// Provider the request was addressed to
        provider: Provider,
        /// Underlying transport failure
        #[source]
        source: TransportError,
    },

    /// A response was received with a non-success status.
    #[error("{provider} API error: {} {reason}", status_code(.status))]
    Provider {
        /// Provider that answered
        provider: Provider,
        /// HTTP status returned
        status: http::StatusCode,
        /// Reason phrase for the status
        reason: String,
        /// Response body, when it was valid UTF-8
        body: Option<String>,
    },

    /// A response (or webhook payload) could not be decoded.
    #[error("{provider} response could not be decoded: {source}")]
    Decode {
        /// Provider the payload came from
        provider: Provider,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

fn status_code(status: &http::StatusCode) -> u16 {
    status.as_u16()
}

/// Discriminant of a [`ServiceError`], for callers that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ServiceError::Configuration`].
    Configuration,
    /// See [`ServiceError::Validation`].
    Validation,
    /// See [`ServiceError::Network`].
    Network,
    /// See [`ServiceError::Provider`].
    Provider,
    /// See [`ServiceError::Decode`].
    Decode,
}

impl ServiceError {
    /// Creates a validation error for `field`.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns the error's kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Network { .. } => ErrorKind::Network,
            Self::Provider { .. } => ErrorKind::Provider,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Returns the HTTP status for provider errors.
    #[must_use]
    pub const fn provider_status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the offending field for validation errors.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn provider_error_embeds_status_and_reason() {
        let error = ServiceError::Provider {
            provider: Provider::Contentful,
            status: http::StatusCode::NOT_FOUND,
            reason: "Not Found".to_string(),
            body: None,
        };

        assert_eq!(error.to_string(), "Contentful API error: 404 Not Found");
        assert_eq!(error.kind(), ErrorKind::Provider);
        assert_eq!(error.provider_status(), Some(http::StatusCode::NOT_FOUND));
    }

    #[test]
    fn validation_error_displays_message_and_exposes_field() {
        let error = ServiceError::validation("subject", "Email subject is required");

        assert_eq!(error.to_string(), "Email subject is required");
        assert_eq!(error.field(), Some("subject"));
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(error.provider_status().is_none());
    }

    #[test]
    fn network_error_preserves_source() {
        let error = ServiceError::Network {
            provider: Provider::Supabase,
            source: TransportError::Timeout,
        };

        assert_eq!(error.kind(), ErrorKind::Network);
        assert!(error.to_string().contains("Supabase"));
        assert_eq!(error.source().unwrap().to_string(), "Request timed out");
    }

    #[test]
    fn configuration_error_converts_via_from() {
        let error: ServiceError = ConfigError::MissingVariables {
            provider: Provider::Resend,
            variables: vec!["RESEND_API_KEY"],
        }
        .into();

        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert!(error.to_string().contains("RESEND_API_KEY"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ServiceError>();
    }
}
