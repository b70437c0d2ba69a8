//! Client error types.

use paygate_core::NormalizeError;

use crate::types::ErrorResponse;

/// Errors that can occur when using the paygate client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials were rejected.
    #[error("authentication failed (HTTP {status})")]
    Authentication {
        /// HTTP status code.
        status: u16,
    },

    /// Credentials are valid but lack permission for the operation.
    #[error("not authorized (HTTP {status})")]
    Authorization {
        /// HTTP status code.
        status: u16,
    },

    /// The requested resource does not exist.
    #[error("not found: {message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// The gateway rejected the request parameters.
    #[error("validation failed: {0}")]
    Validation(ErrorResponse),

    /// Server returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The response body could not be normalized.
    #[error("normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// The response was well-formed but not what the operation expects.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// An argument was rejected before any request was made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Whether this error means the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The gateway's validation details, if this is a validation failure.
    #[must_use]
    pub const fn error_response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Validation(response) => Some(response),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValidationError;

    #[test]
    fn validation_display_uses_message() {
        let err = ClientError::Validation(ErrorResponse {
            message: "Email is an invalid format.".to_string(),
            errors: vec![ValidationError {
                attribute: "email".to_string(),
                code: "81604".to_string(),
                message: "Email is an invalid format.".to_string(),
            }],
            params: serde_json::Map::new(),
        });

        assert_eq!(err.to_string(), "validation failed: Email is an invalid format.");
        assert_eq!(err.error_response().map(|r| r.errors.len()), Some(1));
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_helper() {
        let err = ClientError::NotFound {
            message: "customer cus_1".to_string(),
        };
        assert!(err.is_not_found());
        assert!(err.error_response().is_none());
    }
}
