//! Client-side API errors
//!
//! Every failure a page or command can see is one of these. None of them is
//! fatal: callers turn them into a notification and stay interactive.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ValidationError;

/// Fallback when an error response carries no message
pub const FALLBACK_MESSAGE: &str = "Something went wrong.";

/// Shown when the server cannot be reached at all
pub const NETWORK_MESSAGE: &str = "Could not connect to the server.";

/// Error response body: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// API client errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never produced a response (DNS, refused, CORS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// 401: missing, expired or rejected credentials
    #[error("{0}")]
    Unauthorized(String),

    /// 403: e.g. an account still pending approval, or a non-admin token
    #[error("{0}")]
    Forbidden(String),

    /// Any other non-2xx response
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// 2xx response whose body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// An authenticated call was attempted without a session
    #[error("Not logged in")]
    NotAuthenticated,

    /// Form input rejected before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// Build the error for a non-2xx response from its status and raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

        match status {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            _ => ApiError::Status { status, message },
        }
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for a notification body
    pub fn message(&self) -> String {
        match self {
            ApiError::Network(_) => NETWORK_MESSAGE.to_string(),
            ApiError::Unauthorized(message) | ApiError::Forbidden(message) => message.clone(),
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// The session should be dropped and the user sent back to login
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::NotAuthenticated)
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_uses_error_body() {
        let err = ApiError::from_response(403, r#"{"error": "Your account is pending approval."}"#);
        assert_eq!(err, ApiError::Forbidden("Your account is pending approval.".to_string()));
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.message(), "Your account is pending approval.");
    }

    #[test]
    fn test_from_response_falls_back() {
        let err = ApiError::from_response(500, "<html>oops</html>");
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                message: FALLBACK_MESSAGE.to_string()
            }
        );
        assert_eq!(err.to_string(), "Something went wrong. (HTTP 500)");

        let err = ApiError::from_response(401, r#"{"error": ""}"#);
        assert_eq!(err, ApiError::Unauthorized(FALLBACK_MESSAGE.to_string()));
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_validation_passthrough() {
        let err: ApiError = ValidationError::PasswordMismatch.into();
        assert_eq!(err.message(), "Passwords do not match.");
        assert_eq!(err.status(), None);
    }
}
