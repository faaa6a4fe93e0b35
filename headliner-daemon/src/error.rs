//! Error types for the title handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use headliner_core::{ErrorResponse, MISSING_API_KEY_MESSAGE, QUOTA_EXCEEDED_MESSAGE};
use thiserror::Error;

/// Result type alias for handler operations.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Everything that can end a title request without a list of titles.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// No credential is available for the upstream provider.
    #[error("{}", MISSING_API_KEY_MESSAGE)]
    MissingApiKey,

    /// Upstream reported an exhausted billing quota.
    #[error("{}", QUOTA_EXCEEDED_MESSAGE)]
    QuotaExceeded,

    /// Upstream answered with any other non-success status.
    #[error("OpenAI API error: {body}")]
    Upstream {
        /// HTTP status returned by the provider.
        status: u16,
        /// Provider's error body, redacted.
        body: String,
    },

    /// Upstream succeeded but carried no completion text.
    #[error("OpenAI API returned no completion content")]
    EmptyCompletion,

    /// Request body was not valid JSON.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// Network failure or undecodable upstream response.
    #[error("Request to OpenAI API failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl GenerateError {
    /// HTTP status used when this error is returned to a caller.
    ///
    /// Only quota exhaustion is distinguished; everything else is a server error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GenerateError::QuotaExceeded => StatusCode::PAYMENT_REQUIRED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::new(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_is_payment_required() {
        assert_eq!(
            GenerateError::QuotaExceeded.status_code(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            GenerateError::QuotaExceeded.to_string(),
            QUOTA_EXCEEDED_MESSAGE
        );
    }

    #[test]
    fn test_other_errors_are_server_errors() {
        let upstream = GenerateError::Upstream {
            status: 503,
            body: r#"{"error":"overloaded"}"#.to_string(),
        };
        assert_eq!(upstream.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            upstream.to_string(),
            r#"OpenAI API error: {"error":"overloaded"}"#
        );

        assert_eq!(
            GenerateError::MissingApiKey.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GenerateError::MissingApiKey.to_string(),
            "OpenAI API key not configured"
        );
    }
}
