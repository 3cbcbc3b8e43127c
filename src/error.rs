//! Error types and handling.

use reqwest::StatusCode;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport failure (connection refused, DNS, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// Response body was not the JSON we expected
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Client-side form validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation abandoned because its panel was closed
    #[error("Operation cancelled")]
    Cancelled,
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create an API error from a status and the response body text.
    ///
    /// An empty body falls back to a generic status message.
    pub fn api(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.trim().is_empty() {
            format!("HTTP error! status: {}", status.as_u16())
        } else {
            body
        };
        Self::Api { status, message }
    }

    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status of a backend rejection, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// The backend signals domain conflicts (duplicate date, duplicate email) with 400.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::BAD_REQUEST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_uses_body_text() {
        let err = AppError::api(StatusCode::NOT_FOUND, "Turma não encontrada");
        assert_eq!(err.to_string(), "Turma não encontrada");
    }

    #[test]
    fn test_api_error_empty_body_falls_back_to_status() {
        let err = AppError::api(StatusCode::INTERNAL_SERVER_ERROR, "  ");
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn test_conflict_detection() {
        assert!(AppError::api(StatusCode::BAD_REQUEST, "dup").is_conflict());
        assert!(!AppError::api(StatusCode::CONFLICT, "dup").is_conflict());
        assert!(!AppError::validation("x").is_conflict());
    }
}
