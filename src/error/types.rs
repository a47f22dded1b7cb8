/**
 * API Error Types
 *
 * This module defines the error type used by HTTP handlers. Each variant
 * carries enough context to produce an HTTP response, and lower-level
 * errors (database, email, token) convert in via `From`.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::email::EmailError;

/// Errors that can occur while serving an API request
///
/// Handlers return this type directly; the `IntoResponse` implementation
/// in `conversion` turns it into a JSON error body with a status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Handler error (e.g., validation failure, missing resource)
    #[error("{message}")]
    Handler {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Database error from the persistence layer
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Email rendering or delivery error
    #[error(transparent)]
    Email(#[from] EmailError),

    /// JWT encoding or decoding error
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl ApiError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Handler {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// 401 Unauthorized
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// 409 Conflict
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// 503 Service Unavailable (database not configured)
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Handler` - Uses the status code from the error
    /// - `Database` - 500 Internal Server Error
    /// - `Email` - 502 Bad Gateway for transport failures, 400 for invalid
    ///   addresses, 500 for template errors
    /// - `Token` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Handler { status, .. } => *status,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Email(err) => match err {
                EmailError::Transport(_) => StatusCode::BAD_GATEWAY,
                EmailError::Address(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::Handler { message, .. } => message.clone(),
            Self::Database(err) => err.to_string(),
            Self::Email(err) => err.to_string(),
            Self::Token(err) => err.to_string(),
        }
    }
}
