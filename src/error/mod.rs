//! API Error Module
//!
//! This module defines error types for the HTTP layer. Handlers return
//! `ApiError`, which converts into a JSON error response with the
//! appropriate status code.
//!
//! # Error Types
//!
//! - `Handler` - Errors raised directly by HTTP handlers (carry a status)
//! - `Database` - sqlx errors from the persistence layer
//! - `Email` - Rendering, addressing, and transport errors from the mailer
//! - `Token` - JWT encoding/decoding errors
//!
//! None of these are caught within the handlers themselves; they propagate
//! up and are converted into an HTTP failure response at the boundary.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
