//! Middleware Module
//!
//! Request middleware for the HTTP layer.

/// Bearer-token authentication middleware and extractor
pub mod auth;
