//! Server Module
//!
//! Server initialization, environment-driven configuration, and the shared
//! application state handed to Axum.

/// Application assembly
pub mod init;

/// Environment-driven configuration
pub mod config;

/// Shared application state
pub mod state;
