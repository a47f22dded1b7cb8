//! Sitepanel - Main Library
//!
//! Sitepanel is a thin web backend providing user authentication, profile
//! management, and transactional email notifications.
//!
//! # Module Structure
//!
//! The library is organized into focused modules:
//!
//! - **`server`** - Server initialization, configuration, and shared state
//! - **`routes`** - Router assembly and the API route table
//! - **`auth`** - User model, session tokens, account tokens, and HTTP handlers
//! - **`middleware`** - Bearer-token authentication middleware
//! - **`email`** - Template rendering, message dispatch, and the notification
//!   entry points (forgot-password, welcome, welcome-with-temporary-password)
//! - **`error`** - API error types and HTTP response conversion
//!
//! # Architecture
//!
//! The server is an Axum application backed by PostgreSQL (via sqlx) for
//! users, sessions, and single-use account tokens. Outbound email is rendered
//! from HTML templates and handed to an SMTP transport; the transport sits
//! behind a trait so tests can record messages instead of delivering them.

/// Server initialization, configuration, and shared state
pub mod server;

/// Router assembly and API route table
pub mod routes;

/// Authentication: users, sessions, account tokens, handlers
pub mod auth;

/// Bearer-token authentication middleware
pub mod middleware;

/// Email rendering, dispatch, and notification entry points
pub mod email;

/// API error types and response conversion
pub mod error;
