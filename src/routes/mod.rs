//! Routes Module
//!
//! Router assembly for the HTTP layer.

/// Main router creation
pub mod router;

/// API route table
pub mod api_routes;

/// Documentation endpoint
pub mod docs;
