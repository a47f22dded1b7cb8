//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for the authentication and
//! profile endpoints.
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`logout`** - POST /api/auth/logout - Session revocation
//! - **`forgot_password`** - POST /api/auth/forgot_password - Reset mail
//! - **`confirm_password`** - POST /api/auth/confirm_password - Redeem reset token
//! - **`reset_password`** - POST /api/auth/reset_password - Authenticated change
//! - **`verify_user`** - POST /api/auth/verify_user - Redeem verification token
//! - **`get_profile` / `update_profile`** - GET/PUT /api/auth/manage_profile

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Forgot / confirm / reset password handlers
pub mod password;

/// Email verification handler
pub mod verify;

/// Profile handlers
pub mod profile;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

// Re-export handlers
pub use login::login;
pub use logout::logout;
pub use password::{confirm_password, forgot_password, reset_password};
pub use profile::{get_profile, update_profile};
pub use register::register;
pub use verify::verify_user;
