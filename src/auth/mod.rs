//! Authentication Module
//!
//! This module handles user accounts, session management, and the
//! password-reset / email-verification flows.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT session tokens backed by a sessions table
//! ├── tokens.rs       - Single-use account tokens (verify email, reset password)
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Flows
//!
//! 1. **Register**: validate input → create user → issue verification token
//!    → send welcome mail → return JWT
//! 2. **Login**: verify bcrypt hash → create session → return JWT
//! 3. **Logout**: revoke the presented session
//! 4. **Forgot/confirm password**: issue reset token by mail, then consume
//!    it to set a new hash and revoke existing sessions
//! 5. **Verify user**: consume a verification token, mark the account verified
//! 6. **Manage profile**: read/update profile fields for the session user
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage and never returned
//! - JWTs expire after 30 days and carry a `jti` so sessions can be revoked
//! - Invalid credentials and unknown reset addresses answer uniformly
//!   (no account enumeration)

/// User data model and database operations
pub mod users;

/// JWT session tokens and revocation
pub mod sessions;

/// Single-use account tokens
pub mod tokens;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
pub use handlers::{
    confirm_password, forgot_password, get_profile, login, logout, register, reset_password,
    update_profile, verify_user,
};
