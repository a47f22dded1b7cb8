/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the
 * authentication and profile handlers.
 */

use serde::{Deserialize, Serialize};

use crate::auth::users::User;

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// User's chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage); omitted for invites
    pub password: Option<String>,
    /// When true, a temporary password is generated and mailed to the user
    #[serde(default)]
    pub invite: bool,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    /// User's email address
    pub email: String,
    /// User's password (verified against the stored hash)
    pub password: String,
}

/// Forgot-password request
#[derive(Deserialize, Serialize, Debug)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Confirm-password request: redeem a reset token for a new password
#[derive(Deserialize, Serialize, Debug)]
pub struct ConfirmPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Authenticated password change
#[derive(Deserialize, Serialize, Debug)]
pub struct ResetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Email verification request
#[derive(Deserialize, Serialize, Debug)]
pub struct VerifyUserRequest {
    pub token: String,
}

/// Auth response
///
/// Returned by register and login. Contains the session token and user
/// information for immediate authentication.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// JWT session token (30-day expiration)
    pub token: String,
    /// User information (without sensitive data)
    pub user: UserResponse,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_verified: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            is_verified: user.is_verified,
        }
    }
}

/// Profile response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_verified: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            is_verified: user.is_verified,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            avatar_url: user.avatar_url,
        }
    }
}

/// Plain confirmation body for endpoints with nothing else to return
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub detail: String,
}

impl MessageResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
