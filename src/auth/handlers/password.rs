/**
 * Password Handlers
 *
 * This module implements the three password flows:
 *
 * - `forgot_password` - POST /api/auth/forgot_password: issue a reset
 *   token and send the forgot-password mail
 * - `confirm_password` - POST /api/auth/confirm_password: redeem a reset
 *   token for a new password
 * - `reset_password` - POST /api/auth/reset_password: authenticated
 *   password change requiring the current password
 *
 * # Security
 *
 * - `forgot_password` answers 200 whether or not the address is known, so
 *   the endpoint cannot be used to probe for accounts
 * - Redeeming a reset token revokes every live session for the user
 * - Reset tokens are single-use and expire after one hour
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, verify, DEFAULT_COST};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::handlers::types::{
    ConfirmPasswordRequest, ForgotPasswordRequest, MessageResponse, ResetPasswordRequest,
};
use crate::auth::sessions::revoke_sessions_for_user;
use crate::auth::tokens::{self, TokenKind};
use crate::auth::users::{get_user_by_email, get_user_by_id, update_password};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

/// Uniform response for forgot_password, known address or not
const FORGOT_PASSWORD_DETAIL: &str =
    "If the address is registered, a password reset mail has been sent";

/// Forgot-password handler
///
/// Issues a reset token and mails it to the user. Unknown addresses get
/// the same 200 response without a mail; transport failures for known
/// addresses still propagate as errors.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let pool = state.db_pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        ApiError::service_unavailable("Database not configured")
    })?;
    tracing::info!("Forgot-password request for: {}", request.email);

    let user = match get_user_by_email(&pool, &request.email).await? {
        Some(user) => user,
        None => {
            tracing::info!("Forgot-password for unknown address: {}", request.email);
            return Ok(Json(MessageResponse::new(FORGOT_PASSWORD_DETAIL)));
        }
    };

    let reset = tokens::issue(&pool, user.id, TokenKind::ResetPassword).await?;

    let context = json!({
        "subject": "Reset your Sitepanel password",
        "username": user.username,
        "reset_token": reset.token.to_string(),
    });

    state
        .mailer
        .send_forgot_password_mail(&user.email, &context)
        .await?;

    Ok(Json(MessageResponse::new(FORGOT_PASSWORD_DETAIL)))
}

/// Confirm-password handler
///
/// Redeems a reset token for a new password hash and revokes the user's
/// existing sessions.
///
/// # Errors
///
/// * `400 Bad Request` - Malformed, unknown, expired, or consumed token;
///   new password too short
pub async fn confirm_password(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<ConfirmPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        ApiError::service_unavailable("Database not configured")
    })?;

    if request.new_password.len() < 8 {
        return Err(ApiError::bad_request(
            "Password must be at least 8 characters",
        ));
    }

    let token = Uuid::parse_str(&request.token)
        .map_err(|_| ApiError::bad_request("Invalid or expired token"))?;

    let user_id = tokens::consume(&pool, token, TokenKind::ResetPassword)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Reset token rejected: {}", token);
            ApiError::bad_request("Invalid or expired token")
        })?;

    let password_hash = hash(&request.new_password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        ApiError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;

    update_password(&pool, user_id, password_hash).await?;

    // A reset usually means the old credentials are suspect
    let revoked = revoke_sessions_for_user(&pool, user_id).await?;
    tracing::info!(
        "Password reset for user {}; {} session(s) revoked",
        user_id,
        revoked
    );

    Ok(Json(MessageResponse::new("Password has been reset")))
}

/// Authenticated password change
///
/// # Errors
///
/// * `401 Unauthorized` - Current password does not match
/// * `400 Bad Request` - New password too short
pub async fn reset_password(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        ApiError::service_unavailable("Database not configured")
    })?;

    if request.new_password.len() < 8 {
        return Err(ApiError::bad_request(
            "Password must be at least 8 characters",
        ));
    }

    let account = get_user_by_id(&pool, user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let valid = verify(&request.current_password, &account.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        ApiError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;

    if !valid {
        tracing::warn!("Password change rejected for user: {}", account.email);
        return Err(ApiError::unauthorized("Current password is incorrect"));
    }

    let password_hash = hash(&request.new_password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        ApiError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;

    update_password(&pool, account.id, password_hash).await?;

    tracing::info!("Password changed for user: {}", account.email);

    Ok(Json(MessageResponse::new("Password updated")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_confirm_password_no_database() {
        let request = ConfirmPasswordRequest {
            token: Uuid::new_v4().to_string(),
            new_password: "a-long-enough-password".to_string(),
        };

        let result = confirm_password(State(None), Json(request)).await;
        assert_eq!(
            result.unwrap_err().status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
