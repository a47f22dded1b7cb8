/**
 * Email Verification Handler
 *
 * This module implements the handler for POST /api/auth/verify_user.
 * Redeeming the verification token from the welcome mail marks the
 * account's email address as verified.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::handlers::types::{MessageResponse, VerifyUserRequest};
use crate::auth::tokens::{self, TokenKind};
use crate::auth::users::mark_verified;
use crate::error::ApiError;

/// Email verification handler
///
/// # Errors
///
/// * `400 Bad Request` - Malformed, unknown, expired, or consumed token
/// * `503 Service Unavailable` - Database not configured
pub async fn verify_user(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<VerifyUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        ApiError::service_unavailable("Database not configured")
    })?;

    let token = Uuid::parse_str(&request.token)
        .map_err(|_| ApiError::bad_request("Invalid or expired token"))?;

    let user_id = tokens::consume(&pool, token, TokenKind::VerifyEmail)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Verification token rejected: {}", token);
            ApiError::bad_request("Invalid or expired token")
        })?;

    let user = mark_verified(&pool, user_id).await?;

    tracing::info!("Email verified for user: {}", user.email);

    Ok(Json(MessageResponse::new("Email address verified")))
}
