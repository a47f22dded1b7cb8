/**
 * Profile Handlers
 *
 * This module implements GET and PUT for /api/auth/manage_profile.
 * Both require authentication and operate on the session user; there is
 * no path parameter, so users can only ever touch their own profile.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::auth::handlers::types::ProfileResponse;
use crate::auth::users::{get_user_by_id, update_profile as apply_profile_update, ProfileUpdate};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Get the session user's profile
pub async fn get_profile(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        ApiError::service_unavailable("Database not configured")
    })?;

    let account = get_user_by_id(&pool, user.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", user.user_id);
            ApiError::not_found("User not found")
        })?;

    Ok(Json(account.into()))
}

/// Update the session user's profile
///
/// Accepts a partial update; fields absent from the body keep their
/// current values.
pub async fn update_profile(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        ApiError::service_unavailable("Database not configured")
    })?;

    let account = apply_profile_update(&pool, user.user_id, update).await?;

    tracing::info!("Profile updated for user: {}", account.email);

    Ok(Json(account.into()))
}
