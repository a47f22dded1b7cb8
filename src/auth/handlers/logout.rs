/**
 * Logout Handler
 *
 * This module implements the session revocation handler for
 * POST /api/auth/logout. The presented token's session row is marked
 * revoked, so the token stops working even though its signature and
 * expiry remain valid.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::auth::handlers::types::MessageResponse;
use crate::auth::sessions::revoke_session;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Logout handler
///
/// Requires authentication; revokes the session named by the token's
/// `jti` claim.
pub async fn logout(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        ApiError::service_unavailable("Database not configured")
    })?;

    revoke_session(&pool, user.jti).await?;

    tracing::info!("Session revoked for user: {}", user.email);

    Ok(Json(MessageResponse::new("Logged out")))
}
