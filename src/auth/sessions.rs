/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user
 * sessions. Every token carries a `jti` claim that maps to a row in the
 * `sessions` table, so logout and password changes can revoke tokens
 * that would otherwise remain valid until expiry.
 */

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;

/// Session lifetime: 30 days
const SESSION_LIFETIME_SECS: u64 = 30 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Session ID, matches a row in the sessions table
    pub jti: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Get JWT secret from environment
fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set, using development default");
        "your-secret-key-change-in-production".to_string()
    })
}

/// Create a JWT token for a user session
///
/// # Arguments
/// * `user_id` - User ID (UUID)
/// * `email` - User email
/// * `jti` - Session ID recorded in the sessions table
pub fn create_token(
    user_id: Uuid,
    email: String,
    jti: Uuid,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let claims = Claims {
        sub: user_id.to_string(),
        email,
        jti: jti.to_string(),
        exp: now + SESSION_LIFETIME_SECS,
        iat: now,
    };

    let secret = get_jwt_secret();
    let key = EncodingKey::from_secret(secret.as_ref());

    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = get_jwt_secret();
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// Record a new session and return its signed token
///
/// Inserts the session row first so a token is never handed out without
/// its revocation anchor.
pub async fn create_session(
    pool: &PgPool,
    user_id: Uuid,
    email: String,
) -> Result<String, ApiError> {
    let jti = Uuid::new_v4();
    let now = Utc::now();
    let expires_at = now + Duration::seconds(SESSION_LIFETIME_SECS as i64);

    sqlx::query(
        r#"
        INSERT INTO sessions (jti, user_id, created_at, expires_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(jti)
    .bind(user_id)
    .bind(now)
    .bind(expires_at)
    .execute(pool)
    .await?;

    let token = create_token(user_id, email, jti)?;
    Ok(token)
}

/// Check whether a session is live (exists, unexpired, not revoked)
pub async fn is_session_live(pool: &PgPool, jti: Uuid) -> Result<bool, sqlx::Error> {
    let expires_at: Option<DateTime<Utc>> = sqlx::query_scalar(
        r#"
        SELECT expires_at FROM sessions
        WHERE jti = $1 AND revoked_at IS NULL
        "#,
    )
    .bind(jti)
    .fetch_optional(pool)
    .await?;

    Ok(matches!(expires_at, Some(exp) if exp > Utc::now()))
}

/// Revoke a single session
pub async fn revoke_session(pool: &PgPool, jti: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE sessions SET revoked_at = $1
        WHERE jti = $2 AND revoked_at IS NULL
        "#,
    )
    .bind(Utc::now())
    .bind(jti)
    .execute(pool)
    .await?;

    Ok(())
}

/// Revoke every live session for a user
///
/// Used after a password reset so stolen tokens stop working.
pub async fn revoke_sessions_for_user(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE sessions SET revoked_at = $1
        WHERE user_id = $2 AND revoked_at IS NULL
        "#,
    )
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
