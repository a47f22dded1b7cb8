/**
 * Single-Use Account Tokens
 *
 * This module manages the opaque tokens that are sent to users by email:
 * email-verification tokens and password-reset tokens. A token is a UUID
 * with a kind, an expiry, and a consumed-at marker; consuming is atomic,
 * so a token can only ever be redeemed once.
 */

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// What an account token is good for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Confirms ownership of the registered email address
    VerifyEmail,
    /// Authorizes setting a new password without the old one
    ResetPassword,
}

impl TokenKind {
    /// Stable string stored in the `kind` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VerifyEmail => "verify_email",
            Self::ResetPassword => "reset_password",
        }
    }

    /// How long tokens of this kind stay redeemable
    ///
    /// Reset tokens are short-lived; verification tokens get a few days
    /// since people open welcome mail late.
    pub fn lifetime(&self) -> Duration {
        match self {
            Self::VerifyEmail => Duration::days(3),
            Self::ResetPassword => Duration::hours(1),
        }
    }
}

/// An issued account token
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountToken {
    pub token: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
}

/// Issue a fresh token for a user
pub async fn issue(
    pool: &PgPool,
    user_id: Uuid,
    kind: TokenKind,
) -> Result<AccountToken, sqlx::Error> {
    let token = Uuid::new_v4();
    let now = Utc::now();
    let expires_at = now + kind.lifetime();

    let issued = sqlx::query_as::<_, AccountToken>(
        r#"
        INSERT INTO account_tokens (token, user_id, kind, created_at, expires_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING token, user_id, kind, created_at, expires_at, consumed_at
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(kind.as_str())
    .bind(now)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(issued)
}

/// Consume a token, returning the user it belongs to
///
/// Returns `None` when the token is unknown, the wrong kind, expired, or
/// already consumed. The update is a single statement, so concurrent
/// redemption attempts cannot both succeed.
pub async fn consume(
    pool: &PgPool,
    token: Uuid,
    kind: TokenKind,
) -> Result<Option<Uuid>, sqlx::Error> {
    let now = Utc::now();

    let user_id: Option<Uuid> = sqlx::query_scalar(
        r#"
        UPDATE account_tokens
        SET consumed_at = $1
        WHERE token = $2
          AND kind = $3
          AND consumed_at IS NULL
          AND expires_at > $1
        RETURNING user_id
        "#,
    )
    .bind(now)
    .bind(token)
    .bind(kind.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strings() {
        assert_eq!(TokenKind::VerifyEmail.as_str(), "verify_email");
        assert_eq!(TokenKind::ResetPassword.as_str(), "reset_password");
    }

    #[test]
    fn test_reset_tokens_are_short_lived() {
        assert!(TokenKind::ResetPassword.lifetime() < TokenKind::VerifyEmail.lifetime());
        assert_eq!(TokenKind::ResetPassword.lifetime(), Duration::hours(1));
    }
}
