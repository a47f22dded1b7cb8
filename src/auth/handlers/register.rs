/**
 * Registration Handler
 *
 * This module implements the user registration handler for
 * POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate username, email format, and password length
 * 2. Reject duplicate usernames and email addresses
 * 3. Hash the password using bcrypt
 * 4. Create the user (unverified) and issue a verification token
 * 5. Send the welcome mail carrying the verification token
 * 6. Create a session and return the JWT with the user info
 *
 * # Invites
 *
 * With `invite: true` no password is taken from the request; a temporary
 * password is generated and the welcome-with-temporary-password mail is
 * sent instead of the plain welcome mail.
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with DEFAULT_COST
 * - Passwords are never returned in responses
 */

use axum::{extract::State, response::Json};
use bcrypt::{hash, DEFAULT_COST};
use serde_json::json;
use uuid::Uuid;

use crate::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::auth::sessions::create_session;
use crate::auth::tokens::{self, TokenKind};
use crate::auth::users::{create_user, get_user_by_email, get_user_by_username};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid username, email, or password
/// * `409 Conflict` - Username or email already registered
/// * `503 Service Unavailable` - Database not configured
/// * `500 / 502` - Hashing, database, or email failures
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!(
        "Register request for username: {}, email: {}",
        request.username,
        request.email
    );

    // Input validation needs no database; run it before the pool check
    if !is_valid_username(&request.username) {
        tracing::warn!("Invalid username format: {}", request.username);
        return Err(ApiError::bad_request(
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    // Basic email format check; the mailer rejects anything unparseable
    if !request.email.contains('@') {
        tracing::warn!("Invalid email format: {}", request.email);
        return Err(ApiError::bad_request("Invalid email format"));
    }

    // An invite generates a temporary password; self-registration supplies one
    let (password, temporary_password) = if request.invite {
        let generated = Uuid::new_v4().simple().to_string();
        (generated.clone(), Some(generated))
    } else {
        let password = request
            .password
            .ok_or_else(|| ApiError::bad_request("Password is required"))?;
        if password.len() < 8 {
            tracing::warn!("Password too short");
            return Err(ApiError::bad_request(
                "Password must be at least 8 characters",
            ));
        }
        (password, None)
    };

    let pool = state.db_pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        ApiError::service_unavailable("Database not configured")
    })?;

    if get_user_by_username(&pool, &request.username).await?.is_some() {
        tracing::warn!("Username already exists: {}", request.username);
        return Err(ApiError::conflict("Username already taken"));
    }

    if get_user_by_email(&pool, &request.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", request.email);
        return Err(ApiError::conflict("Email already registered"));
    }

    let password_hash = hash(&password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        ApiError::handler(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "Server error",
        )
    })?;

    let user = create_user(&pool, request.username.clone(), request.email.clone(), password_hash)
        .await?;

    // Verification happens out of band, through the token in the welcome mail
    let verification = tokens::issue(&pool, user.id, TokenKind::VerifyEmail).await?;

    let mut context = json!({
        "subject": "Welcome to Sitepanel",
        "username": user.username,
        "verify_token": verification.token.to_string(),
    });

    if let Some(temp) = temporary_password {
        context["temporary_password"] = json!(temp);
        state
            .mailer
            .send_welcome_mail_with_password(&user.email, &context)
            .await?;
    } else {
        state.mailer.send_welcome_mail(&user.email, &context).await?;
    }

    let token = create_session(&pool, user.id, user.email.clone()).await?;

    tracing::info!("User created successfully: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::{Mailer, RecordingTransport};
    use crate::server::config::MailConfig;
    use std::sync::Arc;

    #[test]
    fn test_valid_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("alice_b"));
        assert!(is_valid_username("a1_"));
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("1alice"));
        assert!(!is_valid_username("_alice"));
        assert!(!is_valid_username("alice!"));
        assert!(!is_valid_username(&"a".repeat(31)));
    }

    fn state_without_database() -> AppState {
        let config = MailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 25,
            smtp_starttls: false,
            smtp_username: None,
            smtp_password: None,
            from_address: "no-reply@sitepanel.local".to_string(),
            template_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/templates").into(),
        };
        let transport = Arc::new(RecordingTransport::new());
        AppState {
            db_pool: None,
            mailer: Arc::new(Mailer::with_transport(&config, transport).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_register_no_database() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: Some("password123".to_string()),
            invite: false,
        };

        let result = register(State(state_without_database()), Json(request)).await;
        assert_eq!(
            result.unwrap_err().status_code(),
            axum::http::StatusCode::SERVICE_UNAVAILABLE
        );
    }

    async fn register_status(request: RegisterRequest) -> axum::http::StatusCode {
        register(State(state_without_database()), Json(request))
            .await
            .unwrap_err()
            .status_code()
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: Some("short".to_string()),
            invite: false,
        };

        assert_eq!(
            register_status(request).await,
            axum::http::StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_register_requires_password_without_invite() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: None,
            invite: false,
        };

        assert_eq!(
            register_status(request).await,
            axum::http::StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_register_rejects_bad_email() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "not-an-address".to_string(),
            password: Some("password123".to_string()),
            invite: false,
        };

        assert_eq!(
            register_status(request).await,
            axum::http::StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_register_rejects_bad_username() {
        let request = RegisterRequest {
            username: "1alice".to_string(),
            email: "alice@example.com".to_string(),
            password: Some("password123".to_string()),
            invite: false,
        };

        assert_eq!(
            register_status(request).await,
            axum::http::StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_invite_needs_no_password() {
        // With invite set, missing password passes validation; the next
        // stop is the pool check, so an absent database answers 503
        let request = RegisterRequest {
            username: "invitee".to_string(),
            email: "invitee@example.com".to_string(),
            password: None,
            invite: true,
        };

        assert_eq!(
            register_status(request).await,
            axum::http::StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
