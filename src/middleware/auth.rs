/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header, checks that the session has not been revoked,
 * and provides the authenticated user to handlers.
 */

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::sessions::{is_session_live, verify_token};
use crate::server::state::AppState;

/// Authenticated user data extracted from the session token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    /// Session ID; logout revokes by this
    pub jti: Uuid,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT from the Authorization header (`Bearer <token>`)
/// 2. Verifies signature and expiry
/// 3. Checks the session row is live (present, unexpired, not revoked)
/// 4. Attaches `AuthenticatedUser` to request extensions for handlers
///
/// Returns 401 Unauthorized if the token is missing, invalid, or revoked.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            StatusCode::UNAUTHORIZED
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        StatusCode::UNAUTHORIZED
    })?;

    let claims = verify_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        StatusCode::UNAUTHORIZED
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::error!("Invalid user ID in token: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let jti = Uuid::parse_str(&claims.jti).map_err(|e| {
        tracing::error!("Invalid session ID in token: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    // A signed token is not enough; the session must still be live
    if let Some(pool) = &app_state.db_pool {
        match is_session_live(pool, jti).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!("Revoked or expired session: {}", jti);
                return Err(StatusCode::UNAUTHORIZED);
            }
            Err(e) => {
                tracing::error!("Session lookup failed: {:?}", e);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
        jti,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Used as a handler parameter on routes behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                StatusCode::UNAUTHORIZED
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    #[tokio::test]
    async fn test_extractor_with_user() {
        let request = Request::builder().uri("http://example.com").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            jti: Uuid::new_v4(),
        };
        parts.extensions.insert(user.clone());

        let extracted = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted.0.user_id, user.user_id);
        assert_eq!(extracted.0.jti, user.jti);
    }

    #[tokio::test]
    async fn test_extractor_missing_user() {
        let request = Request::builder().uri("http://example.com").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
    }
}
