/**
 * API Route Handlers
 *
 * This module defines the route table for the API endpoints, mirroring
 * the service's URL surface:
 *
 * ## Public
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 * - `POST /api/auth/forgot_password` - Request a reset mail
 * - `POST /api/auth/confirm_password` - Redeem a reset token
 * - `POST /api/auth/verify_user` - Redeem a verification token
 *
 * ## Protected (require `Authorization: Bearer <token>`)
 * - `POST /api/auth/logout` - Revoke the session
 * - `POST /api/auth/reset_password` - Authenticated password change
 * - `GET/PUT /api/auth/manage_profile` - Read/update the profile
 */

use axum::Router;

use crate::auth::{
    confirm_password, forgot_password, get_profile, login, logout, register, reset_password,
    update_profile, verify_user,
};
use crate::server::state::AppState;

/// Configure public API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/register", axum::routing::post(register))
        .route("/api/auth/login", axum::routing::post(login))
        .route(
            "/api/auth/forgot_password",
            axum::routing::post(forgot_password),
        )
        .route(
            "/api/auth/confirm_password",
            axum::routing::post(confirm_password),
        )
        .route("/api/auth/verify_user", axum::routing::post(verify_user))
}

/// Configure routes that require authentication
///
/// The auth middleware is layered on by the caller so the `AppState`
/// instance is available for `from_fn_with_state`.
pub fn configure_protected_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/logout", axum::routing::post(logout))
        .route(
            "/api/auth/reset_password",
            axum::routing::post(reset_password),
        )
        .route(
            "/api/auth/manage_profile",
            axum::routing::get(get_profile).put(update_profile),
        )
}
