/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Public API routes (register, login, token flows)
 * 2. Protected API routes (logout, reset_password, manage_profile),
 *    behind the auth middleware
 * 3. Documentation endpoint
 * 4. Media files (debug mode only)
 * 5. Fallback handler (404)
 */

use axum::http::StatusCode;
use axum::Router;
use tower_http::services::ServeDir;

use crate::middleware::auth::auth_middleware;
use crate::routes::api_routes::{configure_api_routes, configure_protected_routes};
use crate::routes::docs::api_docs;
use crate::server::config::MediaConfig;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (database pool, mailer)
/// * `media` - Media-serving settings; files are only served in debug mode
pub fn create_router(app_state: AppState, media: &MediaConfig) -> Router<()> {
    // Public API routes
    let router = configure_api_routes(Router::new());

    // Protected routes sit behind the auth middleware
    let protected = configure_protected_routes().route_layer(
        axum::middleware::from_fn_with_state(app_state.clone(), auth_middleware),
    );
    let router = router.merge(protected);

    // Documentation endpoint
    let router = router.route("/api/docs", axum::routing::get(api_docs));

    // Media files are served by this process only in debug mode
    let router = if media.debug {
        router.nest_service("/media", ServeDir::new(&media.media_root))
    } else {
        router
    };

    // Fallback handler; the status must be set explicitly or axum answers 200
    let router = router.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    router.with_state(app_state)
}
