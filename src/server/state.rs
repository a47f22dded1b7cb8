/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container for the
 * application, holding:
 * - The optional database connection pool
 * - The shared mailer
 *
 * # Thread Safety
 *
 * Both fields are cheap to clone and safe to share: `PgPool` is an
 * internally reference-counted pool, and the mailer is behind an `Arc`
 * and never mutated after construction.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::email::Mailer;

/// Application state for the Axum router
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// This is `None` if the database is not configured (e.g., if the
    /// `DATABASE_URL` environment variable is not set). Handlers answer
    /// 503 when they need the database and it is absent.
    pub db_pool: Option<PgPool>,

    /// Shared mailer for transactional email
    ///
    /// Holds the template renderer, the delivery transport, and the
    /// configured sender address.
    pub mailer: Arc<Mailer>,
}

/// Allow handlers to extract the optional database pool directly
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Allow handlers to extract the mailer directly
impl FromRef<AppState> for Arc<Mailer> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.mailer.clone()
    }
}
