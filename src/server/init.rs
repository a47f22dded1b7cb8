/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: configuration loading, state creation, and route assembly.
 *
 * # Initialization Process
 *
 * 1. Load the optional database pool (runs migrations when available)
 * 2. Load mail configuration and build the mailer
 * 3. Load media/debug configuration
 * 4. Create and configure the router
 *
 * A missing database does not prevent startup; handlers that need it
 * answer 503. A mailer that cannot be constructed (unparseable sender
 * address, bad relay host) is a hard startup error, since every
 * notification flow depends on it.
 */

use std::sync::Arc;

use axum::Router;

use crate::email::{EmailError, Mailer};
use crate::routes::router::create_router;
use crate::server::config::{load_database, MailConfig, MediaConfig};
use crate::server::state::AppState;

/// Create and configure the Axum application
pub async fn create_app() -> Result<Router<()>, EmailError> {
    tracing::info!("Initializing sitepanel backend server");

    // Step 1: Load optional services
    let db_pool = load_database().await;

    // Step 2: Build the mailer from its explicit configuration
    let mail_config = MailConfig::from_env();
    let mailer = Arc::new(Mailer::new(&mail_config)?);
    tracing::info!(
        host = %mail_config.smtp_host,
        from = %mail_config.from_address,
        "Mailer configured"
    );

    // Step 3: Media serving settings (debug only)
    let media_config = MediaConfig::from_env();
    if media_config.debug {
        tracing::warn!(
            root = %media_config.media_root.display(),
            "Debug mode: serving media files from this process"
        );
    }

    // Step 4: Create app state and router
    let app_state = AppState { db_pool, mailer };
    let app = create_router(app_state, &media_config);

    tracing::info!("Router configured");

    Ok(app)
}
