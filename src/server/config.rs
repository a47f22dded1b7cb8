/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration:
 * the optional PostgreSQL database connection, the mail settings, and
 * the debug/media settings.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables, with sensible
 * defaults for local development where possible. The settings are
 * collected into explicit config structs that are passed in at
 * construction time rather than read ambiently at call time.
 *
 * # Error Handling
 *
 * Database configuration errors are logged but do not prevent server
 * startup. Handlers that need the database answer 503 when it is not
 * available.
 */

use std::path::PathBuf;

use sqlx::PgPool;

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Mail settings captured at startup
///
/// Passed into `Mailer::new` at construction; the sender address and
/// template directory are fixed for the life of the process.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP relay hostname
    pub smtp_host: String,
    /// SMTP relay port
    pub smtp_port: u16,
    /// Negotiate STARTTLS with the relay (off for local development)
    pub smtp_starttls: bool,
    /// Optional SMTP username
    pub smtp_username: Option<String>,
    /// Optional SMTP password
    pub smtp_password: Option<String>,
    /// Sender address placed on every outbound message
    pub from_address: String,
    /// Directory that template names are resolved under
    pub template_dir: PathBuf,
}

impl MailConfig {
    /// Load mail settings from the environment
    ///
    /// Reads `SMTP_HOST`, `SMTP_PORT`, `SMTP_STARTTLS`, `SMTP_USERNAME`,
    /// `SMTP_PASSWORD`, `DEFAULT_FROM_EMAIL`, and `TEMPLATE_DIR`.
    pub fn from_env() -> Self {
        Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(25),
            smtp_starttls: std::env::var("SMTP_STARTTLS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            smtp_username: std::env::var("SMTP_USERNAME").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
            from_address: std::env::var("DEFAULT_FROM_EMAIL")
                .unwrap_or_else(|_| "no-reply@sitepanel.local".to_string()),
            template_dir: std::env::var("TEMPLATE_DIR")
                .unwrap_or_else(|_| "templates".to_string())
                .into(),
        }
    }
}

/// Media-serving settings
///
/// Media files are only served by this process in debug mode; in
/// production that job belongs to the front proxy.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Serve `MEDIA_ROOT` under `/media` when true
    pub debug: bool,
    /// Directory media files are served from
    pub media_root: PathBuf,
}

impl MediaConfig {
    /// Load media settings from `DEBUG` and `MEDIA_ROOT`
    pub fn from_env() -> Self {
        Self {
            debug: std::env::var("DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            media_root: std::env::var("MEDIA_ROOT")
                .unwrap_or_else(|_| "media".to_string())
                .into(),
        }
    }
}

/// Load and initialize database connection pool
///
/// This function:
/// 1. Reads `DATABASE_URL` from environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if database is successfully configured
/// - `None` if `DATABASE_URL` is not set or connection fails
///
/// Errors are logged but do not prevent server startup; the server runs
/// without database features and the affected handlers answer 503.
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {:?}", e);
            // Continue anyway - migrations might have already been run
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_config_defaults() {
        // Construct directly; env-var reads are covered by from_env's defaults
        let config = MailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 25,
            smtp_starttls: false,
            smtp_username: None,
            smtp_password: None,
            from_address: "no-reply@sitepanel.local".to_string(),
            template_dir: "templates".into(),
        };
        assert!(!config.smtp_starttls);
        assert_eq!(config.smtp_port, 25);
    }
}
