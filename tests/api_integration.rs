//! API integration tests
//!
//! Route-level tests driven through `axum_test::TestServer`. These run
//! without external services: the database pool is absent (handlers that
//! need it answer 503) and email goes to a recording transport.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use sitepanel::email::{Mailer, RecordingTransport};
use sitepanel::routes::router::create_router;
use sitepanel::server::config::{MailConfig, MediaConfig};
use sitepanel::server::state::AppState;

fn mail_config() -> MailConfig {
    MailConfig {
        smtp_host: "localhost".to_string(),
        smtp_port: 25,
        smtp_starttls: false,
        smtp_username: None,
        smtp_password: None,
        from_address: "no-reply@sitepanel.local".to_string(),
        template_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/templates").into(),
    }
}

fn test_server(media: MediaConfig) -> TestServer {
    let transport = Arc::new(RecordingTransport::new());
    let mailer = Mailer::with_transport(&mail_config(), transport).unwrap();
    let state = AppState {
        db_pool: None,
        mailer: Arc::new(mailer),
    };
    TestServer::new(create_router(state, &media)).unwrap()
}

fn default_server() -> TestServer {
    test_server(MediaConfig {
        debug: false,
        media_root: "media".into(),
    })
}

#[tokio::test]
async fn docs_endpoint_describes_routes() {
    let server = default_server();

    let response = server.get("/api/docs").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let endpoints = body["endpoints"].as_array().unwrap();
    let paths: Vec<&str> = endpoints
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"/api/auth/register"));
    assert!(paths.contains(&"/api/auth/forgot_password"));
    assert!(paths.contains(&"/api/auth/manage_profile"));
}

#[tokio::test]
async fn database_backed_routes_answer_503_without_pool() {
    let server = default_server();

    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": "a@b.com", "password": "password123" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let register = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "password123",
        }))
        .await;
    assert_eq!(register.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let forgot = server
        .post("/api/auth/forgot_password")
        .json(&json!({ "email": "a@b.com" }))
        .await;
    assert_eq!(forgot.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn register_validation_runs_before_database_access() {
    let server = default_server();

    let short_password = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "short",
        }))
        .await;
    assert_eq!(short_password.status_code(), StatusCode::BAD_REQUEST);

    let missing_password = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
        }))
        .await;
    assert_eq!(missing_password.status_code(), StatusCode::BAD_REQUEST);

    let bad_email = server
        .post("/api/auth/register")
        .json(&json!({
            "username": "alice",
            "email": "not-an-address",
            "password": "password123",
        }))
        .await;
    assert_eq!(bad_email.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn error_responses_are_json() {
    let server = default_server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "a@b.com", "password": "password123" }))
        .await;

    let body: Value = response.json();
    assert_eq!(body["status"], 503);
    assert!(body["error"].as_str().unwrap().contains("Database"));
}

#[tokio::test]
async fn protected_routes_require_authentication() {
    let server = default_server();

    let no_header = server.post("/api/auth/logout").await;
    assert_eq!(no_header.status_code(), StatusCode::UNAUTHORIZED);

    let bad_scheme = server
        .get("/api/auth/manage_profile")
        .add_header(
            HeaderName::from_static("authorization"),
            HeaderValue::from_static("Token abc"),
        )
        .await;
    assert_eq!(bad_scheme.status_code(), StatusCode::UNAUTHORIZED);

    let bad_token = server
        .post("/api/auth/reset_password")
        .add_header(
            HeaderName::from_static("authorization"),
            HeaderValue::from_static("Bearer not.a.token"),
        )
        .json(&json!({
            "current_password": "old",
            "new_password": "new-password",
        }))
        .await;
    assert_eq!(bad_token.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_routes_fall_through_to_404() {
    let server = default_server();

    let response = server.get("/api/no_such_route").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn media_not_served_outside_debug_mode() {
    let server = default_server();

    let response = server.get("/media/logo.txt").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn media_served_in_debug_mode() {
    let media_dir = tempfile::tempdir().unwrap();
    std::fs::write(media_dir.path().join("logo.txt"), "logo-bytes").unwrap();

    let server = test_server(MediaConfig {
        debug: true,
        media_root: media_dir.path().to_path_buf(),
    });

    let response = server.get("/media/logo.txt").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "logo-bytes");
}
