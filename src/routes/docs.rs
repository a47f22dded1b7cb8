/**
 * Documentation Endpoint
 *
 * GET /api/docs returns a machine-readable description of the API
 * surface, standing in for the interactive schema browser of the
 * original deployment.
 */

use axum::response::Json;

/// Describe the API surface
pub async fn api_docs() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "sitepanel",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            { "path": "/api/auth/register",         "methods": ["POST"],       "auth": false },
            { "path": "/api/auth/login",            "methods": ["POST"],       "auth": false },
            { "path": "/api/auth/logout",           "methods": ["POST"],       "auth": true  },
            { "path": "/api/auth/forgot_password",  "methods": ["POST"],       "auth": false },
            { "path": "/api/auth/confirm_password", "methods": ["POST"],       "auth": false },
            { "path": "/api/auth/verify_user",      "methods": ["POST"],       "auth": false },
            { "path": "/api/auth/reset_password",   "methods": ["POST"],       "auth": true  },
            { "path": "/api/auth/manage_profile",   "methods": ["GET", "PUT"], "auth": true  },
        ],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_docs_lists_auth_routes() {
        let Json(body) = api_docs().await;
        let endpoints = body["endpoints"].as_array().unwrap();
        assert!(endpoints
            .iter()
            .any(|e| e["path"] == "/api/auth/register"));
        assert!(endpoints
            .iter()
            .any(|e| e["path"] == "/api/auth/manage_profile"));
    }
}
