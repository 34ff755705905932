//! Shared helpers for server integration tests.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use pocketledger_server::{api::app_router, build_state, config::Config};

pub fn test_config(db_path: String) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path,
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
        jwt_secret: vec![7u8; 32],
        token_ttl: Duration::from_secs(3600),
    }
}

pub async fn build_test_router() -> (TempDir, Router) {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("test.db").to_string_lossy().to_string();
    let config = test_config(db_path);
    let state = build_state(&config).await.unwrap();
    (tmp, app_router(state, &config))
}

pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<axum::body::Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers a user and returns their bearer token.
pub async fn register_user(app: &Router, email: &str) -> String {
    let response = request(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(serde_json::json!({
            "name": "Test User",
            "email": email,
            "password": "Passw0rd",
        })),
    )
    .await;
    assert_eq!(response.status(), 201);
    let body = read_json(response).await;
    body["data"]["token"].as_str().unwrap().to_string()
}
