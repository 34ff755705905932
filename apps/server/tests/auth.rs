//! Registration, login, and account lifecycle through the HTTP surface.

mod common;

use axum::http::Method;
use serde_json::json;

use common::{build_test_router, read_json, register_user, request};

#[tokio::test]
async fn register_login_and_access_protected_route() {
    let (_tmp, app) = build_test_router().await;

    // Protected route without a token fails
    let response = request(&app, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(response.status(), 401);

    let token = register_user(&app, "avery@example.com").await;

    // Same route with the registration token succeeds
    let response = request(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(response.status(), 200);
    let body = read_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["email"], "avery@example.com");
    assert!(body["data"]["user"].get("passwordHash").is_none());

    // Fresh login works too
    let response = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "avery@example.com", "password": "Passw0rd"})),
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = read_json(response).await;
    assert!(body["data"]["token"].as_str().is_some());
    assert!(body["data"]["user"]["lastLoginAt"].as_str().is_some());
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let (_tmp, app) = build_test_router().await;
    register_user(&app, "taken@example.com").await;

    let response = request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Second User",
            "email": "taken@example.com",
            "password": "Passw0rd",
        })),
    )
    .await;
    assert_eq!(response.status(), 409);
    let body = read_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn weak_password_is_rejected_with_field_errors() {
    let (_tmp, app) = build_test_router().await;

    let response = request(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Test User",
            "email": "weak@example.com",
            "password": "short",
        })),
    )
    .await;
    assert_eq!(response.status(), 400);
    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["errors"][0]["field"], "password");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let (_tmp, app) = build_test_router().await;
    register_user(&app, "avery@example.com").await;

    let response = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "avery@example.com", "password": "WrongPass1"})),
    )
    .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let (_tmp, app) = build_test_router().await;
    let response = request(
        &app,
        Method::GET,
        "/api/transactions",
        Some("not-a-jwt"),
        None,
    )
    .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn update_password_requires_current_password() {
    let (_tmp, app) = build_test_router().await;
    let token = register_user(&app, "avery@example.com").await;

    let response = request(
        &app,
        Method::PUT,
        "/api/auth/update-password",
        Some(&token),
        Some(json!({"currentPassword": "Wrong1pass", "newPassword": "NewPass1"})),
    )
    .await;
    assert_eq!(response.status(), 400);

    let response = request(
        &app,
        Method::PUT,
        "/api/auth/update-password",
        Some(&token),
        Some(json!({"currentPassword": "Passw0rd", "newPassword": "NewPass1"})),
    )
    .await;
    assert_eq!(response.status(), 200);

    // The new password logs in
    let response = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "avery@example.com", "password": "NewPass1"})),
    )
    .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn delete_account_soft_deactivates() {
    let (_tmp, app) = build_test_router().await;
    let token = register_user(&app, "avery@example.com").await;

    let response = request(
        &app,
        Method::DELETE,
        "/api/auth/delete-account",
        Some(&token),
        Some(json!({"password": "Passw0rd"})),
    )
    .await;
    assert_eq!(response.status(), 200);

    // The token no longer grants access
    let response = request(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(response.status(), 401);

    // Login is refused for the deactivated account
    let response = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "avery@example.com", "password": "Passw0rd"})),
    )
    .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let (_tmp, app) = build_test_router().await;
    let response = request(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(response.status(), 200);
}
