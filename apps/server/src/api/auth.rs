//! Registration, login, and account management endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use pocketledger_core::users::{validate_password, NewUser, ProfileUpdate, UserProfile};

use crate::{
    auth::{AuthError, CurrentUser},
    error::ApiResult,
    main_lib::AppState,
    models::ApiResponse,
};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthData {
    user: UserProfile,
    token: String,
    expires_in: u64,
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AuthData>>)> {
    validate_password(&payload.password)?;
    let password_hash = state.auth.hash_password(&payload.password)?;

    let user = state
        .user_service
        .register(NewUser {
            name: payload.name,
            email: payload.email,
            password_hash,
        })
        .await?;

    let token = state.auth.issue_token(&user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "User registered successfully",
            AuthData {
                user: user.profile(),
                token,
                expires_in: state.auth.expires_in().as_secs(),
            },
        )),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthData>>> {
    let user = state
        .user_service
        .find_by_email(&payload.email)?
        .ok_or(AuthError::InvalidCredentials)?;

    state
        .auth
        .verify_password(&payload.password, &user.password_hash)?;

    if !user.is_active {
        return Err(AuthError::AccountDeactivated.into());
    }

    let user = state.user_service.record_login(&user.id).await?;
    let token = state.auth.issue_token(&user.id)?;
    Ok(Json(ApiResponse::with_message(
        "Login successful",
        AuthData {
            user: user.profile(),
            token,
            expires_in: state.auth.expires_in().as_secs(),
        },
    )))
}

async fn me(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let user = state.user_service.get_user(&current.user_id)?;
    Ok(Json(ApiResponse::new(json!({ "user": user.profile() }))))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ProfileUpdate>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let user = state
        .user_service
        .update_profile(&current.user_id, payload)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Profile updated successfully",
        json!({ "user": user.profile() }),
    )))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

async fn update_password(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let user = state.user_service.get_user(&current.user_id)?;

    if state
        .auth
        .verify_password(&payload.current_password, &user.password_hash)
        .is_err()
    {
        return Err(crate::error::ApiError::BadRequest(
            "Current password is incorrect".to_string(),
        ));
    }

    validate_password(&payload.new_password)?;
    let password_hash = state.auth.hash_password(&payload.new_password)?;
    state
        .user_service
        .change_password(&current.user_id, password_hash)
        .await?;

    let token = state.auth.issue_token(&current.user_id)?;
    Ok(Json(ApiResponse::with_message(
        "Password updated successfully",
        json!({ "token": token }),
    )))
}

async fn logout() -> Json<ApiResponse<serde_json::Value>> {
    // Stateless tokens: nothing to revoke server-side
    Json(ApiResponse::with_message(
        "Logged out successfully",
        json!({}),
    ))
}

#[derive(Deserialize)]
pub struct DeleteAccountRequest {
    pub password: String,
}

async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<DeleteAccountRequest>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let user = state.user_service.get_user(&current.user_id)?;

    if state
        .auth
        .verify_password(&payload.password, &user.password_hash)
        .is_err()
    {
        return Err(crate::error::ApiError::BadRequest(
            "Password is incorrect".to_string(),
        ));
    }

    // Soft deactivation, the one exception to hard delete
    state.user_service.deactivate(&current.user_id).await?;
    Ok(Json(ApiResponse::with_message(
        "Account deleted successfully",
        json!({}),
    )))
}

/// Routes reachable without a token.
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Routes behind the bearer-token middleware.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/update-profile", put(update_profile))
        .route("/auth/update-password", put(update_password))
        .route("/auth/logout", post(logout))
        .route("/auth/delete-account", delete(delete_account))
}
