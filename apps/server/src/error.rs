use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use pocketledger_core::errors::{Error as CoreError, FieldError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Failure envelope: `{success: false, message, errors?}`.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match &self {
            ApiError::Core(CoreError::Validation(validation)) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                validation.field_errors().map(|fields| fields.to_vec()),
            ),
            ApiError::Core(core) if core.is_not_found() => {
                (StatusCode::NOT_FOUND, core.to_string(), None)
            }
            ApiError::Core(CoreError::ConstraintViolation(message)) => {
                (StatusCode::CONFLICT, message.clone(), None)
            }
            ApiError::Core(core) => {
                // Storage detail goes to the log, not the caller
                tracing::error!("request failed: {core}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                    None,
                )
            }
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone(), None),
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason.clone(), None),
            ApiError::Internal(reason) => {
                tracing::error!("internal error: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                    None,
                )
            }
            ApiError::Anyhow(err) => {
                tracing::error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                    None,
                )
            }
        };
        let body = Json(ErrorBody {
            success: false,
            message,
            errors,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<crate::auth::AuthError> for ApiError {
    fn from(err: crate::auth::AuthError) -> Self {
        use crate::auth::AuthError;
        match err {
            AuthError::Unauthorized => ApiError::Unauthorized("Unauthorized".to_string()),
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            AuthError::AccountDeactivated => ApiError::Unauthorized(
                "Account is deactivated. Please contact support.".to_string(),
            ),
            AuthError::Internal(message) => ApiError::Internal(message),
        }
    }
}
