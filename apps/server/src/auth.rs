//! Password hashing and bearer-token authentication.
//!
//! Argon2 for credentials, HS256 JWTs for sessions. The middleware resolves
//! the token to an active user and stores it as a [`CurrentUser`] request
//! extension for handlers.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Argon2,
};
use rand::rngs::OsRng;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::main_lib::AppState;

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    InvalidCredentials,
    AccountDeactivated,
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    success: bool,
    message: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// The authenticated user's id.
    sub: String,
    exp: usize,
    iat: usize,
}

/// The authenticated user's id, inserted by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
}

impl AuthManager {
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            validation,
            token_ttl,
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Failed to hash password: {e}")))
    }

    pub fn verify_password(&self, candidate: &str, password_hash: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::Internal(format!("Stored password hash is invalid: {e}")))?;
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => AuthError::InvalidCredentials,
                other => AuthError::Internal(format!("Password verification failed: {other}")),
            })
    }

    pub fn issue_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Returns the user id carried by a valid token.
    pub fn validate_token(&self, token: &str) -> Result<String, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
                | jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                    AuthError::Unauthorized
                }
                other => AuthError::Internal(format!("Failed to validate token: {other:?}")),
            })
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            AuthError::AccountDeactivated => (
                StatusCode::UNAUTHORIZED,
                "Account is deactivated. Please contact support.".to_string(),
            ),
            AuthError::Internal(msg) => {
                tracing::error!("auth error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };
        let body = Json(AuthErrorBody {
            success: false,
            message,
        });
        (status, body).into_response()
    }
}

/// Bearer-token middleware: validates the token, re-loads the user, and
/// refuses deactivated accounts. The resolved [`CurrentUser`] lands in the
/// request extensions.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::Unauthorized)?;

    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return Err(AuthError::Unauthorized);
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::Unauthorized);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Unauthorized);
    }

    let user_id = state.auth.validate_token(token)?;

    // Tokens outlive account state; check the user still exists and is
    // active on every request.
    let user = state
        .user_service
        .get_user(&user_id)
        .map_err(|_| AuthError::Unauthorized)?;
    if !user.is_active {
        return Err(AuthError::AccountDeactivated);
    }

    request.extensions_mut().insert(CurrentUser { user_id });
    Ok(next.run(request).await)
}
