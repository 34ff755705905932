//! Route assembly and shared request helpers.

pub mod auth;
pub mod budgets;
pub mod events;
pub mod goals;
pub mod health;
pub mod transactions;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use chrono::{NaiveDate, NaiveDateTime};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{auth::require_auth, config::Config, error::ApiError, main_lib::AppState};

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| o.parse().unwrap())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let public = Router::new()
        .route("/health", get(health::health))
        .merge(auth::public_router());

    let protected = Router::new()
        .merge(auth::router())
        .merge(transactions::router())
        .merge(budgets::router())
        .merge(goals::router())
        .route("/events/stream", get(events::stream_events))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest("/api", public.merge(protected))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Parses a query-string date; accepts `YYYY-MM-DD` or a full ISO 8601
/// date-time.
pub(crate) fn parse_date_param(raw: &str, field: &str) -> Result<NaiveDateTime, ApiError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).expect("midnight is always valid"));
    }
    raw.parse::<NaiveDateTime>().map_err(|_| {
        ApiError::BadRequest(format!("{} must be a valid ISO 8601 date", field))
    })
}
