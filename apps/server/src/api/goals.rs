//! Goal CRUD, contribution, and statistics endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use pocketledger_core::goals::{
    Goal, GoalContribution, GoalFilters, GoalProgress, GoalStatus, GoalTimeRemaining, GoalType,
    GoalUpdate, GoalWithContributions, NewContribution, NewGoal,
};
use pocketledger_core::pagination::PageRequest;

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{ApiResponse, ListResponse},
};

/// Goal plus its derived views, the way read endpoints expose it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalView {
    #[serde(flatten)]
    goal: Goal,
    progress: GoalProgress,
    status: GoalStatus,
    time_remaining: GoalTimeRemaining,
    suggested_monthly_contribution: Decimal,
}

impl GoalView {
    fn new(goal: Goal, now: NaiveDateTime) -> Self {
        GoalView {
            progress: goal.progress(),
            status: goal.status(now),
            time_remaining: goal.time_remaining(now),
            suggested_monthly_contribution: goal.suggested_monthly_contribution(now),
            goal,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalDetailView {
    #[serde(flatten)]
    view: GoalView,
    contributions: Vec<GoalContribution>,
}

impl GoalDetailView {
    fn new(detail: GoalWithContributions, now: NaiveDateTime) -> Self {
        GoalDetailView {
            view: GoalView::new(detail.goal, now),
            contributions: detail.contributions,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    #[serde(rename = "type")]
    goal_type: Option<GoalType>,
    is_active: Option<bool>,
    is_completed: Option<bool>,
}

async fn list_goals(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListResponse<serde_json::Value>>> {
    let filters = GoalFilters {
        goal_type: query.goal_type,
        is_active: query.is_active,
        is_completed: query.is_completed,
    };
    let page = PageRequest::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));
    let result = state
        .goal_service
        .list_goals(&current.user_id, &filters, &page)?;

    let now = Utc::now().naive_utc();
    let result = result.map(|goal| GoalView::new(goal, now));
    Ok(Json(ListResponse::from_page(result, |goals| {
        json!({ "goals": goals })
    })))
}

async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let detail = state.goal_service.get_goal(&current.user_id, &id)?;
    let view = GoalDetailView::new(detail, Utc::now().naive_utc());
    Ok(Json(ApiResponse::new(json!({ "goal": view }))))
}

async fn get_goal_stats(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let stats = state.goal_service.get_stats(&current.user_id)?;
    Ok(Json(ApiResponse::new(json!({ "stats": stats }))))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    let goal = state
        .goal_service
        .create_goal(&current.user_id, payload)
        .await?;
    let view = GoalView::new(goal, Utc::now().naive_utc());
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Goal created successfully",
            json!({ "goal": view }),
        )),
    ))
}

async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<GoalUpdate>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let goal = state
        .goal_service
        .update_goal(&current.user_id, &id, payload)
        .await?;
    let view = GoalView::new(goal, Utc::now().naive_utc());
    Ok(Json(ApiResponse::with_message(
        "Goal updated successfully",
        json!({ "goal": view }),
    )))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    state.goal_service.delete_goal(&current.user_id, &id).await?;
    Ok(Json(ApiResponse::with_message(
        "Goal deleted successfully",
        json!({}),
    )))
}

async fn add_contribution(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<NewContribution>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let detail = state
        .goal_service
        .contribute(&current.user_id, &id, payload)
        .await?;
    let view = GoalDetailView::new(detail, Utc::now().naive_utc());
    Ok(Json(ApiResponse::with_message(
        "Contribution added successfully",
        json!({ "goal": view }),
    )))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals/stats", get(get_goal_stats))
        .route("/goals", get(list_goals).post(create_goal))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/contribute", axum::routing::post(add_contribution))
}
