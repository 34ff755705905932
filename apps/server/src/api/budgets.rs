//! Budget CRUD and performance endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use pocketledger_core::budgets::{
    Budget, BudgetFilters, BudgetStatus, BudgetTimeRemaining, BudgetUpdate, NewBudget,
};
use pocketledger_core::pagination::PageRequest;

use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{ApiResponse, ListResponse},
};

/// Budget plus its derived views, the way read endpoints expose it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetView {
    #[serde(flatten)]
    budget: Budget,
    status: BudgetStatus,
    time_remaining: BudgetTimeRemaining,
}

impl BudgetView {
    fn new(budget: Budget, now: NaiveDateTime) -> Self {
        BudgetView {
            status: budget.status(now),
            time_remaining: budget.time_remaining(now),
            budget,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    is_active: Option<bool>,
}

async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListResponse<serde_json::Value>>> {
    let filters = BudgetFilters {
        is_active: query.is_active,
    };
    let page = PageRequest::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));
    let result = state
        .budget_service
        .list_budgets(&current.user_id, &filters, &page)?;

    let now = Utc::now().naive_utc();
    let result = result.map(|budget| BudgetView::new(budget, now));
    Ok(Json(ListResponse::from_page(result, |budgets| {
        json!({ "budgets": budgets })
    })))
}

async fn get_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let budget = state.budget_service.get_budget(&current.user_id, &id)?;
    let view = BudgetView::new(budget, Utc::now().naive_utc());
    Ok(Json(ApiResponse::new(json!({ "budget": view }))))
}

async fn get_budget_performance(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let performance = state.budget_service.get_performance(&current.user_id, &id)?;
    Ok(Json(ApiResponse::new(json!({ "performance": performance }))))
}

async fn create_budget(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<NewBudget>,
) -> ApiResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    let budget = state
        .budget_service
        .create_budget(&current.user_id, payload)
        .await?;
    let view = BudgetView::new(budget, Utc::now().naive_utc());
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Budget created successfully",
            json!({ "budget": view }),
        )),
    ))
}

async fn update_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<BudgetUpdate>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let budget = state
        .budget_service
        .update_budget(&current.user_id, &id, payload)
        .await?;
    let view = BudgetView::new(budget, Utc::now().naive_utc());
    Ok(Json(ApiResponse::with_message(
        "Budget updated successfully",
        json!({ "budget": view }),
    )))
}

async fn delete_budget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    state
        .budget_service
        .delete_budget(&current.user_id, &id)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Budget deleted successfully",
        json!({}),
    )))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route(
            "/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
        .route("/budgets/{id}/performance", get(get_budget_performance))
}
