//! Transaction CRUD and aggregation endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use pocketledger_core::analytics::{DateRange, DEFAULT_TREND_MONTHS};
use pocketledger_core::pagination::PageRequest;
use pocketledger_core::transactions::{
    NewTransaction, SortOrder, Transaction, TransactionFilters, TransactionSort,
    TransactionSortField, TransactionType, TransactionUpdate,
};

use super::parse_date_param;
use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{ApiResponse, ListResponse},
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    page: Option<i64>,
    limit: Option<i64>,
    sort: Option<TransactionSortField>,
    order: Option<SortOrder>,
    #[serde(rename = "type")]
    transaction_type: Option<TransactionType>,
    category: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    search: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

#[derive(Deserialize)]
pub struct TrendsQuery {
    months: Option<u32>,
}

fn to_range(query: &RangeQuery) -> ApiResult<DateRange> {
    Ok(DateRange {
        start_date: query
            .start_date
            .as_deref()
            .map(|raw| parse_date_param(raw, "startDate"))
            .transpose()?,
        end_date: query
            .end_date
            .as_deref()
            .map(|raw| parse_date_param(raw, "endDate"))
            .transpose()?,
    })
}

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<ListResponse<serde_json::Value>>> {
    let filters = TransactionFilters {
        transaction_type: query.transaction_type,
        category: query.category.clone(),
        start_date: query
            .start_date
            .as_deref()
            .map(|raw| parse_date_param(raw, "startDate"))
            .transpose()?,
        end_date: query
            .end_date
            .as_deref()
            .map(|raw| parse_date_param(raw, "endDate"))
            .transpose()?,
        search: query.search.clone(),
    };
    let sort = TransactionSort {
        field: query.sort.unwrap_or_default(),
        order: query.order.unwrap_or_default(),
    };
    let page = PageRequest::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));

    let result =
        state
            .transaction_service
            .list_transactions(&current.user_id, &filters, &sort, &page)?;
    Ok(Json(ListResponse::from_page(result, |transactions| {
        json!({ "transactions": transactions })
    })))
}

async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let transaction = state
        .transaction_service
        .get_transaction(&current.user_id, &id)?;
    Ok(Json(ApiResponse::new(json!({ "transaction": transaction }))))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    let transaction: Transaction = state
        .transaction_service
        .create_transaction(&current.user_id, payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Transaction created successfully",
            json!({ "transaction": transaction }),
        )),
    ))
}

async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<TransactionUpdate>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let transaction = state
        .transaction_service
        .update_transaction(&current.user_id, &id, payload)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Transaction updated successfully",
        json!({ "transaction": transaction }),
    )))
}

async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    state
        .transaction_service
        .delete_transaction(&current.user_id, &id)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Transaction deleted successfully",
        json!({}),
    )))
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let range = to_range(&query)?;
    let summary = state.analytics_service.summary(&current.user_id, &range)?;
    Ok(Json(ApiResponse::new(json!({ "summary": summary }))))
}

async fn get_category_breakdown(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let range = to_range(&query)?;
    let categories = state
        .analytics_service
        .category_breakdown(&current.user_id, &range)?;
    Ok(Json(ApiResponse::new(json!({ "categories": categories }))))
}

async fn get_monthly_trends(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<TrendsQuery>,
) -> ApiResult<Json<ApiResponse<serde_json::Value>>> {
    let months = query.months.unwrap_or(DEFAULT_TREND_MONTHS);
    let trends = state
        .analytics_service
        .monthly_trends(&current.user_id, months)?;
    Ok(Json(ApiResponse::new(json!({ "trends": trends }))))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transactions/stats", get(get_stats))
        .route("/transactions/categories", get(get_category_breakdown))
        .route("/transactions/trends", get(get_monthly_trends))
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
