//! Resource flows: transactions, aggregation, budgets, goals.

mod common;

use axum::http::Method;
use chrono::{Datelike, Duration, NaiveDateTime, Utc};
use serde_json::{json, Value};

use common::{build_test_router, read_json, register_user, request};

fn fmt(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

async fn create_transaction(app: &axum::Router, token: &str, body: Value) -> Value {
    let response = request(app, Method::POST, "/api/transactions", Some(token), Some(body)).await;
    assert_eq!(response.status(), 201);
    read_json(response).await
}

fn expense(category: &str, amount: f64, date: NaiveDateTime) -> Value {
    json!({
        "type": "expense",
        "amount": amount,
        "description": format!("{category} purchase"),
        "category": category,
        "date": fmt(date),
    })
}

fn income(amount: f64, date: NaiveDateTime) -> Value {
    json!({
        "type": "income",
        "amount": amount,
        "description": "pay",
        "category": "Salary",
        "date": fmt(date),
    })
}

#[tokio::test]
async fn transaction_crud_round_trip() {
    let (_tmp, app) = build_test_router().await;
    let token = register_user(&app, "crud@example.com").await;

    let body = create_transaction(
        &app,
        &token,
        json!({
            "type": "expense",
            "amount": 42.5,
            "description": "Groceries",
            "category": "Food",
            "paymentMethod": "debit_card",
            "tags": ["weekly"],
        }),
    )
    .await;
    let id = body["data"]["transaction"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["transaction"]["amount"], json!(42.5));

    // Read it back
    let response = request(
        &app,
        Method::GET,
        &format!("/api/transactions/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = read_json(response).await;
    assert_eq!(body["data"]["transaction"]["category"], "Food");
    assert_eq!(body["data"]["transaction"]["paymentMethod"], "debit_card");

    // Update the amount only
    let response = request(
        &app,
        Method::PUT,
        &format!("/api/transactions/{id}"),
        Some(&token),
        Some(json!({"amount": 99.0})),
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = read_json(response).await;
    assert_eq!(body["data"]["transaction"]["amount"], json!(99.0));
    assert_eq!(body["data"]["transaction"]["description"], "Groceries");

    // Delete, then the read 404s
    let response = request(
        &app,
        Method::DELETE,
        &format!("/api/transactions/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), 200);
    let response = request(
        &app,
        Method::GET,
        &format!("/api/transactions/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn invalid_transaction_rejected_with_field_errors() {
    let (_tmp, app) = build_test_router().await;
    let token = register_user(&app, "invalid@example.com").await;

    let response = request(
        &app,
        Method::POST,
        "/api/transactions",
        Some(&token),
        Some(json!({
            "type": "expense",
            "amount": -5,
            "description": "",
            "category": "Food",
        })),
    )
    .await;
    assert_eq!(response.status(), 400);
    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"amount"));
    assert!(fields.contains(&"description"));
}

#[tokio::test]
async fn list_supports_filters_and_pagination() {
    let (_tmp, app) = build_test_router().await;
    let token = register_user(&app, "list@example.com").await;

    for i in 0..12 {
        create_transaction(
            &app,
            &token,
            expense("Food", 10.0 + i as f64, now() - Duration::days(i)),
        )
        .await;
    }
    create_transaction(&app, &token, income(500.0, now())).await;

    // Page two of the expense list, five per page
    let response = request(
        &app,
        Method::GET,
        "/api/transactions?type=expense&page=2&limit=5",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = read_json(response).await;
    assert_eq!(body["count"], 5);
    assert_eq!(body["total"], 12);
    assert_eq!(body["page"], 2);
    assert_eq!(body["pages"], 3);

    // Search matches descriptions
    let response = request(
        &app,
        Method::GET,
        "/api/transactions?search=pay",
        Some(&token),
        None,
    )
    .await;
    let body = read_json(response).await;
    assert_eq!(body["total"], 1);

    // Out-of-bounds limit is rejected
    let response = request(
        &app,
        Method::GET,
        "/api/transactions?limit=101",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn stats_and_categories_aggregate_owner_scoped() {
    let (_tmp, app) = build_test_router().await;
    let token = register_user(&app, "stats@example.com").await;
    let other_token = register_user(&app, "other@example.com").await;

    create_transaction(&app, &token, income(3000.0, now())).await;
    create_transaction(&app, &token, expense("Rent", 900.0, now())).await;
    create_transaction(&app, &token, expense("Food", 100.0, now())).await;
    create_transaction(&app, &token, expense("Food", 50.0, now())).await;
    // Someone else's data must not leak into the stats
    create_transaction(&app, &other_token, expense("Food", 9999.0, now())).await;

    let response = request(&app, Method::GET, "/api/transactions/stats", Some(&token), None).await;
    let body = read_json(response).await;
    let summary = &body["data"]["summary"];
    assert_eq!(summary["income"]["total"], json!(3000.0));
    assert_eq!(summary["income"]["count"], 1);
    assert_eq!(summary["expense"]["total"], json!(1050.0));
    assert_eq!(summary["expense"]["count"], 3);
    assert_eq!(summary["netIncome"], json!(1950.0));

    let response = request(
        &app,
        Method::GET,
        "/api/transactions/categories",
        Some(&token),
        None,
    )
    .await;
    let body = read_json(response).await;
    let categories = body["data"]["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["category"], "Rent");
    assert_eq!(categories[1]["category"], "Food");
    assert_eq!(categories[1]["count"], 2);
}

#[tokio::test]
async fn monthly_trends_zero_fill_prior_months() {
    let (_tmp, app) = build_test_router().await;
    let token = register_user(&app, "trends@example.com").await;

    create_transaction(&app, &token, income(500.0, now())).await;
    create_transaction(&app, &token, expense("Food", 200.0, now())).await;

    let response = request(
        &app,
        Method::GET,
        "/api/transactions/trends?months=3",
        Some(&token),
        None,
    )
    .await;
    let body = read_json(response).await;
    let trends = body["data"]["trends"].as_array().unwrap();
    assert_eq!(trends.len(), 3);

    // Two prior months all-zero, current month last with the totals
    assert_eq!(trends[0]["income"], json!(0.0));
    assert_eq!(trends[0]["expenses"], json!(0.0));
    assert_eq!(trends[1]["netIncome"], json!(0.0));
    assert_eq!(trends[2]["income"], json!(500.0));
    assert_eq!(trends[2]["expenses"], json!(200.0));
    assert_eq!(trends[2]["netIncome"], json!(300.0));

    let current_month = now().date().with_day(1).unwrap();
    assert_eq!(trends[2]["month"], fmt_date(current_month));
}

fn fmt_date(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn budget_performance_reports_overspend() {
    let (_tmp, app) = build_test_router().await;
    let token = register_user(&app, "budget@example.com").await;

    let start = now() - Duration::days(10);
    let end = now() + Duration::days(20);
    let response = request(
        &app,
        Method::POST,
        "/api/budgets",
        Some(&token),
        Some(json!({
            "name": "Food budget",
            "category": "Food",
            "amount": 100.0,
            "period": "monthly",
            "startDate": fmt(start),
            "endDate": fmt(end),
        })),
    )
    .await;
    assert_eq!(response.status(), 201);
    let body = read_json(response).await;
    let budget_id = body["data"]["budget"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["budget"]["status"], "active");

    create_transaction(&app, &token, expense("Food", 70.0, now() - Duration::days(2))).await;
    create_transaction(&app, &token, expense("Food", 50.0, now() - Duration::days(1))).await;
    // Different category and out-of-window spend is ignored
    create_transaction(&app, &token, expense("Rent", 900.0, now())).await;
    create_transaction(&app, &token, expense("Food", 25.0, start - Duration::days(5))).await;

    let response = request(
        &app,
        Method::GET,
        &format!("/api/budgets/{budget_id}/performance"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = read_json(response).await;
    let performance = &body["data"]["performance"];
    assert_eq!(performance["totalSpent"], json!(120.0));
    assert_eq!(performance["remaining"], json!(-20.0));
    assert_eq!(performance["percentage"], json!(100.0));
    assert_eq!(performance["isOverBudget"], true);
    assert_eq!(performance["transactions"], 2);
}

#[tokio::test]
async fn budget_invariants_enforced_over_http() {
    let (_tmp, app) = build_test_router().await;
    let token = register_user(&app, "rules@example.com").await;

    // End before start is a validation failure
    let response = request(
        &app,
        Method::POST,
        "/api/budgets",
        Some(&token),
        Some(json!({
            "name": "Backwards",
            "category": "Food",
            "amount": 100.0,
            "startDate": fmt(now()),
            "endDate": fmt(now() - Duration::days(1)),
        })),
    )
    .await;
    assert_eq!(response.status(), 400);

    let valid = json!({
        "name": "Food budget",
        "category": "Food",
        "amount": 100.0,
        "startDate": fmt(now()),
        "endDate": fmt(now() + Duration::days(30)),
    });
    let response =
        request(&app, Method::POST, "/api/budgets", Some(&token), Some(valid.clone())).await;
    assert_eq!(response.status(), 201);

    // A second active budget for the same category conflicts
    let response = request(&app, Method::POST, "/api/budgets", Some(&token), Some(valid)).await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn goal_contribution_flow_and_stats() {
    let (_tmp, app) = build_test_router().await;
    let token = register_user(&app, "goal@example.com").await;

    let response = request(
        &app,
        Method::POST,
        "/api/goals",
        Some(&token),
        Some(json!({
            "name": "Vacation",
            "type": "savings",
            "targetAmount": 100.0,
            "targetDate": fmt(now() + Duration::days(60)),
            "priority": "high",
        })),
    )
    .await;
    assert_eq!(response.status(), 201);
    let body = read_json(response).await;
    let goal_id = body["data"]["goal"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["goal"]["status"], "just_started");
    // 100 remaining over ceil(60/30)=2 months
    assert_eq!(body["data"]["goal"]["suggestedMonthlyContribution"], json!(50.0));

    // Zero contribution is rejected
    let response = request(
        &app,
        Method::POST,
        &format!("/api/goals/{goal_id}/contribute"),
        Some(&token),
        Some(json!({"amount": 0})),
    )
    .await;
    assert_eq!(response.status(), 400);

    let response = request(
        &app,
        Method::POST,
        &format!("/api/goals/{goal_id}/contribute"),
        Some(&token),
        Some(json!({"amount": 60.0, "description": "bonus"})),
    )
    .await;
    assert_eq!(response.status(), 200);
    let body = read_json(response).await;
    assert_eq!(body["data"]["goal"]["currentAmount"], json!(60.0));
    assert_eq!(body["data"]["goal"]["isCompleted"], false);
    assert_eq!(body["data"]["goal"]["contributions"].as_array().unwrap().len(), 1);

    // Crossing the target completes the goal
    let response = request(
        &app,
        Method::POST,
        &format!("/api/goals/{goal_id}/contribute"),
        Some(&token),
        Some(json!({"amount": 40.0})),
    )
    .await;
    let body = read_json(response).await;
    assert_eq!(body["data"]["goal"]["isCompleted"], true);
    assert_eq!(body["data"]["goal"]["status"], "completed");
    assert!(body["data"]["goal"]["completedAt"].as_str().is_some());
    assert_eq!(body["data"]["goal"]["progress"]["percentage"], json!(100.0));

    let response = request(&app, Method::GET, "/api/goals/stats", Some(&token), None).await;
    let body = read_json(response).await;
    let stats = &body["data"]["stats"];
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["active"], 0);
    assert_eq!(stats["overallProgress"], json!(100.0));
}

#[tokio::test]
async fn cross_user_access_reads_as_not_found() {
    let (_tmp, app) = build_test_router().await;
    let owner = register_user(&app, "owner@example.com").await;
    let intruder = register_user(&app, "intruder@example.com").await;

    let body = create_transaction(&app, &owner, expense("Food", 10.0, now())).await;
    let id = body["data"]["transaction"]["id"].as_str().unwrap().to_string();

    for method in [Method::GET, Method::DELETE] {
        let response = request(
            &app,
            method,
            &format!("/api/transactions/{id}"),
            Some(&intruder),
            None,
        )
        .await;
        assert_eq!(response.status(), 404);
    }

    let response = request(
        &app,
        Method::PUT,
        &format!("/api/transactions/{id}"),
        Some(&intruder),
        Some(json!({"amount": 1.0})),
    )
    .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn future_target_date_required_for_goals() {
    let (_tmp, app) = build_test_router().await;
    let token = register_user(&app, "past@example.com").await;

    let response = request(
        &app,
        Method::POST,
        "/api/goals",
        Some(&token),
        Some(json!({
            "name": "Too late",
            "type": "savings",
            "targetAmount": 100.0,
            "targetDate": fmt(now() - Duration::days(1)),
        })),
    )
    .await;
    assert_eq!(response.status(), 400);
    let body = read_json(response).await;
    assert_eq!(body["errors"][0]["field"], "targetDate");
}
