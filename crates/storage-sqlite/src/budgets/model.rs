//! Database models for budgets.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use pocketledger_core::budgets::{AlertThreshold, Budget, BudgetPeriod};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub amount: String,
    pub period: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_active: bool,
    pub alert_thresholds: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<BudgetDB> for Budget {
    fn from(db: BudgetDB) -> Self {
        Budget {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            description: db.description,
            category: db.category,
            amount: db.amount.parse().unwrap_or(Decimal::ZERO),
            period: BudgetPeriod::parse_str(&db.period).unwrap_or_default(),
            start_date: db.start_date,
            end_date: db.end_date,
            is_active: db.is_active,
            alert_thresholds: serde_json::from_str::<Vec<AlertThreshold>>(&db.alert_thresholds)
                .unwrap_or_default(),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Budget> for BudgetDB {
    fn from(budget: Budget) -> Self {
        BudgetDB {
            id: budget.id,
            user_id: budget.user_id,
            name: budget.name,
            description: budget.description,
            category: budget.category,
            amount: budget.amount.to_string(),
            period: budget.period.as_str().to_string(),
            start_date: budget.start_date,
            end_date: budget.end_date,
            is_active: budget.is_active,
            alert_thresholds: serde_json::to_string(&budget.alert_thresholds)
                .unwrap_or_else(|_| "[]".to_string()),
            created_at: budget.created_at,
            updated_at: budget.updated_at,
        }
    }
}
