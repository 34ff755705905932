//! Budget domain models and derivations.
//!
//! Status, time remaining and performance are derived views, never persisted.
//! Derivations take an explicit `now` so they stay deterministic and
//! testable.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::{FieldErrors, Result};
use crate::utils::days_until;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_CATEGORY_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Quarterly => "quarterly",
            BudgetPeriod::Yearly => "yearly",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "weekly" => Some(BudgetPeriod::Weekly),
            "monthly" => Some(BudgetPeriod::Monthly),
            "quarterly" => Some(BudgetPeriod::Quarterly),
            "yearly" => Some(BudgetPeriod::Yearly),
            _ => None,
        }
    }
}

/// Alert trigger point as a percentage of the budget amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertThreshold {
    pub percentage: Decimal,
    pub is_enabled: bool,
}

/// Where "now" falls relative to the budget window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Upcoming,
    Active,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTimeStatus {
    Expired,
    EndsToday,
    EndingSoon,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTimeRemaining {
    pub days: i64,
    pub status: BudgetTimeStatus,
}

/// Domain model representing a budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub is_active: bool,
    pub alert_thresholds: Vec<AlertThreshold>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Budget {
    pub fn status(&self, now: NaiveDateTime) -> BudgetStatus {
        if now < self.start_date {
            BudgetStatus::Upcoming
        } else if now > self.end_date {
            BudgetStatus::Expired
        } else {
            BudgetStatus::Active
        }
    }

    pub fn time_remaining(&self, now: NaiveDateTime) -> BudgetTimeRemaining {
        let days = days_until(now, self.end_date);
        let (days, status) = match days {
            d if d < 0 => (0, BudgetTimeStatus::Expired),
            0 => (0, BudgetTimeStatus::EndsToday),
            d if d <= 7 => (d, BudgetTimeStatus::EndingSoon),
            d => (d, BudgetTimeStatus::Active),
        };
        BudgetTimeRemaining { days, status }
    }
}

/// Input model for creating a budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub amount: Decimal,
    #[serde(default)]
    pub period: BudgetPeriod,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub alert_thresholds: Vec<AlertThreshold>,
}

fn default_true() -> bool {
    true
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        validate_budget_fields(
            &mut errors,
            &self.name,
            self.description.as_deref(),
            &self.category,
            self.amount,
            &self.alert_thresholds,
        );
        if self.end_date <= self.start_date {
            errors.push("endDate", "End date must be after start date");
        }
        errors.into_result()
    }
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub period: Option<BudgetPeriod>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub is_active: Option<bool>,
    pub alert_thresholds: Option<Vec<AlertThreshold>>,
}

impl BudgetUpdate {
    pub fn apply(&self, budget: &mut Budget) {
        if let Some(name) = &self.name {
            budget.name = name.clone();
        }
        if let Some(description) = &self.description {
            budget.description = Some(description.clone());
        }
        if let Some(category) = &self.category {
            budget.category = category.clone();
        }
        if let Some(amount) = self.amount {
            budget.amount = amount;
        }
        if let Some(period) = self.period {
            budget.period = period;
        }
        if let Some(start_date) = self.start_date {
            budget.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            budget.end_date = end_date;
        }
        if let Some(is_active) = self.is_active {
            budget.is_active = is_active;
        }
        if let Some(thresholds) = &self.alert_thresholds {
            budget.alert_thresholds = thresholds.clone();
        }
    }
}

/// Re-runs the create-time invariants against a fully merged budget. Updates
/// go through this so the end-after-start rule cannot be bypassed.
pub fn validate_budget(budget: &Budget) -> Result<()> {
    let mut errors = FieldErrors::new();
    validate_budget_fields(
        &mut errors,
        &budget.name,
        budget.description.as_deref(),
        &budget.category,
        budget.amount,
        &budget.alert_thresholds,
    );
    if budget.end_date <= budget.start_date {
        errors.push("endDate", "End date must be after start date");
    }
    errors.into_result()
}

fn validate_budget_fields(
    errors: &mut FieldErrors,
    name: &str,
    description: Option<&str>,
    category: &str,
    amount: Decimal,
    alert_thresholds: &[AlertThreshold],
) {
    if name.trim().is_empty() {
        errors.push("name", "Budget name is required");
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.push("name", "Budget name cannot exceed 100 characters");
    }
    if let Some(description) = description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push("description", "Description cannot exceed 500 characters");
        }
    }
    if category.trim().is_empty() {
        errors.push("category", "Category is required");
    } else if category.chars().count() > MAX_CATEGORY_LEN {
        errors.push("category", "Category cannot exceed 50 characters");
    }
    if amount <= Decimal::ZERO {
        errors.push_with_value("amount", "Amount must be a positive number", json!(amount));
    }
    for threshold in alert_thresholds {
        if threshold.percentage < Decimal::ZERO || threshold.percentage > dec!(100) {
            errors.push(
                "alertThresholds",
                "Alert threshold percentage must be between 0 and 100",
            );
        }
    }
}

/// List filters; the known set for this resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetFilters {
    pub is_active: Option<bool>,
}

/// Spend-vs-limit view for one budget, computed from matching transactions.
///
/// `percentage` is capped at 100 for display; `remaining` and
/// `is_over_budget` use the uncapped total so overage is never hidden.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPerformance {
    pub budget: Budget,
    pub total_spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub is_over_budget: bool,
    /// Number of transactions that matched the budget window and category.
    pub transactions: i64,
}
