//! Summary and trend view models for the aggregation layer.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sum and count for one transaction type group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTotals {
    pub total: Decimal,
    pub count: i64,
}

/// Income/expense totals over an optional date window.
///
/// `net_income` is always `income.total - expense.total`; groups with no
/// transactions stay zeroed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub income: GroupTotals,
    pub expense: GroupTotals,
    pub net_income: Decimal,
}

/// Spending for one expense category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub total: Decimal,
    pub count: i64,
}

/// Income vs expenses for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    /// First day of the month.
    pub month: NaiveDate,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net_income: Decimal,
}

/// Optional inclusive date window for summary queries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}
