//! Aggregation queries over a user's transactions.
//!
//! Repositories return the matching rows; the folding happens here so the
//! logic stays storage-agnostic and directly testable.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate, Utc};
use log::debug;

use super::analytics_model::{
    CategorySummary, DateRange, GroupTotals, MonthlyTrend, TransactionSummary,
};
use crate::errors::Result;
use crate::transactions::{Transaction, TransactionRepositoryTrait, TransactionType};

pub const CATEGORY_BREAKDOWN_LIMIT: usize = 10;
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// Trait defining the contract for the analytics service.
pub trait AnalyticsServiceTrait: Send + Sync {
    /// Income/expense totals and net income over an optional window.
    fn summary(&self, user_id: &str, range: &DateRange) -> Result<TransactionSummary>;

    /// Top expense categories, total descending, at most ten.
    fn category_breakdown(&self, user_id: &str, range: &DateRange) -> Result<Vec<CategorySummary>>;

    /// Per-calendar-month income/expense totals for the last `months`
    /// months including the current one, ascending, zero-filled.
    fn monthly_trends(&self, user_id: &str, months: u32) -> Result<Vec<MonthlyTrend>>;
}

pub struct AnalyticsService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl AnalyticsService {
    pub fn new(transaction_repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self {
            transaction_repository,
        }
    }
}

impl AnalyticsServiceTrait for AnalyticsService {
    fn summary(&self, user_id: &str, range: &DateRange) -> Result<TransactionSummary> {
        let transactions =
            self.transaction_repository
                .list_in_range(user_id, range.start_date, range.end_date)?;
        Ok(compute_summary(&transactions))
    }

    fn category_breakdown(&self, user_id: &str, range: &DateRange) -> Result<Vec<CategorySummary>> {
        let transactions =
            self.transaction_repository
                .list_in_range(user_id, range.start_date, range.end_date)?;
        Ok(compute_category_breakdown(&transactions))
    }

    fn monthly_trends(&self, user_id: &str, months: u32) -> Result<Vec<MonthlyTrend>> {
        let months = months.max(1);
        let today = Utc::now().naive_utc().date();
        let window_start = trend_window_start(today, months);
        debug!(
            "Computing {} months of trends for user {} from {}",
            months, user_id, window_start
        );

        let transactions = self.transaction_repository.list_in_range(
            user_id,
            window_start.and_hms_opt(0, 0, 0),
            None,
        )?;
        Ok(compute_monthly_trends(&transactions, months, today))
    }
}

/// Folds transactions into income/expense totals.
pub fn compute_summary(transactions: &[Transaction]) -> TransactionSummary {
    let mut summary = TransactionSummary::default();
    for transaction in transactions {
        let group = match transaction.transaction_type {
            TransactionType::Income => &mut summary.income,
            TransactionType::Expense => &mut summary.expense,
        };
        group.total += transaction.amount;
        group.count += 1;
    }
    summary.net_income = summary.income.total - summary.expense.total;
    summary
}

/// Groups expenses by category, sorted by total descending.
///
/// The sort is stable, so categories with equal totals keep their
/// first-seen order. At most [`CATEGORY_BREAKDOWN_LIMIT`] entries.
pub fn compute_category_breakdown(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let mut breakdown: Vec<CategorySummary> = Vec::new();
    let mut index_by_category: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions {
        if transaction.transaction_type != TransactionType::Expense {
            continue;
        }
        match index_by_category.get(transaction.category.as_str()) {
            Some(&i) => {
                breakdown[i].total += transaction.amount;
                breakdown[i].count += 1;
            }
            None => {
                index_by_category.insert(transaction.category.as_str(), breakdown.len());
                breakdown.push(CategorySummary {
                    category: transaction.category.clone(),
                    total: transaction.amount,
                    count: 1,
                });
            }
        }
    }

    breakdown.sort_by(|a, b| b.total.cmp(&a.total));
    breakdown.truncate(CATEGORY_BREAKDOWN_LIMIT);
    breakdown
}

/// Buckets transactions by calendar month for the last `months` months
/// ending at `today`'s month, zero-filling empty months.
pub fn compute_monthly_trends(
    transactions: &[Transaction],
    months: u32,
    today: NaiveDate,
) -> Vec<MonthlyTrend> {
    let mut trends: Vec<MonthlyTrend> = (0..months)
        .rev()
        .filter_map(|back| {
            month_start(today)
                .checked_sub_months(Months::new(back))
                .map(|month| MonthlyTrend {
                    month,
                    income: Default::default(),
                    expenses: Default::default(),
                    net_income: Default::default(),
                })
        })
        .collect();

    let index_by_month: HashMap<NaiveDate, usize> = trends
        .iter()
        .enumerate()
        .map(|(i, t)| (t.month, i))
        .collect();

    for transaction in transactions {
        let bucket = month_start(transaction.date.date());
        if let Some(&i) = index_by_month.get(&bucket) {
            match transaction.transaction_type {
                TransactionType::Income => trends[i].income += transaction.amount,
                TransactionType::Expense => trends[i].expenses += transaction.amount,
            }
        }
    }

    for trend in &mut trends {
        trend.net_income = trend.income - trend.expenses;
    }
    trends
}

fn trend_window_start(today: NaiveDate, months: u32) -> NaiveDate {
    month_start(today)
        .checked_sub_months(Months::new(months.saturating_sub(1)))
        .unwrap_or(month_start(today))
}

fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("first of month is always valid")
}
