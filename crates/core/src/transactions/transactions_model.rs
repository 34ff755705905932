//! Transaction domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::{FieldErrors, Result};

pub const MAX_DESCRIPTION_LEN: usize = 200;
pub const MAX_CATEGORY_LEN: usize = 50;
pub const MAX_TAG_LEN: usize = 20;
pub const MAX_NOTES_LEN: usize = 500;

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    CreditCard,
    DebitCard,
    BankTransfer,
    DigitalWallet,
    Check,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::DigitalWallet => "digital_wallet",
            PaymentMethod::Check => "check",
            PaymentMethod::Other => "other",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(PaymentMethod::Cash),
            "credit_card" => Some(PaymentMethod::CreditCard),
            "debit_card" => Some(PaymentMethod::DebitCard),
            "bank_transfer" => Some(PaymentMethod::BankTransfer),
            "digital_wallet" => Some(PaymentMethod::DigitalWallet),
            "check" => Some(PaymentMethod::Check),
            "other" => Some(PaymentMethod::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Recurrence bookkeeping stored on a transaction.
///
/// `next_due_date` is seeded from the transaction date on first persist and
/// is never advanced by anything in this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPattern {
    pub frequency: RecurrenceFrequency,
    pub interval: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDateTime>,
}

/// Domain model representing a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub date: NaiveDateTime,
    pub payment_method: PaymentMethod,
    pub tags: Vec<String>,
    pub is_recurring: bool,
    pub recurring_pattern: Option<RecurringPattern>,
    pub notes: Option<String>,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a transaction. The owning user is injected by
/// the service, never taken from the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurring_pattern: Option<RecurringPattern>,
    pub notes: Option<String>,
}

impl NewTransaction {
    /// Validates the payload, collecting every field failure.
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        if self.amount <= Decimal::ZERO {
            errors.push_with_value(
                "amount",
                "Amount must be a positive number",
                json!(self.amount),
            );
        }
        check_text(&mut errors, "description", &self.description, MAX_DESCRIPTION_LEN, true);
        check_text(&mut errors, "category", &self.category, MAX_CATEGORY_LEN, true);
        if let Some(subcategory) = &self.subcategory {
            check_text(&mut errors, "subcategory", subcategory, MAX_CATEGORY_LEN, false);
        }
        check_tags(&mut errors, &self.tags);
        if let Some(notes) = &self.notes {
            check_text(&mut errors, "notes", notes, MAX_NOTES_LEN, false);
        }
        if let Some(pattern) = &self.recurring_pattern {
            if pattern.interval < 1 {
                errors.push("recurringPattern.interval", "Interval must be at least 1");
            }
        }
        errors.into_result()
    }
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub payment_method: Option<PaymentMethod>,
    pub tags: Option<Vec<String>>,
    pub is_recurring: Option<bool>,
    pub recurring_pattern: Option<RecurringPattern>,
    pub notes: Option<String>,
    pub is_verified: Option<bool>,
}

impl TransactionUpdate {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        if let Some(amount) = self.amount {
            if amount <= Decimal::ZERO {
                errors.push_with_value("amount", "Amount must be a positive number", json!(amount));
            }
        }
        if let Some(description) = &self.description {
            check_text(&mut errors, "description", description, MAX_DESCRIPTION_LEN, true);
        }
        if let Some(category) = &self.category {
            check_text(&mut errors, "category", category, MAX_CATEGORY_LEN, true);
        }
        if let Some(subcategory) = &self.subcategory {
            check_text(&mut errors, "subcategory", subcategory, MAX_CATEGORY_LEN, false);
        }
        if let Some(tags) = &self.tags {
            check_tags(&mut errors, tags);
        }
        if let Some(notes) = &self.notes {
            check_text(&mut errors, "notes", notes, MAX_NOTES_LEN, false);
        }
        if let Some(pattern) = &self.recurring_pattern {
            if pattern.interval < 1 {
                errors.push("recurringPattern.interval", "Interval must be at least 1");
            }
        }
        errors.into_result()
    }

    /// Merges the provided fields into an existing transaction. Owner and id
    /// are untouched by design.
    pub fn apply(&self, transaction: &mut Transaction) {
        if let Some(transaction_type) = self.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(description) = &self.description {
            transaction.description = description.clone();
        }
        if let Some(category) = &self.category {
            transaction.category = category.clone();
        }
        if let Some(subcategory) = &self.subcategory {
            transaction.subcategory = Some(subcategory.clone());
        }
        if let Some(date) = self.date {
            transaction.date = date;
        }
        if let Some(payment_method) = self.payment_method {
            transaction.payment_method = payment_method;
        }
        if let Some(tags) = &self.tags {
            transaction.tags = tags.clone();
        }
        if let Some(is_recurring) = self.is_recurring {
            transaction.is_recurring = is_recurring;
        }
        if let Some(pattern) = &self.recurring_pattern {
            transaction.recurring_pattern = Some(pattern.clone());
        }
        if let Some(notes) = &self.notes {
            transaction.notes = Some(notes.clone());
        }
        if let Some(is_verified) = self.is_verified {
            transaction.is_verified = is_verified;
        }
    }
}

/// List filters; the known set for this resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilters {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    /// Case-insensitive substring match over description and category.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TransactionSortField {
    #[default]
    Date,
    Amount,
    Category,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TransactionSort {
    pub field: TransactionSortField,
    pub order: SortOrder,
}

fn check_text(errors: &mut FieldErrors, field: &str, value: &str, max_len: usize, required: bool) {
    if required && value.trim().is_empty() {
        errors.push(field, &format!("{} is required", capitalize(field)));
    } else if value.chars().count() > max_len {
        errors.push(
            field,
            &format!("{} cannot exceed {} characters", capitalize(field), max_len),
        );
    }
}

fn check_tags(errors: &mut FieldErrors, tags: &[String]) {
    if tags.iter().any(|t| t.chars().count() > MAX_TAG_LEN) {
        errors.push("tags", "Tag cannot be more than 20 characters");
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
