//! Database models for transactions.
//!
//! Money is stored as TEXT and parsed to `Decimal` on the way out; tags and
//! the recurring pattern are JSON columns.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use pocketledger_core::transactions::{
    PaymentMethod, RecurringPattern, Transaction, TransactionType,
};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub transaction_type: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub date: NaiveDateTime,
    pub payment_method: String,
    pub tags: String,
    pub is_recurring: bool,
    pub recurring_pattern: Option<String>,
    pub notes: Option<String>,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Transaction {
            id: db.id,
            user_id: db.user_id,
            transaction_type: TransactionType::parse_str(&db.transaction_type)
                .unwrap_or(TransactionType::Expense),
            amount: db.amount.to_string().parse().unwrap_or(Decimal::ZERO),
            description: db.description,
            category: db.category,
            subcategory: db.subcategory,
            date: db.date,
            payment_method: PaymentMethod::parse_str(&db.payment_method).unwrap_or_default(),
            tags: serde_json::from_str(&db.tags).unwrap_or_default(),
            is_recurring: db.is_recurring,
            recurring_pattern: db
                .recurring_pattern
                .as_deref()
                .and_then(|json| serde_json::from_str::<RecurringPattern>(json).ok()),
            notes: db.notes,
            is_verified: db.is_verified,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Transaction> for TransactionDB {
    fn from(transaction: Transaction) -> Self {
        TransactionDB {
            id: transaction.id,
            user_id: transaction.user_id,
            transaction_type: transaction.transaction_type.as_str().to_string(),
            amount: transaction.amount.to_string().parse().unwrap_or(0.0),
            description: transaction.description,
            category: transaction.category,
            subcategory: transaction.subcategory,
            date: transaction.date,
            payment_method: transaction.payment_method.as_str().to_string(),
            tags: serde_json::to_string(&transaction.tags).unwrap_or_else(|_| "[]".to_string()),
            is_recurring: transaction.is_recurring,
            recurring_pattern: transaction
                .recurring_pattern
                .as_ref()
                .and_then(|pattern| serde_json::to_string(pattern).ok()),
            notes: transaction.notes,
            is_verified: transaction.is_verified,
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        }
    }
}
