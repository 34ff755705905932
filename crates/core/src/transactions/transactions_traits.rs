//! Transaction repository and service traits.
//!
//! These traits define the contract for transaction operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionFilters, TransactionSort, TransactionUpdate,
};
use crate::errors::Result;
use crate::pagination::{PageRequest, Paginated};

/// Trait defining the contract for Transaction repository operations.
///
/// Every method is scoped to an owning user; implementations must filter by
/// `user_id` so foreign-owned rows behave exactly like absent ones.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Lists one page of a user's transactions matching the filters.
    fn search(
        &self,
        user_id: &str,
        filters: &TransactionFilters,
        sort: &TransactionSort,
        page: &PageRequest,
    ) -> Result<Paginated<Transaction>>;

    /// Retrieves a single owned transaction.
    fn get_by_id(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;

    /// All of a user's transactions inside an optional inclusive date window,
    /// in date order. Used by the aggregation layer.
    fn list_in_range(
        &self,
        user_id: &str,
        start_date: Option<NaiveDateTime>,
        end_date: Option<NaiveDateTime>,
    ) -> Result<Vec<Transaction>>;

    /// Expense transactions for one category inside an inclusive window.
    /// Used for budget performance.
    fn list_expenses_in_category(
        &self,
        user_id: &str,
        category: &str,
        start_date: NaiveDateTime,
        end_date: NaiveDateTime,
    ) -> Result<Vec<Transaction>>;

    /// Persists a new transaction; the implementation assigns the id and
    /// timestamps.
    async fn insert(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction>;

    /// Persists a fully merged transaction for its owner.
    async fn update(&self, user_id: &str, transaction: Transaction) -> Result<Transaction>;

    /// Hard-deletes an owned transaction, returning the deleted row count.
    async fn delete(&self, user_id: &str, transaction_id: &str) -> Result<usize>;
}

/// Trait defining the contract for Transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn list_transactions(
        &self,
        user_id: &str,
        filters: &TransactionFilters,
        sort: &TransactionSort,
        page: &PageRequest,
    ) -> Result<Paginated<Transaction>>;

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;

    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;

    async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<()>;
}
