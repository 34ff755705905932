//! Budget repository and service traits.

use async_trait::async_trait;

use super::budgets_model::{Budget, BudgetFilters, BudgetPerformance, BudgetUpdate, NewBudget};
use crate::errors::Result;
use crate::pagination::{PageRequest, Paginated};

/// Trait defining the contract for Budget repository operations.
///
/// All methods are scoped to the owning user.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// One page of a user's budgets, newest first.
    fn list(
        &self,
        user_id: &str,
        filters: &BudgetFilters,
        page: &PageRequest,
    ) -> Result<Paginated<Budget>>;

    fn get_by_id(&self, user_id: &str, budget_id: &str) -> Result<Budget>;

    /// Another active budget for the same category, if one exists. Used to
    /// enforce the one-active-budget-per-category rule; `exclude_id` skips
    /// the budget being updated.
    fn find_active_for_category(
        &self,
        user_id: &str,
        category: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<Budget>>;

    async fn insert(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;

    async fn update(&self, user_id: &str, budget: Budget) -> Result<Budget>;

    async fn delete(&self, user_id: &str, budget_id: &str) -> Result<usize>;
}

/// Trait defining the contract for Budget service operations.
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn list_budgets(
        &self,
        user_id: &str,
        filters: &BudgetFilters,
        page: &PageRequest,
    ) -> Result<Paginated<Budget>>;

    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget>;

    /// Spend-vs-limit view computed from the user's matching expense
    /// transactions. NotFound when the budget is absent or foreign-owned.
    fn get_performance(&self, user_id: &str, budget_id: &str) -> Result<BudgetPerformance>;

    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;

    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget>;

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<()>;
}
