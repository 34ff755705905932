use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::budgets_model::{
    validate_budget, Budget, BudgetFilters, BudgetPerformance, BudgetUpdate, NewBudget,
};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::pagination::{PageRequest, Paginated};
use crate::transactions::TransactionRepositoryTrait;

/// Service for managing budgets and their performance view.
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            transaction_repository,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    /// At most one active budget per (user, category).
    fn check_category_conflict(
        &self,
        user_id: &str,
        category: &str,
        is_active: bool,
        exclude_id: Option<&str>,
    ) -> Result<()> {
        if !is_active {
            return Ok(());
        }
        if let Some(existing) =
            self.repository
                .find_active_for_category(user_id, category, exclude_id)?
        {
            return Err(Error::ConstraintViolation(format!(
                "An active budget for category '{}' already exists",
                existing.category
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn list_budgets(
        &self,
        user_id: &str,
        filters: &BudgetFilters,
        page: &PageRequest,
    ) -> Result<Paginated<Budget>> {
        page.validate()?;
        self.repository.list(user_id, filters, page)
    }

    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        self.repository.get_by_id(user_id, budget_id)
    }

    fn get_performance(&self, user_id: &str, budget_id: &str) -> Result<BudgetPerformance> {
        let budget = self.repository.get_by_id(user_id, budget_id)?;
        let transactions = self.transaction_repository.list_expenses_in_category(
            user_id,
            &budget.category,
            budget.start_date,
            budget.end_date,
        )?;

        let total_spent: Decimal = transactions.iter().map(|t| t.amount).sum();
        let percentage = if budget.amount > Decimal::ZERO {
            (total_spent / budget.amount * dec!(100)).min(dec!(100))
        } else {
            Decimal::ZERO
        };
        debug!(
            "Budget {} performance: spent {} of {}",
            budget.id, total_spent, budget.amount
        );

        Ok(BudgetPerformance {
            remaining: budget.amount - total_spent,
            is_over_budget: total_spent > budget.amount,
            percentage,
            total_spent,
            transactions: transactions.len() as i64,
            budget,
        })
    }

    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;
        self.check_category_conflict(user_id, &new_budget.category, new_budget.is_active, None)?;
        let created = self.repository.insert(user_id, new_budget).await?;
        self.event_sink.emit(DomainEvent::budgets_changed(user_id));
        Ok(created)
    }

    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget> {
        let mut budget = self.repository.get_by_id(user_id, budget_id)?;
        update.apply(&mut budget);
        // Same invariants as create, against the merged record
        validate_budget(&budget)?;
        self.check_category_conflict(
            user_id,
            &budget.category,
            budget.is_active,
            Some(budget_id),
        )?;
        let updated = self.repository.update(user_id, budget).await?;
        self.event_sink.emit(DomainEvent::budgets_changed(user_id));
        Ok(updated)
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<()> {
        self.repository.delete(user_id, budget_id).await?;
        self.event_sink.emit(DomainEvent::budgets_changed(user_id));
        Ok(())
    }
}
