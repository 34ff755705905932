use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use pocketledger_core::budgets::{
    Budget, BudgetFilters, BudgetRepositoryTrait, NewBudget,
};
use pocketledger_core::errors::Error;
use pocketledger_core::pagination::{PageRequest, Paginated};
use pocketledger_core::Result;

use super::model::BudgetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::budgets;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn list(
        &self,
        user_id: &str,
        filters: &BudgetFilters,
        page: &PageRequest,
    ) -> Result<Paginated<Budget>> {
        let mut conn = get_connection(&self.pool)?;

        let mut count_query = budgets::table
            .into_boxed()
            .filter(budgets::user_id.eq(user_id.to_string()));
        let mut query = budgets::table
            .into_boxed()
            .filter(budgets::user_id.eq(user_id.to_string()));
        if let Some(is_active) = filters.is_active {
            count_query = count_query.filter(budgets::is_active.eq(is_active));
            query = query.filter(budgets::is_active.eq(is_active));
        }

        let total: i64 = count_query.count().get_result(&mut conn).into_core()?;
        let rows = query
            .order(budgets::created_at.desc())
            .limit(page.limit)
            .offset(page.offset())
            .load::<BudgetDB>(&mut conn)
            .into_core()?;

        Ok(Paginated::new(
            rows.into_iter().map(Budget::from).collect(),
            total,
            page,
        ))
    }

    fn get_by_id(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets::table
            .find(budget_id)
            .filter(budgets::user_id.eq(user_id))
            .first::<BudgetDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found("Budget"))?;
        Ok(Budget::from(row))
    }

    fn find_active_for_category(
        &self,
        user_id: &str,
        category: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = budgets::table
            .into_boxed()
            .filter(budgets::user_id.eq(user_id.to_string()))
            .filter(budgets::category.eq(category.to_string()))
            .filter(budgets::is_active.eq(true));
        if let Some(exclude_id) = exclude_id {
            query = query.filter(budgets::id.ne(exclude_id.to_string()));
        }
        let row = query.first::<BudgetDB>(&mut conn).optional().into_core()?;
        Ok(row.map(Budget::from))
    }

    async fn insert(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        let now = Utc::now().naive_utc();
        let budget = Budget {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_budget.name,
            description: new_budget.description,
            category: new_budget.category,
            amount: new_budget.amount,
            period: new_budget.period,
            start_date: new_budget.start_date,
            end_date: new_budget.end_date,
            is_active: new_budget.is_active,
            alert_thresholds: new_budget.alert_thresholds,
            created_at: now,
            updated_at: now,
        };
        let row = BudgetDB::from(budget);

        self.writer
            .exec(move |conn| {
                let created = diesel::insert_into(budgets::table)
                    .values(&row)
                    .returning(BudgetDB::as_returning())
                    .get_result::<BudgetDB>(conn)
                    .into_core()?;
                Ok(Budget::from(created))
            })
            .await
    }

    async fn update(&self, user_id: &str, mut budget: Budget) -> Result<Budget> {
        budget.updated_at = Utc::now().naive_utc();
        let budget_id = budget.id.clone();
        let owner = user_id.to_string();
        let row = BudgetDB::from(budget);

        self.writer
            .exec(move |conn| {
                let affected = diesel::update(
                    budgets::table
                        .find(&budget_id)
                        .filter(budgets::user_id.eq(&owner)),
                )
                .set(&row)
                .execute(conn)
                .into_core()?;
                if affected == 0 {
                    return Err(Error::not_found("Budget"));
                }
                let updated = budgets::table
                    .find(&budget_id)
                    .first::<BudgetDB>(conn)
                    .into_core()?;
                Ok(Budget::from(updated))
            })
            .await
    }

    async fn delete(&self, user_id: &str, budget_id: &str) -> Result<usize> {
        let budget_id = budget_id.to_string();
        let owner = user_id.to_string();

        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(
                    budgets::table
                        .find(&budget_id)
                        .filter(budgets::user_id.eq(&owner)),
                )
                .execute(conn)
                .into_core()?;
                if deleted == 0 {
                    return Err(Error::not_found("Budget"));
                }
                Ok(deleted)
            })
            .await
    }
}
