use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel::SqliteConnection;
use uuid::Uuid;

use pocketledger_core::errors::Error;
use pocketledger_core::goals::{
    Goal, GoalContribution, GoalContributionOutcome, GoalFilters, GoalRepositoryTrait,
    GoalWithContributions, NewContribution, NewGoal,
};
use pocketledger_core::pagination::{PageRequest, Paginated};
use pocketledger_core::Result;

use super::model::{GoalContributionDB, GoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{goal_contributions, goals};

/// SQL rank for priority-descending ordering; priorities are stored as text.
const PRIORITY_RANK: &str =
    "CASE priority WHEN 'urgent' THEN 3 WHEN 'high' THEN 2 WHEN 'medium' THEN 1 ELSE 0 END";

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }

    fn filtered(user_id: &str, filters: &GoalFilters) -> goals::BoxedQuery<'static, diesel::sqlite::Sqlite> {
        let mut query = goals::table
            .into_boxed()
            .filter(goals::user_id.eq(user_id.to_string()));
        if let Some(goal_type) = filters.goal_type {
            query = query.filter(goals::goal_type.eq(goal_type.as_str()));
        }
        if let Some(is_active) = filters.is_active {
            query = query.filter(goals::is_active.eq(is_active));
        }
        if let Some(is_completed) = filters.is_completed {
            query = query.filter(goals::is_completed.eq(is_completed));
        }
        query
    }

    fn load_contributions(
        conn: &mut SqliteConnection,
        goal_id: &str,
    ) -> Result<Vec<GoalContribution>> {
        let rows = goal_contributions::table
            .filter(goal_contributions::goal_id.eq(goal_id))
            .order(goal_contributions::date.asc())
            .load::<GoalContributionDB>(conn)
            .into_core()?;
        Ok(rows.into_iter().map(GoalContribution::from).collect())
    }

    fn find_owned(
        conn: &mut SqliteConnection,
        user_id: &str,
        goal_id: &str,
    ) -> Result<GoalDB> {
        goals::table
            .find(goal_id)
            .filter(goals::user_id.eq(user_id))
            .first::<GoalDB>(conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found("Goal"))
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn list(
        &self,
        user_id: &str,
        filters: &GoalFilters,
        page: &PageRequest,
    ) -> Result<Paginated<Goal>> {
        let mut conn = get_connection(&self.pool)?;

        let total: i64 = Self::filtered(user_id, filters)
            .count()
            .get_result(&mut conn)
            .into_core()?;

        let rows = Self::filtered(user_id, filters)
            .order((sql::<Integer>(PRIORITY_RANK).desc(), goals::target_date.asc()))
            .limit(page.limit)
            .offset(page.offset())
            .load::<GoalDB>(&mut conn)
            .into_core()?;

        Ok(Paginated::new(
            rows.into_iter().map(Goal::from).collect(),
            total,
            page,
        ))
    }

    fn list_all(&self, user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::user_id.eq(user_id))
            .load::<GoalDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        let row = Self::find_owned(&mut conn, user_id, goal_id)?;
        Ok(Goal::from(row))
    }

    fn get_with_contributions(
        &self,
        user_id: &str,
        goal_id: &str,
    ) -> Result<GoalWithContributions> {
        let mut conn = get_connection(&self.pool)?;
        let goal = Goal::from(Self::find_owned(&mut conn, user_id, goal_id)?);
        let contributions = Self::load_contributions(&mut conn, goal_id)?;
        Ok(GoalWithContributions {
            goal,
            contributions,
        })
    }

    async fn insert(&self, user_id: &str, new_goal: NewGoal, now: NaiveDateTime) -> Result<Goal> {
        let mut goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_goal.name,
            description: new_goal.description,
            goal_type: new_goal.goal_type,
            target_amount: new_goal.target_amount,
            current_amount: new_goal.current_amount,
            target_date: new_goal.target_date,
            start_date: new_goal.start_date.unwrap_or(now),
            is_active: new_goal.is_active,
            is_completed: false,
            completed_at: None,
            priority: new_goal.priority,
            milestones: new_goal.milestones,
            created_at: now,
            updated_at: now,
        };
        goal.apply_completion(now);
        let row = GoalDB::from(goal);

        self.writer
            .exec(move |conn| {
                let created = diesel::insert_into(goals::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result::<GoalDB>(conn)
                    .into_core()?;
                Ok(Goal::from(created))
            })
            .await
    }

    async fn update(&self, user_id: &str, mut goal: Goal, now: NaiveDateTime) -> Result<Goal> {
        // The completion invariant runs on every path that can change the
        // current amount.
        goal.apply_completion(now);
        goal.updated_at = now;
        let goal_id = goal.id.clone();
        let owner = user_id.to_string();
        let row = GoalDB::from(goal);

        self.writer
            .exec(move |conn| {
                let affected = diesel::update(
                    goals::table.find(&goal_id).filter(goals::user_id.eq(&owner)),
                )
                .set(&row)
                .execute(conn)
                .into_core()?;
                if affected == 0 {
                    return Err(Error::not_found("Goal"));
                }
                let updated = goals::table.find(&goal_id).first::<GoalDB>(conn).into_core()?;
                Ok(Goal::from(updated))
            })
            .await
    }

    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        let goal_id = goal_id.to_string();
        let owner = user_id.to_string();

        self.writer
            .exec(move |conn| {
                // Contributions go with the goal via ON DELETE CASCADE
                let deleted = diesel::delete(
                    goals::table.find(&goal_id).filter(goals::user_id.eq(&owner)),
                )
                .execute(conn)
                .into_core()?;
                if deleted == 0 {
                    return Err(Error::not_found("Goal"));
                }
                Ok(deleted)
            })
            .await
    }

    async fn add_contribution(
        &self,
        user_id: &str,
        goal_id: &str,
        contribution: NewContribution,
        now: NaiveDateTime,
    ) -> Result<GoalContributionOutcome> {
        let goal_id = goal_id.to_string();
        let owner = user_id.to_string();

        // The whole read-increment-complete-write sequence runs inside one
        // immediate transaction on the writer's connection, so concurrent
        // contributions serialize instead of losing updates.
        self.writer
            .exec(move |conn| {
                let row = Self::find_owned(conn, &owner, &goal_id)?;
                let mut goal = Goal::from(row);

                goal.current_amount += contribution.amount;
                let completed = goal.apply_completion(now);
                goal.updated_at = now;

                diesel::update(goals::table.find(&goal_id))
                    .set((
                        goals::current_amount.eq(goal.current_amount.to_string()),
                        goals::is_completed.eq(goal.is_completed),
                        goals::completed_at.eq(goal.completed_at),
                        goals::updated_at.eq(goal.updated_at),
                    ))
                    .execute(conn)
                    .into_core()?;

                let contribution_row = GoalContributionDB {
                    id: Uuid::new_v4().to_string(),
                    goal_id: goal_id.clone(),
                    amount: contribution.amount.to_string(),
                    date: now,
                    description: contribution.description,
                    source: contribution.source.as_str().to_string(),
                    created_at: now,
                };
                diesel::insert_into(goal_contributions::table)
                    .values(&contribution_row)
                    .execute(conn)
                    .into_core()?;

                let contributions = Self::load_contributions(conn, &goal_id)?;
                Ok(GoalContributionOutcome {
                    goal: GoalWithContributions {
                        goal,
                        contributions,
                    },
                    completed,
                })
            })
            .await
    }
}
