//! Goal repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::goals_model::{
    Goal, GoalContributionOutcome, GoalFilters, GoalStats, GoalUpdate, GoalWithContributions,
    NewContribution, NewGoal,
};
use crate::errors::Result;
use crate::pagination::{PageRequest, Paginated};

/// Trait defining the contract for Goal repository operations.
///
/// All methods are scoped to the owning user. Mutating methods take the
/// caller's clock so timestamps and the completion invariant see one
/// consistent `now`.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// One page of a user's goals, priority descending then target date
    /// ascending.
    fn list(
        &self,
        user_id: &str,
        filters: &GoalFilters,
        page: &PageRequest,
    ) -> Result<Paginated<Goal>>;

    /// Every goal the user owns, for statistics.
    fn list_all(&self, user_id: &str) -> Result<Vec<Goal>>;

    fn get_by_id(&self, user_id: &str, goal_id: &str) -> Result<Goal>;

    fn get_with_contributions(&self, user_id: &str, goal_id: &str)
        -> Result<GoalWithContributions>;

    async fn insert(&self, user_id: &str, new_goal: NewGoal, now: NaiveDateTime) -> Result<Goal>;

    async fn update(&self, user_id: &str, goal: Goal, now: NaiveDateTime) -> Result<Goal>;

    async fn delete(&self, user_id: &str, goal_id: &str) -> Result<usize>;

    /// Appends a contribution and increments the goal's current amount as a
    /// single atomic unit, applying the completion invariant inside the same
    /// transaction. Concurrent contributions must not lose updates.
    async fn add_contribution(
        &self,
        user_id: &str,
        goal_id: &str,
        contribution: NewContribution,
        now: NaiveDateTime,
    ) -> Result<GoalContributionOutcome>;
}

/// Trait defining the contract for Goal service operations.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn list_goals(
        &self,
        user_id: &str,
        filters: &GoalFilters,
        page: &PageRequest,
    ) -> Result<Paginated<Goal>>;

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalWithContributions>;

    fn get_stats(&self, user_id: &str) -> Result<GoalStats>;

    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;

    async fn update_goal(&self, user_id: &str, goal_id: &str, update: GoalUpdate) -> Result<Goal>;

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;

    async fn contribute(
        &self,
        user_id: &str,
        goal_id: &str,
        contribution: NewContribution,
    ) -> Result<GoalWithContributions>;
}
