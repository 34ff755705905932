use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use log::debug;

use super::goals_model::{
    compute_goal_stats, validate_goal, Goal, GoalFilters, GoalStats, GoalUpdate,
    GoalWithContributions, NewContribution, NewGoal,
};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::pagination::{PageRequest, Paginated};

/// Service for managing goals, contributions and goal statistics.
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        Self {
            repository,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn list_goals(
        &self,
        user_id: &str,
        filters: &GoalFilters,
        page: &PageRequest,
    ) -> Result<Paginated<Goal>> {
        page.validate()?;
        self.repository.list(user_id, filters, page)
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalWithContributions> {
        self.repository.get_with_contributions(user_id, goal_id)
    }

    fn get_stats(&self, user_id: &str) -> Result<GoalStats> {
        let goals = self.repository.list_all(user_id)?;
        Ok(compute_goal_stats(&goals, self.now()))
    }

    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        let now = self.now();
        new_goal.validate(now)?;
        let created = self.repository.insert(user_id, new_goal, now).await?;
        self.event_sink.emit(DomainEvent::goals_changed(user_id));
        if created.is_completed {
            self.event_sink
                .emit(DomainEvent::goal_completed(user_id, &created.id));
        }
        Ok(created)
    }

    async fn update_goal(&self, user_id: &str, goal_id: &str, update: GoalUpdate) -> Result<Goal> {
        let now = self.now();
        let existing = self.repository.get_by_id(user_id, goal_id)?;
        let was_completed = existing.is_completed;

        let mut goal = existing;
        update.apply(&mut goal);
        validate_goal(&goal)?;
        // The repository re-applies the completion invariant inside its
        // write transaction; this call just keeps the merged snapshot honest.
        goal.apply_completion(now);

        let updated = self.repository.update(user_id, goal, now).await?;
        self.event_sink.emit(DomainEvent::goals_changed(user_id));
        if updated.is_completed && !was_completed {
            self.event_sink
                .emit(DomainEvent::goal_completed(user_id, &updated.id));
        }
        Ok(updated)
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        self.repository.delete(user_id, goal_id).await?;
        self.event_sink.emit(DomainEvent::goals_changed(user_id));
        Ok(())
    }

    async fn contribute(
        &self,
        user_id: &str,
        goal_id: &str,
        contribution: NewContribution,
    ) -> Result<GoalWithContributions> {
        contribution.validate()?;
        debug!(
            "Adding contribution of {} to goal {} for user {}",
            contribution.amount, goal_id, user_id
        );
        let outcome = self
            .repository
            .add_contribution(user_id, goal_id, contribution, self.now())
            .await?;
        self.event_sink.emit(DomainEvent::goals_changed(user_id));
        if outcome.completed {
            self.event_sink
                .emit(DomainEvent::goal_completed(user_id, &outcome.goal.goal.id));
        }
        Ok(outcome.goal)
    }
}
