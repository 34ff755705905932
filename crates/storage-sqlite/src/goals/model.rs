//! Database models for goals and their contributions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use pocketledger_core::goals::{
    ContributionSource, Goal, GoalContribution, GoalPriority, GoalType, Milestone,
};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub goal_type: String,
    pub target_amount: String,
    pub current_amount: String,
    pub target_date: NaiveDateTime,
    pub start_date: NaiveDateTime,
    pub is_active: bool,
    pub is_completed: bool,
    pub completed_at: Option<NaiveDateTime>,
    pub priority: String,
    pub milestones: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(
    Queryable, Identifiable, Associations, Insertable, AsChangeset, Selectable, PartialEq, Debug,
    Clone,
)]
#[diesel(belongs_to(GoalDB, foreign_key = goal_id))]
#[diesel(table_name = crate::schema::goal_contributions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalContributionDB {
    pub id: String,
    pub goal_id: String,
    pub amount: String,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub source: String,
    pub created_at: NaiveDateTime,
}

impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Goal {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            description: db.description,
            goal_type: GoalType::parse_str(&db.goal_type).unwrap_or_default(),
            target_amount: db.target_amount.parse().unwrap_or(Decimal::ZERO),
            current_amount: db.current_amount.parse().unwrap_or(Decimal::ZERO),
            target_date: db.target_date,
            start_date: db.start_date,
            is_active: db.is_active,
            is_completed: db.is_completed,
            completed_at: db.completed_at,
            priority: GoalPriority::parse_str(&db.priority).unwrap_or_default(),
            milestones: serde_json::from_str::<Vec<Milestone>>(&db.milestones).unwrap_or_default(),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Goal> for GoalDB {
    fn from(goal: Goal) -> Self {
        GoalDB {
            id: goal.id,
            user_id: goal.user_id,
            name: goal.name,
            description: goal.description,
            goal_type: goal.goal_type.as_str().to_string(),
            target_amount: goal.target_amount.to_string(),
            current_amount: goal.current_amount.to_string(),
            target_date: goal.target_date,
            start_date: goal.start_date,
            is_active: goal.is_active,
            is_completed: goal.is_completed,
            completed_at: goal.completed_at,
            priority: goal.priority.as_str().to_string(),
            milestones: serde_json::to_string(&goal.milestones)
                .unwrap_or_else(|_| "[]".to_string()),
            created_at: goal.created_at,
            updated_at: goal.updated_at,
        }
    }
}

impl From<GoalContributionDB> for GoalContribution {
    fn from(db: GoalContributionDB) -> Self {
        GoalContribution {
            id: db.id,
            goal_id: db.goal_id,
            amount: db.amount.parse().unwrap_or(Decimal::ZERO),
            date: db.date,
            description: db.description,
            source: ContributionSource::parse_str(&db.source).unwrap_or_default(),
        }
    }
}
