//! Domain event types.

use serde::{Deserialize, Serialize};

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about domain data changes. Runtime adapters
/// translate them into platform-specific actions (notification fan-out,
/// client refresh hints, etc.).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Transactions were created, updated, or deleted.
    TransactionsChanged { user_id: String },

    /// Budgets were created, updated, or deleted.
    BudgetsChanged { user_id: String },

    /// Goals were created, updated, deleted, or contributed to.
    GoalsChanged { user_id: String },

    /// A goal crossed its target amount and was marked completed.
    /// Emitted on the transition only, never on re-saves of a completed goal.
    GoalCompleted { user_id: String, goal_id: String },
}

impl DomainEvent {
    pub fn transactions_changed(user_id: &str) -> Self {
        Self::TransactionsChanged {
            user_id: user_id.to_string(),
        }
    }

    pub fn budgets_changed(user_id: &str) -> Self {
        Self::BudgetsChanged {
            user_id: user_id.to_string(),
        }
    }

    pub fn goals_changed(user_id: &str) -> Self {
        Self::GoalsChanged {
            user_id: user_id.to_string(),
        }
    }

    pub fn goal_completed(user_id: &str, goal_id: &str) -> Self {
        Self::GoalCompleted {
            user_id: user_id.to_string(),
            goal_id: goal_id.to_string(),
        }
    }

    /// Owning user of the event, for per-user fan-out.
    pub fn user_id(&self) -> &str {
        match self {
            Self::TransactionsChanged { user_id }
            | Self::BudgetsChanged { user_id }
            | Self::GoalsChanged { user_id }
            | Self::GoalCompleted { user_id, .. } => user_id,
        }
    }
}
