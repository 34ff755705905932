//! Goal domain models, derivations and the completion invariant.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::{FieldErrors, Result};
use crate::utils::{days_until, months_until};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_CONTRIBUTION_DESCRIPTION_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    #[default]
    Savings,
    DebtPayment,
    Investment,
    Purchase,
    EmergencyFund,
    Other,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Savings => "savings",
            GoalType::DebtPayment => "debt_payment",
            GoalType::Investment => "investment",
            GoalType::Purchase => "purchase",
            GoalType::EmergencyFund => "emergency_fund",
            GoalType::Other => "other",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "savings" => Some(GoalType::Savings),
            "debt_payment" => Some(GoalType::DebtPayment),
            "investment" => Some(GoalType::Investment),
            "purchase" => Some(GoalType::Purchase),
            "emergency_fund" => Some(GoalType::EmergencyFund),
            "other" => Some(GoalType::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl GoalPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPriority::Low => "low",
            GoalPriority::Medium => "medium",
            GoalPriority::High => "high",
            GoalPriority::Urgent => "urgent",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(GoalPriority::Low),
            "medium" => Some(GoalPriority::Medium),
            "high" => Some(GoalPriority::High),
            "urgent" => Some(GoalPriority::Urgent),
            _ => None,
        }
    }

    /// Sort rank for priority-descending list ordering.
    pub fn rank(&self) -> i32 {
        match self {
            GoalPriority::Low => 0,
            GoalPriority::Medium => 1,
            GoalPriority::High => 2,
            GoalPriority::Urgent => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContributionSource {
    #[default]
    Manual,
    Automatic,
    Transfer,
}

impl ContributionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributionSource::Manual => "manual",
            ContributionSource::Automatic => "automatic",
            ContributionSource::Transfer => "transfer",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(ContributionSource::Manual),
            "automatic" => Some(ContributionSource::Automatic),
            "transfer" => Some(ContributionSource::Transfer),
            _ => None,
        }
    }
}

/// An intermediate checkpoint on the way to the target amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDateTime>,
}

/// A single recorded payment toward a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalContribution {
    pub id: String,
    pub goal_id: String,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub source: ContributionSource,
}

/// Domain model representing a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: NaiveDateTime,
    pub start_date: NaiveDateTime,
    pub is_active: bool,
    pub is_completed: bool,
    pub completed_at: Option<NaiveDateTime>,
    pub priority: GoalPriority,
    pub milestones: Vec<Milestone>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Progress view; percentage is capped at 100 for display, remaining never
/// goes negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub percentage: Decimal,
    pub amount: Decimal,
    pub target: Decimal,
    pub remaining: Decimal,
}

/// Lifecycle bucket for a goal.
///
/// Precedence is fixed: completed > achieved > overdue > percentage buckets,
/// so an overdue goal at 95% reads as overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Completed,
    Achieved,
    Overdue,
    AlmostThere,
    GoodProgress,
    JustStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalTimeStatus {
    Overdue,
    DueToday,
    DueSoon,
    DueThisMonth,
    PlentyOfTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTimeRemaining {
    pub days: i64,
    pub status: GoalTimeStatus,
}

impl Goal {
    pub fn progress(&self) -> GoalProgress {
        let percentage = if self.target_amount > Decimal::ZERO {
            (self.current_amount / self.target_amount * dec!(100)).min(dec!(100))
        } else {
            Decimal::ZERO
        };
        GoalProgress {
            percentage,
            amount: self.current_amount,
            target: self.target_amount,
            remaining: (self.target_amount - self.current_amount).max(Decimal::ZERO),
        }
    }

    pub fn status(&self, now: NaiveDateTime) -> GoalStatus {
        if self.is_completed {
            return GoalStatus::Completed;
        }
        if self.current_amount >= self.target_amount {
            return GoalStatus::Achieved;
        }
        if now > self.target_date {
            return GoalStatus::Overdue;
        }
        let percentage = self.progress().percentage;
        if percentage >= dec!(90) {
            GoalStatus::AlmostThere
        } else if percentage >= dec!(50) {
            GoalStatus::GoodProgress
        } else {
            GoalStatus::JustStarted
        }
    }

    pub fn time_remaining(&self, now: NaiveDateTime) -> GoalTimeRemaining {
        let days = days_until(now, self.target_date);
        let (days, status) = match days {
            d if d < 0 => (0, GoalTimeStatus::Overdue),
            0 => (0, GoalTimeStatus::DueToday),
            d if d <= 7 => (d, GoalTimeStatus::DueSoon),
            d if d <= 30 => (d, GoalTimeStatus::DueThisMonth),
            d => (d, GoalTimeStatus::PlentyOfTime),
        };
        GoalTimeRemaining { days, status }
    }

    /// Even spread of the outstanding amount over the 30-day months left
    /// until the target date; 0 once the date has passed.
    pub fn suggested_monthly_contribution(&self, now: NaiveDateTime) -> Decimal {
        let months = months_until(now, self.target_date);
        if months <= 0 {
            return Decimal::ZERO;
        }
        ((self.target_amount - self.current_amount) / Decimal::from(months)).ceil()
    }

    /// The completion invariant: once the current amount reaches the target,
    /// the goal is completed and stamped. Must be invoked by every write path
    /// that can change `current_amount` (create, update, contribute).
    ///
    /// Idempotent: `completed_at` is set on the transition only and never
    /// overwritten. Returns whether the transition happened.
    pub fn apply_completion(&mut self, now: NaiveDateTime) -> bool {
        if self.current_amount >= self.target_amount && !self.is_completed {
            self.is_completed = true;
            self.completed_at = Some(now);
            true
        } else {
            false
        }
    }
}

/// Input model for creating a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub goal_type: GoalType,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub target_date: NaiveDateTime,
    pub start_date: Option<NaiveDateTime>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub priority: GoalPriority,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

fn default_true() -> bool {
    true
}

impl NewGoal {
    /// Validates the payload. The future-date rule applies at creation only.
    pub fn validate(&self, now: NaiveDateTime) -> Result<()> {
        let mut errors = FieldErrors::new();
        check_common_fields(
            &mut errors,
            &self.name,
            self.description.as_deref(),
            self.target_amount,
            self.current_amount,
            &self.milestones,
        );
        if self.target_date <= now {
            errors.push("targetDate", "Target date must be in the future");
        }
        errors.into_result()
    }
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub goal_type: Option<GoalType>,
    pub target_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    pub target_date: Option<NaiveDateTime>,
    pub is_active: Option<bool>,
    pub priority: Option<GoalPriority>,
    pub milestones: Option<Vec<Milestone>>,
}

impl GoalUpdate {
    pub fn apply(&self, goal: &mut Goal) {
        if let Some(name) = &self.name {
            goal.name = name.clone();
        }
        if let Some(description) = &self.description {
            goal.description = Some(description.clone());
        }
        if let Some(goal_type) = self.goal_type {
            goal.goal_type = goal_type;
        }
        if let Some(target_amount) = self.target_amount {
            goal.target_amount = target_amount;
        }
        if let Some(current_amount) = self.current_amount {
            goal.current_amount = current_amount;
        }
        if let Some(target_date) = self.target_date {
            goal.target_date = target_date;
        }
        if let Some(is_active) = self.is_active {
            goal.is_active = is_active;
        }
        if let Some(priority) = self.priority {
            goal.priority = priority;
        }
        if let Some(milestones) = &self.milestones {
            goal.milestones = milestones.clone();
        }
    }
}

/// Re-runs shape invariants against a merged goal on update. The future-date
/// rule is create-only, so it is deliberately absent here.
pub fn validate_goal(goal: &Goal) -> Result<()> {
    let mut errors = FieldErrors::new();
    check_common_fields(
        &mut errors,
        &goal.name,
        goal.description.as_deref(),
        goal.target_amount,
        goal.current_amount,
        &goal.milestones,
    );
    errors.into_result()
}

fn check_common_fields(
    errors: &mut FieldErrors,
    name: &str,
    description: Option<&str>,
    target_amount: Decimal,
    current_amount: Decimal,
    milestones: &[Milestone],
) {
    if name.trim().is_empty() {
        errors.push("name", "Goal name is required");
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.push("name", "Goal name cannot exceed 100 characters");
    }
    if let Some(description) = description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push("description", "Description cannot exceed 500 characters");
        }
    }
    if target_amount <= Decimal::ZERO {
        errors.push_with_value(
            "targetAmount",
            "Target amount must be a positive number",
            json!(target_amount),
        );
    }
    if current_amount < Decimal::ZERO {
        errors.push_with_value(
            "currentAmount",
            "Current amount cannot be negative",
            json!(current_amount),
        );
    }
    for milestone in milestones {
        if milestone.name.trim().is_empty() {
            errors.push("milestones", "Milestone name is required");
        }
        if milestone.target_amount < Decimal::ZERO {
            errors.push("milestones", "Milestone target amount cannot be negative");
        }
    }
}

/// Contribution payload; the repository stamps id and date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContribution {
    pub amount: Decimal,
    pub description: Option<String>,
    #[serde(default)]
    pub source: ContributionSource,
}

impl NewContribution {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        if self.amount <= Decimal::ZERO {
            errors.push_with_value(
                "amount",
                "Valid contribution amount is required",
                json!(self.amount),
            );
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_CONTRIBUTION_DESCRIPTION_LEN {
                errors.push("description", "Description cannot exceed 200 characters");
            }
        }
        errors.into_result()
    }
}

/// Goal with its contribution history, the detail-view payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalWithContributions {
    #[serde(flatten)]
    pub goal: Goal,
    pub contributions: Vec<GoalContribution>,
}

/// Result of a contribution, including whether it completed the goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalContributionOutcome {
    pub goal: GoalWithContributions,
    /// True when this contribution pushed the goal over its target.
    pub completed: bool,
}

/// List filters; the known set for this resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalFilters {
    #[serde(rename = "type")]
    pub goal_type: Option<GoalType>,
    pub is_active: Option<bool>,
    pub is_completed: Option<bool>,
}

/// Portfolio-level goal statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStats {
    pub total: i64,
    pub active: i64,
    pub completed: i64,
    pub overdue: i64,
    pub total_target_amount: Decimal,
    pub total_current_amount: Decimal,
    pub overall_progress: Decimal,
}

/// Folds a user's goals into aggregate statistics. Pure so it can be tested
/// without a repository.
pub fn compute_goal_stats(goals: &[Goal], now: NaiveDateTime) -> GoalStats {
    let total_target_amount: Decimal = goals.iter().map(|g| g.target_amount).sum();
    let total_current_amount: Decimal = goals.iter().map(|g| g.current_amount).sum();
    let overall_progress = if total_target_amount > Decimal::ZERO {
        total_current_amount / total_target_amount * dec!(100)
    } else {
        Decimal::ZERO
    };

    GoalStats {
        total: goals.len() as i64,
        active: goals.iter().filter(|g| g.is_active && !g.is_completed).count() as i64,
        completed: goals.iter().filter(|g| g.is_completed).count() as i64,
        overdue: goals
            .iter()
            .filter(|g| g.status(now) == GoalStatus::Overdue)
            .count() as i64,
        total_target_amount,
        total_current_amount,
        overall_progress,
    }
}
