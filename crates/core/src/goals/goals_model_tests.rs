//! Tests for goal derivations and the completion invariant.

#[cfg(test)]
mod tests {
    use crate::goals::goals_model::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn goal(target: Decimal, current: Decimal, target_date: NaiveDateTime) -> Goal {
        Goal {
            id: "g-1".to_string(),
            user_id: "u-1".to_string(),
            name: "Emergency fund".to_string(),
            description: None,
            goal_type: GoalType::EmergencyFund,
            target_amount: target,
            current_amount: current,
            target_date,
            start_date: at(2024, 1, 1),
            is_active: true,
            is_completed: false,
            completed_at: None,
            priority: GoalPriority::High,
            milestones: vec![],
            created_at: at(2024, 1, 1),
            updated_at: at(2024, 1, 1),
        }
    }

    #[test]
    fn test_progress_caps_percentage_at_100() {
        let g = goal(dec!(1000), dec!(1500), at(2024, 12, 31));
        let progress = g.progress();
        assert_eq!(progress.percentage, dec!(100));
        assert_eq!(progress.remaining, dec!(0));
        assert_eq!(progress.amount, dec!(1500));
    }

    #[test]
    fn test_progress_midway() {
        let g = goal(dec!(1000), dec!(250), at(2024, 12, 31));
        let progress = g.progress();
        assert_eq!(progress.percentage, dec!(25));
        assert_eq!(progress.remaining, dec!(750));
    }

    #[test]
    fn test_status_precedence_completed_first() {
        let mut g = goal(dec!(1000), dec!(1000), at(2024, 12, 31));
        g.is_completed = true;
        assert_eq!(g.status(at(2024, 6, 1)), GoalStatus::Completed);
    }

    #[test]
    fn test_status_achieved_without_flag() {
        let g = goal(dec!(1000), dec!(1200), at(2024, 12, 31));
        assert_eq!(g.status(at(2024, 6, 1)), GoalStatus::Achieved);
    }

    #[test]
    fn test_status_overdue_beats_percentage_buckets() {
        // 95% progress but past the target date reads as overdue
        let g = goal(dec!(1000), dec!(950), at(2024, 3, 1));
        assert_eq!(g.status(at(2024, 6, 1)), GoalStatus::Overdue);
    }

    #[test]
    fn test_status_percentage_buckets() {
        let now = at(2024, 6, 1);
        let due = at(2024, 12, 31);
        assert_eq!(goal(dec!(1000), dec!(950), due).status(now), GoalStatus::AlmostThere);
        assert_eq!(goal(dec!(1000), dec!(600), due).status(now), GoalStatus::GoodProgress);
        assert_eq!(goal(dec!(1000), dec!(100), due).status(now), GoalStatus::JustStarted);
    }

    #[test]
    fn test_time_remaining_buckets() {
        let now = at(2024, 6, 1);
        let g = goal(dec!(1000), dec!(0), now + Duration::days(3));
        assert_eq!(g.time_remaining(now).status, GoalTimeStatus::DueSoon);

        let g = goal(dec!(1000), dec!(0), now + Duration::days(20));
        let remaining = g.time_remaining(now);
        assert_eq!(remaining.status, GoalTimeStatus::DueThisMonth);
        assert_eq!(remaining.days, 20);

        let g = goal(dec!(1000), dec!(0), now + Duration::days(120));
        assert_eq!(g.time_remaining(now).status, GoalTimeStatus::PlentyOfTime);

        let g = goal(dec!(1000), dec!(0), now - Duration::days(5));
        let remaining = g.time_remaining(now);
        assert_eq!(remaining.status, GoalTimeStatus::Overdue);
        assert_eq!(remaining.days, 0);

        let g = goal(dec!(1000), dec!(0), now);
        assert_eq!(g.time_remaining(now).status, GoalTimeStatus::DueToday);
    }

    #[test]
    fn test_suggested_contribution_spreads_over_months() {
        let now = at(2024, 6, 1);
        // 60 days out -> 2 thirty-day months -> ceil(1000/2) = 500
        let g = goal(dec!(1000), dec!(0), now + Duration::days(60));
        assert_eq!(g.suggested_monthly_contribution(now), dec!(500));
    }

    #[test]
    fn test_suggested_contribution_rounds_up() {
        let now = at(2024, 6, 1);
        let g = goal(dec!(1000), dec!(0), now + Duration::days(90));
        // ceil(1000/3) = 334
        assert_eq!(g.suggested_monthly_contribution(now), dec!(334));
    }

    #[test]
    fn test_suggested_contribution_zero_after_target_date() {
        let now = at(2024, 6, 1);
        let g = goal(dec!(1000), dec!(0), now - Duration::days(10));
        assert_eq!(g.suggested_monthly_contribution(now), Decimal::ZERO);
    }

    #[test]
    fn test_apply_completion_transitions_once() {
        let mut g = goal(dec!(1000), dec!(1000), at(2024, 12, 31));
        let first = at(2024, 6, 1);
        assert!(g.apply_completion(first));
        assert!(g.is_completed);
        assert_eq!(g.completed_at, Some(first));

        // Re-applying later must not move the completion timestamp
        assert!(!g.apply_completion(at(2024, 7, 1)));
        assert_eq!(g.completed_at, Some(first));
    }

    #[test]
    fn test_apply_completion_noop_below_target() {
        let mut g = goal(dec!(1000), dec!(999.99), at(2024, 12, 31));
        assert!(!g.apply_completion(at(2024, 6, 1)));
        assert!(!g.is_completed);
        assert!(g.completed_at.is_none());
    }

    #[test]
    fn test_new_goal_requires_future_target_date() {
        let now = at(2024, 6, 1);
        let new_goal = NewGoal {
            name: "Car".to_string(),
            description: None,
            goal_type: GoalType::Purchase,
            target_amount: dec!(5000),
            current_amount: dec!(0),
            target_date: at(2024, 5, 1),
            start_date: None,
            is_active: true,
            priority: GoalPriority::Medium,
            milestones: vec![],
        };
        assert!(new_goal.validate(now).is_err());
    }

    #[test]
    fn test_new_goal_rejects_nonpositive_target() {
        let now = at(2024, 6, 1);
        let new_goal = NewGoal {
            name: "Car".to_string(),
            description: None,
            goal_type: GoalType::Purchase,
            target_amount: dec!(0),
            current_amount: dec!(0),
            target_date: at(2024, 12, 1),
            start_date: None,
            is_active: true,
            priority: GoalPriority::Medium,
            milestones: vec![],
        };
        assert!(new_goal.validate(now).is_err());
    }

    #[test]
    fn test_contribution_requires_positive_amount() {
        let contribution = NewContribution {
            amount: dec!(0),
            description: None,
            source: ContributionSource::Manual,
        };
        assert!(contribution.validate().is_err());

        let contribution = NewContribution {
            amount: dec!(25),
            description: None,
            source: ContributionSource::Manual,
        };
        assert!(contribution.validate().is_ok());
    }

    #[test]
    fn test_goal_stats_fold() {
        let now = at(2024, 6, 1);
        let mut completed = goal(dec!(500), dec!(500), at(2024, 12, 31));
        completed.apply_completion(now);
        let overdue = goal(dec!(1000), dec!(100), at(2024, 1, 1));
        let active = goal(dec!(2000), dec!(400), at(2025, 1, 1));

        let stats = compute_goal_stats(&[completed, overdue.clone(), active], now);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.total_target_amount, dec!(3500));
        assert_eq!(stats.total_current_amount, dec!(1000));
        // 1000/3500 * 100
        assert!(stats.overall_progress > dec!(28.5) && stats.overall_progress < dec!(28.6));
    }

    #[test]
    fn test_goal_stats_empty_is_zeroed() {
        let stats = compute_goal_stats(&[], at(2024, 6, 1));
        assert_eq!(stats.total, 0);
        assert_eq!(stats.overall_progress, Decimal::ZERO);
    }
}
