//! Tests for budget domain models and derivations.

#[cfg(test)]
mod tests {
    use crate::budgets::budgets_model::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn sample_budget() -> Budget {
        Budget {
            id: "b-1".to_string(),
            user_id: "u-1".to_string(),
            name: "Food budget".to_string(),
            description: None,
            category: "Food".to_string(),
            amount: dec!(100),
            period: BudgetPeriod::Monthly,
            start_date: at(2024, 1, 1),
            end_date: at(2024, 1, 31),
            is_active: true,
            alert_thresholds: vec![],
            created_at: at(2024, 1, 1),
            updated_at: at(2024, 1, 1),
        }
    }

    #[test]
    fn test_status_follows_window() {
        let budget = sample_budget();
        assert_eq!(budget.status(at(2023, 12, 25)), BudgetStatus::Upcoming);
        assert_eq!(budget.status(at(2024, 1, 15)), BudgetStatus::Active);
        assert_eq!(budget.status(at(2024, 2, 2)), BudgetStatus::Expired);
    }

    #[test]
    fn test_time_remaining_buckets() {
        let budget = sample_budget();
        assert_eq!(
            budget.time_remaining(at(2024, 2, 10)),
            BudgetTimeRemaining {
                days: 0,
                status: BudgetTimeStatus::Expired
            }
        );
        assert_eq!(
            budget.time_remaining(at(2024, 1, 31)).status,
            BudgetTimeStatus::EndsToday
        );
        let soon = budget.time_remaining(at(2024, 1, 28));
        assert_eq!(soon.status, BudgetTimeStatus::EndingSoon);
        assert_eq!(soon.days, 3);
        assert_eq!(
            budget.time_remaining(at(2024, 1, 2)).status,
            BudgetTimeStatus::Active
        );
    }

    fn sample_new_budget() -> NewBudget {
        NewBudget {
            name: "Food budget".to_string(),
            description: None,
            category: "Food".to_string(),
            amount: dec!(100),
            period: BudgetPeriod::Monthly,
            start_date: at(2024, 1, 1),
            end_date: at(2024, 1, 31),
            is_active: true,
            alert_thresholds: vec![],
        }
    }

    #[test]
    fn test_valid_budget_passes() {
        assert!(sample_new_budget().validate().is_ok());
    }

    #[test]
    fn test_end_date_must_be_after_start_date() {
        let mut budget = sample_new_budget();
        budget.end_date = budget.start_date;
        assert!(budget.validate().is_err());

        budget.end_date = at(2023, 12, 31);
        assert!(budget.validate().is_err());
    }

    #[test]
    fn test_date_invariant_reruns_on_merged_update() {
        let mut budget = sample_budget();
        let update = BudgetUpdate {
            end_date: Some(at(2023, 12, 1)),
            ..Default::default()
        };
        update.apply(&mut budget);
        assert!(validate_budget(&budget).is_err());
    }

    #[test]
    fn test_nonpositive_amount_rejected() {
        let mut budget = sample_new_budget();
        budget.amount = dec!(0);
        assert!(budget.validate().is_err());
    }

    #[test]
    fn test_threshold_percentage_bounds() {
        let mut budget = sample_new_budget();
        budget.alert_thresholds = vec![AlertThreshold {
            percentage: dec!(150),
            is_enabled: true,
        }];
        assert!(budget.validate().is_err());
    }

    #[test]
    fn test_period_str_round_trip() {
        for period in [
            BudgetPeriod::Weekly,
            BudgetPeriod::Monthly,
            BudgetPeriod::Quarterly,
            BudgetPeriod::Yearly,
        ] {
            assert_eq!(BudgetPeriod::parse_str(period.as_str()), Some(period));
        }
        assert_eq!(BudgetPeriod::parse_str("daily"), None);
    }
}
