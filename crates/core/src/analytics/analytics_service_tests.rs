//! Tests for the aggregation layer folds.

#[cfg(test)]
mod tests {
    use crate::analytics::analytics_service::{
        compute_category_breakdown, compute_monthly_trends, compute_summary,
    };
    use crate::transactions::{PaymentMethod, Transaction, TransactionType};
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn txn(
        id: &str,
        transaction_type: TransactionType,
        category: &str,
        amount: Decimal,
        date: NaiveDateTime,
    ) -> Transaction {
        Transaction {
            id: id.to_string(),
            user_id: "u-1".to_string(),
            transaction_type,
            amount,
            description: format!("{} {}", category, amount),
            category: category.to_string(),
            subcategory: None,
            date,
            payment_method: PaymentMethod::Cash,
            tags: vec![],
            is_recurring: false,
            recurring_pattern: None,
            notes: None,
            is_verified: false,
            created_at: date,
            updated_at: date,
        }
    }

    #[test]
    fn test_summary_totals_and_net_income() {
        let transactions = vec![
            txn("1", TransactionType::Income, "Salary", dec!(3000), at(2024, 1, 1)),
            txn("2", TransactionType::Income, "Bonus", dec!(500), at(2024, 1, 15)),
            txn("3", TransactionType::Expense, "Rent", dec!(1200), at(2024, 1, 2)),
        ];
        let summary = compute_summary(&transactions);
        assert_eq!(summary.income.total, dec!(3500));
        assert_eq!(summary.income.count, 2);
        assert_eq!(summary.expense.total, dec!(1200));
        assert_eq!(summary.expense.count, 1);
        assert_eq!(summary.net_income, dec!(2300));
    }

    #[test]
    fn test_summary_missing_groups_default_to_zero() {
        let transactions = vec![txn(
            "1",
            TransactionType::Expense,
            "Food",
            dec!(50),
            at(2024, 1, 1),
        )];
        let summary = compute_summary(&transactions);
        assert_eq!(summary.income.total, Decimal::ZERO);
        assert_eq!(summary.income.count, 0);
        assert_eq!(summary.net_income, dec!(-50));

        let empty = compute_summary(&[]);
        assert_eq!(empty.net_income, Decimal::ZERO);
    }

    #[test]
    fn test_category_breakdown_sorted_descending() {
        let transactions = vec![
            txn("1", TransactionType::Expense, "Food", dec!(100), at(2024, 1, 1)),
            txn("2", TransactionType::Expense, "Rent", dec!(900), at(2024, 1, 2)),
            txn("3", TransactionType::Expense, "Food", dec!(50), at(2024, 1, 3)),
            txn("4", TransactionType::Income, "Salary", dec!(5000), at(2024, 1, 4)),
        ];
        let breakdown = compute_category_breakdown(&transactions);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "Rent");
        assert_eq!(breakdown[0].total, dec!(900));
        assert_eq!(breakdown[1].category, "Food");
        assert_eq!(breakdown[1].total, dec!(150));
        assert_eq!(breakdown[1].count, 2);
    }

    #[test]
    fn test_category_breakdown_ties_keep_input_order() {
        let transactions = vec![
            txn("1", TransactionType::Expense, "Books", dec!(40), at(2024, 1, 1)),
            txn("2", TransactionType::Expense, "Games", dec!(40), at(2024, 1, 2)),
        ];
        let breakdown = compute_category_breakdown(&transactions);
        assert_eq!(breakdown[0].category, "Books");
        assert_eq!(breakdown[1].category, "Games");
    }

    #[test]
    fn test_category_breakdown_caps_at_ten() {
        let transactions: Vec<Transaction> = (0..15)
            .map(|i| {
                txn(
                    &i.to_string(),
                    TransactionType::Expense,
                    &format!("cat-{i}"),
                    Decimal::from(100 - i),
                    at(2024, 1, 1),
                )
            })
            .collect();
        let breakdown = compute_category_breakdown(&transactions);
        assert_eq!(breakdown.len(), 10);
        assert_eq!(breakdown[0].category, "cat-0");
    }

    #[test]
    fn test_monthly_trends_zero_fills_and_orders_ascending() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let transactions = vec![
            txn("1", TransactionType::Income, "Salary", dec!(500), at(2024, 3, 1)),
            txn("2", TransactionType::Expense, "Food", dec!(200), at(2024, 3, 10)),
        ];
        let trends = compute_monthly_trends(&transactions, 3, today);
        assert_eq!(trends.len(), 3);
        assert_eq!(trends[0].month, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(trends[1].month, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(trends[2].month, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        assert_eq!(trends[0].income, Decimal::ZERO);
        assert_eq!(trends[0].expenses, Decimal::ZERO);
        assert_eq!(trends[1].net_income, Decimal::ZERO);

        assert_eq!(trends[2].income, dec!(500));
        assert_eq!(trends[2].expenses, dec!(200));
        assert_eq!(trends[2].net_income, dec!(300));
    }

    #[test]
    fn test_monthly_trends_buckets_by_calendar_month() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let transactions = vec![
            txn("1", TransactionType::Expense, "Food", dec!(10), at(2024, 1, 31)),
            txn("2", TransactionType::Expense, "Food", dec!(20), at(2024, 2, 1)),
            // Outside the window: dropped
            txn("3", TransactionType::Expense, "Food", dec!(99), at(2023, 12, 31)),
        ];
        let trends = compute_monthly_trends(&transactions, 2, today);
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].expenses, dec!(10));
        assert_eq!(trends[1].expenses, dec!(20));
    }

    #[test]
    fn test_monthly_trends_spans_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let trends = compute_monthly_trends(&[], 3, today);
        assert_eq!(trends[0].month, NaiveDate::from_ymd_opt(2023, 11, 1).unwrap());
        assert_eq!(trends[2].month, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
