//! Spend-summary aggregation.
//!
//! The provider reports money leaving the account as a positive amount;
//! clients want net inflow as positive. Both totals are therefore negated
//! sums: `week_total` over every transaction in the fetched window,
//! `today_total` over the subset dated on the reference day.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::Transaction;

/// Net spend aggregates over a trailing week, sign-inverted to net inflow.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    pub today_total: Decimal,
    pub week_total: Decimal,
}

/// Inclusive `[today - days, today]` window in civil days.
///
/// Calendar-day subtraction, not a fixed number of hours, so a DST
/// transition inside the window cannot shift the boundary date.
pub(crate) fn trailing_window(today: NaiveDate, days: u64) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}

/// Fold a fetched window of transactions into the two totals.
///
/// The caller guarantees `transactions` already spans the wanted window;
/// only the today-partition is filtered here, by calendar date equality.
pub(crate) fn summarize(transactions: &[Transaction], today: NaiveDate) -> Summary {
    let (today_spend, week_spend) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(today_acc, week_acc), tx| {
            let today_acc = if tx.date == today {
                today_acc + tx.amount
            } else {
                today_acc
            };
            (today_acc, week_acc + tx.amount)
        },
    );

    Summary {
        today_total: -today_spend,
        week_total: -week_spend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use rust_decimal_macros::dec;

    fn tx(amount: Decimal, date: NaiveDate) -> Transaction {
        Transaction {
            name: "Coffee".to_string(),
            amount,
            date,
            category: vec![],
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn totals_are_negated_sums() {
        let today = day(2026, 3, 14);
        let six_days_ago = today.checked_sub_days(Days::new(6)).unwrap();
        let transactions = vec![
            tx(dec!(10), today),
            tx(dec!(-5), today),
            tx(dec!(20), six_days_ago),
        ];

        let summary = summarize(&transactions, today);
        assert_eq!(summary.today_total, dec!(-5));
        assert_eq!(summary.week_total, dec!(-25));
    }

    #[test]
    fn empty_window_yields_zeroes() {
        let summary = summarize(&[], day(2026, 3, 14));
        assert_eq!(summary.today_total, Decimal::ZERO);
        assert_eq!(summary.week_total, Decimal::ZERO);
    }

    #[test]
    fn cent_amounts_sum_exactly() {
        let today = day(2026, 3, 14);
        let transactions: Vec<_> = (0..10).map(|_| tx(dec!(0.10), today)).collect();

        let summary = summarize(&transactions, today);
        assert_eq!(summary.today_total, dec!(-1.00));
    }

    #[test]
    fn window_starts_seven_civil_days_back() {
        let (start, end) = trailing_window(day(2026, 3, 14), 7);
        assert_eq!(start, day(2026, 3, 7));
        assert_eq!(end, day(2026, 3, 14));
    }

    #[test]
    fn window_crosses_month_boundary() {
        let (start, _) = trailing_window(day(2026, 3, 3), 7);
        assert_eq!(start, day(2026, 2, 24));
    }

    #[test]
    fn transactions_outside_today_only_count_in_week() {
        let today = day(2026, 3, 14);
        let boundary = today.checked_sub_days(Days::new(7)).unwrap();
        let transactions = vec![tx(dec!(3.50), boundary)];

        let summary = summarize(&transactions, today);
        assert_eq!(summary.today_total, Decimal::ZERO);
        assert_eq!(summary.week_total, dec!(-3.50));
    }
}
