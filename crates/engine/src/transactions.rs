//! Simplified transaction record, the unit the summary aggregator folds.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A transaction as reported by the financial provider, reduced to the
/// fields this service forwards.
///
/// `amount` keeps the upstream sign convention: positive means money left
/// the account. The aggregator inverts the sign when summing, clients see
/// net inflow as positive.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Vec<String>,
}
