//! Simplified linked-account record.

use rust_decimal::Decimal;

/// A linked account as reported by the financial provider.
///
/// `balance` defaults to zero and `mask` to the empty string when the
/// provider omits them, so the client never has to null-check.
#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub name: String,
    pub kind: String,
    pub subtype: String,
    pub balance: Decimal,
    pub mask: String,
}
