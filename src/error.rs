//! Reasons an input is turned away before it reaches the books.

use rust_decimal::Decimal;

/// A submission that was not applied. The books are left exactly as they were.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub(crate) enum Rejection {
    #[error("choose a category")]
    MissingCategory,

    #[error("enter an amount")]
    MissingAmount,

    #[error("'{0}' is not a number")]
    InvalidAmount(String),

    #[error("amount cannot be negative ({0})")]
    NegativeAmount(Decimal),

    #[error("amount {0} is over the limit of 1,000,000,000,000")]
    AmountTooLarge(Decimal),

    /// Amounts carry at most two decimal places.
    #[error("amount {0} has too many decimal places")]
    TooManyDecimals(Decimal),

    /// Dates are entered as `YYYY-MM-DD`.
    #[error("'{0}' is not a date (use YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("'{0}' is not a month (use YYYY-MM)")]
    InvalidMonth(String),

    #[error("'{0}' is not a transaction type (use income or expense)")]
    UnknownType(String),
}
