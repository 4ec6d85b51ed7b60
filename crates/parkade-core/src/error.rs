//! # Error Types
//!
//! Errors raised by the primitives in this crate. Higher layers define their
//! own enums (`UsageError`, `SlotError`, `PoolError`, ...) and carry a
//! `MoneyError` where a pricing failure can surface.

use thiserror::Error;

/// Timestamp text could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParkadeError {
    /// Input text could not be parsed into a primitive.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Error in monetary construction or arithmetic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Currency code is not three ASCII letters.
    #[error("invalid currency code {0:?}: expected three ASCII letters")]
    InvalidCurrency(String),

    /// Two amounts in different currencies were combined.
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Currency of the left-hand operand.
        left: String,
        /// Currency of the right-hand operand.
        right: String,
    },

    /// The result does not fit in 64-bit minor units.
    #[error("monetary overflow")]
    Overflow,

    /// Amount text is malformed (e.g. more than two decimals).
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
}
