//! `NewType` wrappers for financial primitives and market identifiers.
//!
//! This module provides type-safe wrappers around raw strings and decimal
//! values to prevent mixing incompatible types at compile time.
//!
//! # Types
//!
//! - [`ExchangeId`] - Validated exchange identifiers
//! - [`CurrencyPair`] - Base/counter asset pairs
//! - [`TickerSpec`] - The (exchange, base, counter) triple identifying a market
//! - [`Price`] - Asset price values
//! - [`Quantity`] - Trading quantities
//! - [`Timestamp`] - Unix millisecond timestamps

mod currency_pair;
mod exchange_id;
mod price;
mod quantity;
mod ticker_spec;
mod timestamp;

pub use currency_pair::CurrencyPair;
pub use exchange_id::ExchangeId;
pub use price::Price;
pub use quantity::Quantity;
pub use ticker_spec::TickerSpec;
pub use timestamp::Timestamp;

/// Validation error for `NewType` construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Price value is negative
    #[error("price cannot be negative: {0}")]
    NegativePrice(rust_decimal::Decimal),

    /// Quantity value is negative
    #[error("quantity cannot be negative: {0}")]
    NegativeQuantity(rust_decimal::Decimal),

    /// Exchange identifier is empty
    #[error("exchange identifier cannot be empty")]
    EmptyExchange,

    /// Exchange identifier contains invalid characters
    #[error("invalid exchange identifier: {0}")]
    InvalidExchange(String),

    /// Asset code is empty or malformed
    #[error("invalid asset code: {0}")]
    InvalidAsset(String),

    /// Currency pair string is malformed
    #[error("invalid currency pair: {0}")]
    InvalidPair(String),

    /// Timestamp is negative
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}
