//! Market data structures.
//!
//! Payload types carried by the subscription manager's event streams:
//!
//! - [`Ticker`] - Latest bid/ask/last snapshot for a market
//! - [`OrderBook`] / [`OrderBookLevel`] - Depth-of-book snapshots
//! - [`PublicTrade`] - Anonymous trades from the public feed
//! - [`UserTrade`] - The caller's own executions
//! - [`OpenOrder`] / [`LimitOrder`] - Resting orders and order requests

mod order;
mod orderbook;
mod ticker;
mod trade;

pub use order::{LimitOrder, OpenOrder, Side};
pub use orderbook::{OrderBook, OrderBookBuilder, OrderBookLevel};
pub use ticker::{Ticker, TickerBuilder};
pub use trade::{PublicTrade, UserTrade};

/// Validation error for market data structures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataValidationError {
    /// A required builder field was not provided
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Timestamp failed validation
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Best bid is at or above best ask
    #[error("crossed order book: bid {bid} >= ask {ask}")]
    CrossedOrderBook {
        /// Best bid price rendering.
        bid: String,
        /// Best ask price rendering.
        ask: String,
    },
}
