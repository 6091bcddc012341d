//! Order data structures.

use serde::{Deserialize, Serialize};

use crate::types::{CurrencyPair, Price, Quantity, Timestamp};

/// Side of an order or trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buying the base asset
    Buy,
    /// Selling the base asset
    Sell,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// A resting order on an exchange, as returned by open-order queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOrder {
    /// Exchange-assigned order identifier
    pub id: String,
    /// Market the order rests on
    pub pair: CurrencyPair,
    /// Order side
    pub side: Side,
    /// Limit price
    pub limit_price: Price,
    /// Original quantity
    pub original_quantity: Quantity,
    /// Quantity still unfilled
    pub remaining_quantity: Quantity,
    /// Creation timestamp, where the exchange reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl OpenOrder {
    /// Returns the filled quantity (original - remaining).
    #[must_use]
    pub fn filled_quantity(&self) -> rust_decimal::Decimal {
        self.original_quantity - self.remaining_quantity
    }
}

/// A limit order request submitted through a trade adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrder {
    /// Market to place the order on
    pub pair: CurrencyPair,
    /// Order side
    pub side: Side,
    /// Limit price
    pub limit_price: Price,
    /// Quantity to trade
    pub quantity: Quantity,
}

impl LimitOrder {
    /// Creates a new limit order request.
    #[must_use]
    pub fn new(pair: CurrencyPair, side: Side, limit_price: Price, quantity: Quantity) -> Self {
        Self {
            pair,
            side,
            limit_price,
            quantity,
        }
    }
}
