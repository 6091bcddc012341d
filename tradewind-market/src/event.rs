//! Event types emitted on the bus.
//!
//! Every event pairs a payload with the [`TickerSpec`] of the subscription
//! that produced it, so consumers can filter a shared topic down to one
//! market by spec equality.

use serde::{Deserialize, Serialize};

use tradewind_core::data::{OpenOrder, OrderBook, PublicTrade, Ticker, UserTrade};
use tradewind_core::types::TickerSpec;

use crate::subscription::MarketDataType;

/// A ticker snapshot for one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerEvent {
    /// Originating market
    pub spec: TickerSpec,
    /// The snapshot
    pub ticker: Ticker,
}

/// An order book snapshot for one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookEvent {
    /// Originating market
    pub spec: TickerSpec,
    /// The snapshot
    pub book: OrderBook,
}

/// A public trade on one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// Originating market
    pub spec: TickerSpec,
    /// The trade
    pub trade: PublicTrade,
}

/// The caller's resting orders on one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOrdersEvent {
    /// Originating market
    pub spec: TickerSpec,
    /// Current resting orders
    pub orders: Vec<OpenOrder>,
}

/// The caller's recent executions on one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeHistoryEvent {
    /// Originating market
    pub spec: TickerSpec,
    /// Recent executions, newest first as the exchange reports them
    pub trades: Vec<UserTrade>,
}

/// Any event the subscription manager emits, tagged by data type.
///
/// This is the dynamically-dispatched counterpart of the per-type streams:
/// a closed union matched exhaustively, never extended by downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarketEvent {
    /// Ticker snapshot
    Ticker(TickerEvent),
    /// Order book snapshot
    OrderBook(OrderBookEvent),
    /// Public trade
    Trade(TradeEvent),
    /// Open orders update
    OpenOrders(OpenOrdersEvent),
    /// Trade history update
    TradeHistory(TradeHistoryEvent),
}

impl MarketEvent {
    /// Returns the originating market.
    #[must_use]
    pub fn spec(&self) -> &TickerSpec {
        match self {
            Self::Ticker(e) => &e.spec,
            Self::OrderBook(e) => &e.spec,
            Self::Trade(e) => &e.spec,
            Self::OpenOrders(e) => &e.spec,
            Self::TradeHistory(e) => &e.spec,
        }
    }

    /// Returns the data type tag of this event.
    #[must_use]
    pub const fn data_type(&self) -> MarketDataType {
        match self {
            Self::Ticker(_) => MarketDataType::Ticker,
            Self::OrderBook(_) => MarketDataType::OrderBook,
            Self::Trade(_) => MarketDataType::Trades,
            Self::OpenOrders(_) => MarketDataType::OpenOrders,
            Self::TradeHistory(_) => MarketDataType::TradeHistory,
        }
    }
}
