//! Subscription value types.
//!
//! A [`MarketDataSubscription`] names one desired feed: a market plus a
//! data type. A [`SubscriptionSet`] is the immutable desired global state
//! the reconciler drives the live state toward.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use tradewind_core::types::{ExchangeId, TickerSpec};

/// The kind of market data a subscription delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketDataType {
    /// Top-of-book snapshots
    Ticker,
    /// Depth-of-book snapshots
    OrderBook,
    /// Public trades
    Trades,
    /// The caller's resting orders
    OpenOrders,
    /// The caller's recent executions
    TradeHistory,
}

impl MarketDataType {
    /// All data types, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Ticker,
        Self::OrderBook,
        Self::Trades,
        Self::OpenOrders,
        Self::TradeHistory,
    ];

    /// Returns true if this type is delivered over push streams on
    /// streaming-capable exchanges. The remaining types are always polled.
    #[must_use]
    pub const fn is_streaming(&self) -> bool {
        matches!(self, Self::Ticker | Self::OrderBook | Self::Trades)
    }
}

impl fmt::Display for MarketDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ticker => "ticker",
            Self::OrderBook => "order_book",
            Self::Trades => "trades",
            Self::OpenOrders => "open_orders",
            Self::TradeHistory => "trade_history",
        };
        write!(f, "{name}")
    }
}

/// One desired feed: a market plus a data type.
///
/// Immutable with structural equality, so subscriptions behave as set
/// members and map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarketDataSubscription {
    /// The market to watch
    pub spec: TickerSpec,
    /// The kind of data to deliver
    pub data_type: MarketDataType,
}

impl MarketDataSubscription {
    /// Creates a new subscription.
    #[must_use]
    pub fn new(spec: TickerSpec, data_type: MarketDataType) -> Self {
        Self { spec, data_type }
    }
}

impl fmt::Display for MarketDataSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.spec, self.data_type)
    }
}

/// An immutable set of desired subscriptions.
///
/// Duplicates collapse and insertion order is irrelevant: two sets built
/// from the same subscriptions in any order compare equal. Produced by
/// callers and consumed atomically by the reconciliation loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSet(HashSet<MarketDataSubscription>);

impl SubscriptionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set holds no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the set contains the given subscription.
    #[must_use]
    pub fn contains(&self, subscription: &MarketDataSubscription) -> bool {
        self.0.contains(subscription)
    }

    /// Iterates over the subscriptions in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &MarketDataSubscription> {
        self.0.iter()
    }

    /// Groups the subscriptions by exchange.
    #[must_use]
    pub fn by_exchange(&self) -> HashMap<ExchangeId, HashSet<MarketDataSubscription>> {
        let mut grouped: HashMap<ExchangeId, HashSet<MarketDataSubscription>> = HashMap::new();
        for sub in &self.0 {
            grouped
                .entry(sub.spec.exchange().clone())
                .or_default()
                .insert(sub.clone());
        }
        grouped
    }

    /// Returns the streaming subscriptions for one exchange, i.e. the
    /// product manifest a connection to that exchange would be opened with.
    #[must_use]
    pub fn streaming_target(&self, exchange: &ExchangeId) -> BTreeSet<MarketDataSubscription> {
        self.0
            .iter()
            .filter(|s| s.spec.exchange() == exchange && s.data_type.is_streaming())
            .cloned()
            .collect()
    }
}

impl FromIterator<MarketDataSubscription> for SubscriptionSet {
    fn from_iter<I: IntoIterator<Item = MarketDataSubscription>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<MarketDataSubscription> for SubscriptionSet {
    fn extend<I: IntoIterator<Item = MarketDataSubscription>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
