//! Exchange adapter trait definitions.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::data::{OrderBook, PublicTrade, Ticker};
use crate::error::ExchangeResult;
use crate::types::{CurrencyPair, ExchangeId};

/// A push stream of market data items from an exchange connection.
///
/// `Err` items signal per-subscription stream failures; the consumer treats
/// the stream as dead from that point until the owning connection is
/// rebuilt.
pub type MarketDataStream<T> = BoxStream<'static, ExchangeResult<T>>;

/// The per-connection manifest declaring, at connect time, which pairs and
/// data types a streaming exchange should push.
///
/// Streaming libraries in this space do not expose per-topic add/remove,
/// only connect-with-subscriptions, so the manifest is fixed for the
/// lifetime of a connection. Equality is structural, which lets the
/// reconciler compare a live connection's manifest against a desired one.
///
/// # Examples
///
/// ```
/// use tradewind_core::traits::ProductSubscription;
/// use tradewind_core::types::CurrencyPair;
///
/// let pair = CurrencyPair::new("BTC", "USDT").unwrap();
/// let manifest = ProductSubscription::builder()
///     .ticker(pair.clone())
///     .order_book(pair)
///     .build();
/// assert!(!manifest.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSubscription {
    /// Pairs to receive ticker updates for
    pub tickers: Vec<CurrencyPair>,
    /// Pairs to receive order book updates for
    pub order_books: Vec<CurrencyPair>,
    /// Pairs to receive public trades for
    pub trades: Vec<CurrencyPair>,
}

impl ProductSubscription {
    /// Creates a new builder for `ProductSubscription`.
    #[must_use]
    pub fn builder() -> ProductSubscriptionBuilder {
        ProductSubscriptionBuilder::default()
    }

    /// Returns true if no pair is subscribed for any data type.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty() && self.order_books.is_empty() && self.trades.is_empty()
    }
}

/// Builder for [`ProductSubscription`].
#[derive(Debug, Default)]
pub struct ProductSubscriptionBuilder {
    tickers: Vec<CurrencyPair>,
    order_books: Vec<CurrencyPair>,
    trades: Vec<CurrencyPair>,
}

impl ProductSubscriptionBuilder {
    /// Adds a pair to the ticker subscription list.
    #[must_use]
    pub fn ticker(mut self, pair: CurrencyPair) -> Self {
        self.tickers.push(pair);
        self
    }

    /// Adds a pair to the order book subscription list.
    #[must_use]
    pub fn order_book(mut self, pair: CurrencyPair) -> Self {
        self.order_books.push(pair);
        self
    }

    /// Adds a pair to the public trade subscription list.
    #[must_use]
    pub fn trades(mut self, pair: CurrencyPair) -> Self {
        self.trades.push(pair);
        self
    }

    /// Builds the `ProductSubscription`.
    #[must_use]
    pub fn build(self) -> ProductSubscription {
        ProductSubscription {
            tickers: self.tickers,
            order_books: self.order_books,
            trades: self.trades,
        }
    }
}

/// Request/response market data calls against one exchange.
///
/// Individual calls inherit the timeouts of the adapter's underlying HTTP
/// client; the subscription manager imposes none of its own.
#[async_trait]
pub trait MarketDataService: Send + Sync {
    /// Fetches the current ticker for a pair.
    async fn ticker(&self, pair: &CurrencyPair) -> ExchangeResult<Ticker>;

    /// Fetches an order book snapshot for a pair, `depth` levels per side.
    async fn order_book(&self, pair: &CurrencyPair, depth: u32) -> ExchangeResult<OrderBook>;

    /// Fetches recent public trades for a pair.
    async fn trades(&self, pair: &CurrencyPair) -> ExchangeResult<Vec<PublicTrade>>;
}

/// Push-based market data connection for a streaming-capable exchange.
///
/// # Lifecycle
///
/// 1. `connect` with a [`ProductSubscription`] manifest
/// 2. Obtain per-pair streams via the `*_stream` methods
/// 3. `disconnect` to tear the connection down
///
/// The `*_stream` methods may be called only between `connect` and
/// `disconnect`; streams obtained earlier end when the connection closes.
#[async_trait]
pub trait StreamingMarketData: Send + Sync {
    /// Opens the connection, subscribing to exactly the pairs in the
    /// manifest. Resolves once the exchange has acknowledged.
    async fn connect(&self, subscription: &ProductSubscription) -> ExchangeResult<()>;

    /// Closes the connection. Resolves once the disconnect is acknowledged.
    async fn disconnect(&self) -> ExchangeResult<()>;

    /// Returns the push stream of ticker updates for a pair.
    fn ticker_stream(&self, pair: &CurrencyPair) -> MarketDataStream<Ticker>;

    /// Returns the push stream of order book updates for a pair.
    fn order_book_stream(&self, pair: &CurrencyPair) -> MarketDataStream<OrderBook>;

    /// Returns the push stream of public trades for a pair.
    fn trade_stream(&self, pair: &CurrencyPair) -> MarketDataStream<PublicTrade>;
}

/// Entry point for one exchange.
///
/// Classifies the exchange as streaming-capable (`streaming()` returns
/// `Some`) or polling-only (`None`), and hands out its service objects.
pub trait ExchangeAdapter: Send + Sync {
    /// Returns the exchange identifier.
    fn id(&self) -> &ExchangeId;

    /// Returns the request/response market data service.
    fn market_data(&self) -> Arc<dyn MarketDataService>;

    /// Returns the streaming service, or `None` for polling-only exchanges.
    fn streaming(&self) -> Option<Arc<dyn StreamingMarketData>> {
        None
    }
}
