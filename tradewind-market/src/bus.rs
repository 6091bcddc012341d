//! Per-type fan-out topics.
//!
//! The bus carries one hot, shared topic per [`MarketDataType`]. Producers
//! are the streaming forward tasks and the polling loop; consumers are
//! whatever in-process code asked the manager for a stream.
//!
//! Semantics, in order of importance:
//!
//! - **Latest-wins backpressure.** A consumer that falls behind skips the
//!   oldest buffered events and resumes; it may miss intermediate values
//!   but always eventually observes the most recent one.
//! - **Serialized publishing.** Concurrent publishes to one topic are
//!   totally ordered; per-source arrival order is preserved per consumer.
//! - **Hot streams.** Events published while a topic has no consumers are
//!   dropped. Attaching or dropping one consumer never affects upstream
//!   or sibling consumers.
//!
//! [`MarketDataType`]: crate::subscription::MarketDataType

use futures::{Stream, StreamExt};
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tracing::trace;

use crate::event::{OpenOrdersEvent, OrderBookEvent, TickerEvent, TradeEvent, TradeHistoryEvent};

/// Buffered events per topic before the oldest is dropped.
///
/// Small by design: the bus is a conveyor, not a store, and consumers that
/// need history keep their own.
const TOPIC_CAPACITY: usize = 64;

/// A single hot, multi-producer/multi-consumer event topic.
pub struct Topic<T> {
    tx: broadcast::Sender<T>,
}

impl<T: Clone + Send + 'static> Topic<T> {
    fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publishes an event to every current consumer.
    ///
    /// Never fails: with no consumers attached the event is dropped.
    pub fn publish(&self, event: T) {
        let _ = self.tx.send(event);
    }

    /// Returns a new consumer stream over this topic.
    ///
    /// The stream is hot: it observes events published after this call.
    /// When the consumer lags past the topic buffer it silently skips
    /// ahead rather than erroring.
    pub fn stream(&self) -> impl Stream<Item = T> + Send + Unpin {
        BroadcastStream::new(self.tx.subscribe()).filter_map(|item| {
            if let Err(BroadcastStreamRecvError::Lagged(missed)) = &item {
                trace!(missed = *missed, "Slow consumer skipped events");
            }
            std::future::ready(item.ok())
        })
    }

    /// Returns the number of attached consumers.
    #[must_use]
    pub fn consumer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// One topic per market data type.
pub struct EventBus {
    tickers: Topic<TickerEvent>,
    order_books: Topic<OrderBookEvent>,
    trades: Topic<TradeEvent>,
    open_orders: Topic<OpenOrdersEvent>,
    trade_histories: Topic<TradeHistoryEvent>,
}

impl EventBus {
    /// Creates a bus whose topics buffer `capacity` events each.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            tickers: Topic::new(capacity),
            order_books: Topic::new(capacity),
            trades: Topic::new(capacity),
            open_orders: Topic::new(capacity),
            trade_histories: Topic::new(capacity),
        }
    }

    /// Returns the ticker topic.
    #[must_use]
    pub fn tickers(&self) -> &Topic<TickerEvent> {
        &self.tickers
    }

    /// Returns the order book topic.
    #[must_use]
    pub fn order_books(&self) -> &Topic<OrderBookEvent> {
        &self.order_books
    }

    /// Returns the public trade topic.
    #[must_use]
    pub fn trades(&self) -> &Topic<TradeEvent> {
        &self.trades
    }

    /// Returns the open orders topic.
    #[must_use]
    pub fn open_orders(&self) -> &Topic<OpenOrdersEvent> {
        &self.open_orders
    }

    /// Returns the trade history topic.
    #[must_use]
    pub fn trade_histories(&self) -> &Topic<TradeHistoryEvent> {
        &self.trade_histories
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(TOPIC_CAPACITY)
    }
}
