//! Streaming exchange sessions.
//!
//! A [`StreamingSession`] owns one push connection to one exchange: the
//! physical connection, the streaming subscriptions it was opened with,
//! and one forward task per subscription tying the adapter's stream to the
//! event bus. Streaming libraries only support connect-with-subscriptions,
//! so a session is immutable once open; changing its subscription set
//! means closing it and opening a replacement.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use tradewind_core::error::ExchangeResult;
use tradewind_core::traits::{ProductSubscription, StreamingMarketData};
use tradewind_core::types::ExchangeId;

use crate::bus::EventBus;
use crate::event::{OrderBookEvent, TickerEvent, TradeEvent};
use crate::subscription::{MarketDataSubscription, MarketDataType};

/// One open push connection and its forward pipelines.
pub(crate) struct StreamingSession {
    exchange: ExchangeId,
    streaming: Arc<dyn StreamingMarketData>,
    subscriptions: BTreeSet<MarketDataSubscription>,
    forwards: Vec<JoinHandle<()>>,
}

impl StreamingSession {
    /// Connects to the exchange with exactly the given streaming
    /// subscriptions and starts forwarding their events to the bus.
    ///
    /// Resolves once the exchange has acknowledged the connection. The
    /// subscription set must contain streaming data types only.
    pub(crate) async fn open(
        exchange: ExchangeId,
        streaming: Arc<dyn StreamingMarketData>,
        subscriptions: BTreeSet<MarketDataSubscription>,
        bus: Arc<EventBus>,
    ) -> ExchangeResult<Self> {
        let manifest = manifest_for(&subscriptions);

        info!(exchange = %exchange, "Connecting to exchange");
        streaming.connect(&manifest).await?;
        info!(exchange = %exchange, "Connected to exchange");

        let forwards = subscriptions
            .iter()
            .map(|sub| spawn_forward(&streaming, &bus, sub))
            .collect();

        Ok(Self {
            exchange,
            streaming,
            subscriptions,
            forwards,
        })
    }

    /// Returns the streaming subscriptions this session was opened with.
    pub(crate) fn subscriptions(&self) -> &BTreeSet<MarketDataSubscription> {
        &self.subscriptions
    }

    /// Releases all forward pipelines, then disconnects and waits for the
    /// exchange to acknowledge.
    pub(crate) async fn close(self) -> ExchangeResult<()> {
        debug!(
            exchange = %self.exchange,
            pipelines = self.forwards.len(),
            "Releasing stream pipelines"
        );
        for forward in &self.forwards {
            forward.abort();
        }
        self.streaming.disconnect().await
    }
}

fn manifest_for(subscriptions: &BTreeSet<MarketDataSubscription>) -> ProductSubscription {
    let mut builder = ProductSubscription::builder();
    for sub in subscriptions {
        let pair = sub.spec.currency_pair();
        builder = match sub.data_type {
            MarketDataType::Ticker => builder.ticker(pair),
            MarketDataType::OrderBook => builder.order_book(pair),
            MarketDataType::Trades => builder.trades(pair),
            MarketDataType::OpenOrders | MarketDataType::TradeHistory => {
                unreachable!("polled data type in streaming manifest: {sub}")
            }
        };
    }
    builder.build()
}

fn spawn_forward(
    streaming: &Arc<dyn StreamingMarketData>,
    bus: &Arc<EventBus>,
    sub: &MarketDataSubscription,
) -> JoinHandle<()> {
    let spec = sub.spec.clone();
    let pair = spec.currency_pair();
    let sub = sub.clone();
    let bus = Arc::clone(bus);

    debug!(subscription = %sub, "Subscribing to stream");

    match sub.data_type {
        MarketDataType::Ticker => {
            let mut stream = streaming.ticker_stream(&pair);
            tokio::spawn(async move {
                while let Some(item) = stream.next().await {
                    match item {
                        Ok(ticker) => {
                            debug!(spec = %spec, last = %ticker.last, "Ticker received");
                            bus.tickers().publish(TickerEvent {
                                spec: spec.clone(),
                                ticker,
                            });
                        }
                        Err(error) => {
                            error!(subscription = %sub, error = %error, "Error in ticker stream");
                            break;
                        }
                    }
                }
            })
        }
        MarketDataType::OrderBook => {
            let mut stream = streaming.order_book_stream(&pair);
            tokio::spawn(async move {
                while let Some(item) = stream.next().await {
                    match item {
                        Ok(book) => bus.order_books().publish(OrderBookEvent {
                            spec: spec.clone(),
                            book,
                        }),
                        Err(error) => {
                            error!(subscription = %sub, error = %error, "Error in order book stream");
                            break;
                        }
                    }
                }
            })
        }
        MarketDataType::Trades => {
            let mut stream = streaming.trade_stream(&pair);
            tokio::spawn(async move {
                while let Some(item) = stream.next().await {
                    match item {
                        Ok(trade) => bus.trades().publish(TradeEvent {
                            spec: spec.clone(),
                            trade,
                        }),
                        Err(error) => {
                            error!(subscription = %sub, error = %error, "Error in trade stream");
                            break;
                        }
                    }
                }
            })
        }
        MarketDataType::OpenOrders | MarketDataType::TradeHistory => {
            unreachable!("polled data type in streaming session: {sub}")
        }
    }
}
