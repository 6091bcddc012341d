//! Polling fetches for non-streaming subscriptions.
//!
//! One fetch issues one request/response call through the registered
//! adapter and publishes the result as an event. Failures never propagate:
//! a failed fetch is logged and retried on the next tick, and has no
//! effect on sibling subscriptions.

use std::sync::Arc;

use tracing::{error, warn};

use tradewind_core::config::MarketDataConfig;
use tradewind_core::error::{ExchangeError, ExchangeResult};
use tradewind_core::traits::Paging;

use crate::bus::EventBus;
use crate::event::{OpenOrdersEvent, OrderBookEvent, TickerEvent, TradeHistoryEvent};
use crate::registry::ExchangeRegistry;
use crate::subscription::{MarketDataSubscription, MarketDataType};

/// Fetches one subscription and publishes the result, swallowing failures.
///
/// Transient failures log at error level; operations the exchange cannot
/// perform log at warn, since retrying will not change the outcome.
pub(crate) async fn fetch_and_publish(
    registry: &ExchangeRegistry,
    bus: &Arc<EventBus>,
    config: &MarketDataConfig,
    sub: &MarketDataSubscription,
) {
    if let Err(e) = fetch(registry, bus, config, sub).await {
        if e.is_recoverable() {
            error!(subscription = %sub, error = %e, "Error fetching market data");
        } else {
            warn!(subscription = %sub, error = %e, "Skipping unsupported subscription");
        }
    }
}

async fn fetch(
    registry: &ExchangeRegistry,
    bus: &Arc<EventBus>,
    config: &MarketDataConfig,
    sub: &MarketDataSubscription,
) -> ExchangeResult<()> {
    let spec = &sub.spec;
    let pair = spec.currency_pair();

    match sub.data_type {
        MarketDataType::Ticker => {
            let adapter = registry.adapter(spec.exchange())?;
            let ticker = adapter.market_data().ticker(&pair).await?;
            bus.tickers().publish(TickerEvent {
                spec: spec.clone(),
                ticker,
            });
        }
        MarketDataType::OrderBook => {
            let adapter = registry.adapter(spec.exchange())?;
            let book = adapter
                .market_data()
                .order_book(&pair, config.order_book_depth)
                .await?;
            bus.order_books().publish(OrderBookEvent {
                spec: spec.clone(),
                book,
            });
        }
        MarketDataType::Trades => {
            // Public trades cannot be polled meaningfully: without a
            // cursor we would re-publish the same window every tick.
            return Err(ExchangeError::not_supported(
                spec.exchange().clone(),
                "trades polling",
            ));
        }
        MarketDataType::OpenOrders => {
            let trade = registry.trade_adapter(spec.exchange())?;
            let orders = trade.open_orders(&pair).await?;
            bus.open_orders().publish(OpenOrdersEvent {
                spec: spec.clone(),
                orders,
            });
        }
        MarketDataType::TradeHistory => {
            let trade = registry.trade_adapter(spec.exchange())?;
            let trades = trade
                .trade_history(&pair, Paging::first(config.trade_history_limit))
                .await?;
            bus.trade_histories().publish(TradeHistoryEvent {
                spec: spec.clone(),
                trades,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{sample_ticker, MockExchange, MockTradeAdapter};
    use futures::StreamExt;
    use std::time::Duration;
    use tokio::time::timeout;
    use tradewind_core::types::TickerSpec;

    fn spec() -> TickerSpec {
        TickerSpec::new("kraken", "ETH", "USD").unwrap()
    }

    fn setup(exchange: Arc<MockExchange>) -> (ExchangeRegistry, Arc<EventBus>, MarketDataConfig) {
        let trade = MockTradeAdapter::new();
        let registry = ExchangeRegistry::builder()
            .adapter(exchange.clone())
            .trade_adapter(exchange.id().clone(), trade)
            .build();
        (registry, Arc::new(EventBus::default()), MarketDataConfig::default())
    }

    #[tokio::test]
    async fn test_ticker_fetch_publishes_event() {
        let exchange = MockExchange::polling_only("kraken");
        exchange.market_data_mock().set_ticker(sample_ticker(10));
        let (registry, bus, config) = setup(exchange.clone());
        let mut stream = bus.tickers().stream();

        let sub = MarketDataSubscription::new(spec(), MarketDataType::Ticker);
        fetch_and_publish(&registry, &bus, &config, &sub).await;

        let event = timeout(Duration::from_secs(1), stream.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.spec, spec());
        assert_eq!(event.ticker, sample_ticker(10));
    }

    #[tokio::test]
    async fn test_order_book_fetch_uses_configured_depth() {
        let exchange = MockExchange::polling_only("kraken");
        let (registry, bus, config) = setup(exchange.clone());
        let mut stream = bus.order_books().stream();

        let sub = MarketDataSubscription::new(spec(), MarketDataType::OrderBook);
        fetch_and_publish(&registry, &bus, &config, &sub).await;

        assert_eq!(exchange.market_data_mock().order_book_depths(), vec![20]);
        let event = timeout(Duration::from_secs(1), stream.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.spec, spec());
    }

    #[tokio::test]
    async fn test_trades_polling_is_skipped() {
        let exchange = MockExchange::polling_only("kraken");
        let (registry, bus, config) = setup(exchange.clone());
        let mut stream = bus.trades().stream();

        let sub = MarketDataSubscription::new(spec(), MarketDataType::Trades);
        fetch_and_publish(&registry, &bus, &config, &sub).await;

        // Nothing published, no adapter call made.
        assert!(timeout(Duration::from_millis(100), stream.next())
            .await
            .is_err());
        assert_eq!(exchange.market_data_mock().trades_call_count(), 0);
    }

    #[tokio::test]
    async fn test_open_orders_fetch_publishes_event() {
        let exchange = MockExchange::polling_only("kraken");
        let (registry, bus, config) = setup(exchange.clone());
        let mut stream = bus.open_orders().stream();

        let sub = MarketDataSubscription::new(spec(), MarketDataType::OpenOrders);
        fetch_and_publish(&registry, &bus, &config, &sub).await;

        let event = timeout(Duration::from_secs(1), stream.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.spec, spec());
        assert!(event.orders.is_empty());
    }

    #[tokio::test]
    async fn test_trade_history_fetch_passes_paging_hint() {
        let exchange = MockExchange::polling_only("kraken");
        let trade = MockTradeAdapter::new();
        let registry = ExchangeRegistry::builder()
            .adapter(exchange.clone())
            .trade_adapter(exchange.id().clone(), trade.clone())
            .build();
        let bus = Arc::new(EventBus::default());
        let config = MarketDataConfig::default();
        let mut stream = bus.trade_histories().stream();

        let sub = MarketDataSubscription::new(spec(), MarketDataType::TradeHistory);
        fetch_and_publish(&registry, &bus, &config, &sub).await;

        assert_eq!(trade.history_pagings(), vec![Paging::first(20)]);
        let event = timeout(Duration::from_secs(1), stream.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.spec, spec());
    }

    #[tokio::test]
    async fn test_failed_fetch_publishes_nothing() {
        let exchange = MockExchange::polling_only("kraken");
        exchange.market_data_mock().fail_tickers();
        let (registry, bus, config) = setup(exchange.clone());
        let mut stream = bus.tickers().stream();

        let sub = MarketDataSubscription::new(spec(), MarketDataType::Ticker);
        fetch_and_publish(&registry, &bus, &config, &sub).await;

        assert!(timeout(Duration::from_millis(100), stream.next())
            .await
            .is_err());
        assert_eq!(exchange.market_data_mock().ticker_call_count(), 1);
    }
}
