//! Call-recording mock adapters shared by the crate's tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use tradewind_core::data::{LimitOrder, OpenOrder, OrderBook, PublicTrade, Ticker, UserTrade};
use tradewind_core::error::{ExchangeError, ExchangeResult};
use tradewind_core::traits::{
    ExchangeAdapter, MarketDataService, MarketDataStream, Paging, ProductSubscription,
    StreamingMarketData, TradeAdapter,
};
use tradewind_core::types::{CurrencyPair, ExchangeId, Price, Quantity, Timestamp};

/// Deterministic ticker fixture; equal seeds build equal tickers.
pub(crate) fn sample_ticker(seed: i64) -> Ticker {
    let last = Decimal::from(seed);
    Ticker::builder()
        .bid(Price::new_unchecked(last))
        .ask(Price::new_unchecked(last + Decimal::ONE))
        .last(Price::new_unchecked(last))
        .timestamp(Timestamp::new_unchecked(1_704_067_200_000 + seed))
        .build()
        .expect("sample ticker is well formed")
}

/// Polls a condition until it holds or the deadline passes.
pub(crate) async fn wait_until(deadline: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = tokio::time::Instant::now();
    while start.elapsed() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

/// A mock exchange, streaming-capable or polling-only.
pub(crate) struct MockExchange {
    id: ExchangeId,
    market_data: Arc<MockMarketData>,
    streaming: Option<Arc<MockStreaming>>,
}

impl MockExchange {
    pub(crate) fn streaming(name: &str) -> Arc<Self> {
        Arc::new(Self {
            id: ExchangeId::new(name).expect("valid mock exchange name"),
            market_data: Arc::new(MockMarketData::default()),
            streaming: Some(Arc::new(MockStreaming::new())),
        })
    }

    pub(crate) fn polling_only(name: &str) -> Arc<Self> {
        Arc::new(Self {
            id: ExchangeId::new(name).expect("valid mock exchange name"),
            market_data: Arc::new(MockMarketData::default()),
            streaming: None,
        })
    }

    pub(crate) fn id(&self) -> &ExchangeId {
        &self.id
    }

    pub(crate) fn market_data_mock(&self) -> Arc<MockMarketData> {
        Arc::clone(&self.market_data)
    }

    pub(crate) fn streaming_mock(&self) -> Arc<MockStreaming> {
        Arc::clone(self.streaming.as_ref().expect("exchange is streaming-capable"))
    }
}

impl ExchangeAdapter for MockExchange {
    fn id(&self) -> &ExchangeId {
        &self.id
    }

    fn market_data(&self) -> Arc<dyn MarketDataService> {
        Arc::clone(&self.market_data) as Arc<dyn MarketDataService>
    }

    fn streaming(&self) -> Option<Arc<dyn StreamingMarketData>> {
        self.streaming
            .as_ref()
            .map(|s| Arc::clone(s) as Arc<dyn StreamingMarketData>)
    }
}

/// Mock streaming connection recording connects and disconnects.
pub(crate) struct MockStreaming {
    manifests: Mutex<Vec<ProductSubscription>>,
    disconnects: AtomicUsize,
    fail_connect_once: AtomicBool,
    tickers_tx: broadcast::Sender<ExchangeResult<Ticker>>,
    books_tx: broadcast::Sender<ExchangeResult<OrderBook>>,
    trades_tx: broadcast::Sender<ExchangeResult<PublicTrade>>,
}

impl MockStreaming {
    fn new() -> Self {
        Self {
            manifests: Mutex::new(Vec::new()),
            disconnects: AtomicUsize::new(0),
            fail_connect_once: AtomicBool::new(false),
            tickers_tx: broadcast::channel(64).0,
            books_tx: broadcast::channel(64).0,
            trades_tx: broadcast::channel(64).0,
        }
    }

    /// Manifests from every connect attempt, in order.
    pub(crate) fn connect_manifests(&self) -> Vec<ProductSubscription> {
        self.manifests.lock().clone()
    }

    pub(crate) fn connect_count(&self) -> usize {
        self.manifests.lock().len()
    }

    pub(crate) fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    /// Makes the next connect attempt fail; subsequent attempts succeed.
    pub(crate) fn fail_next_connect(&self) {
        self.fail_connect_once.store(true, Ordering::SeqCst);
    }

    pub(crate) fn push_ticker(&self, ticker: Ticker) {
        let _ = self.tickers_tx.send(Ok(ticker));
    }

    pub(crate) fn push_ticker_error(&self) {
        let _ = self.tickers_tx.send(Err(ExchangeError::StreamClosed {
            reason: "injected".to_string(),
        }));
    }

    pub(crate) fn push_book(&self, book: OrderBook) {
        let _ = self.books_tx.send(Ok(book));
    }

    pub(crate) fn push_trade(&self, trade: PublicTrade) {
        let _ = self.trades_tx.send(Ok(trade));
    }
}

fn mock_stream<T: Clone + Send + 'static>(
    tx: &broadcast::Sender<ExchangeResult<T>>,
) -> MarketDataStream<T> {
    BroadcastStream::new(tx.subscribe())
        .filter_map(|item| std::future::ready(item.ok()))
        .boxed()
}

#[async_trait]
impl StreamingMarketData for MockStreaming {
    async fn connect(&self, subscription: &ProductSubscription) -> ExchangeResult<()> {
        self.manifests.lock().push(subscription.clone());
        if self.fail_connect_once.swap(false, Ordering::SeqCst) {
            return Err(ExchangeError::ConnectionFailed {
                reason: "injected".to_string(),
            });
        }
        Ok(())
    }

    async fn disconnect(&self) -> ExchangeResult<()> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn ticker_stream(&self, _pair: &CurrencyPair) -> MarketDataStream<Ticker> {
        mock_stream(&self.tickers_tx)
    }

    fn order_book_stream(&self, _pair: &CurrencyPair) -> MarketDataStream<OrderBook> {
        mock_stream(&self.books_tx)
    }

    fn trade_stream(&self, _pair: &CurrencyPair) -> MarketDataStream<PublicTrade> {
        mock_stream(&self.trades_tx)
    }
}

/// Mock request/response service with programmable failures.
#[derive(Default)]
pub(crate) struct MockMarketData {
    ticker: Mutex<Option<Ticker>>,
    fail_tickers: AtomicBool,
    ticker_calls: AtomicUsize,
    order_book_depths: Mutex<Vec<u32>>,
    trades_calls: AtomicUsize,
}

impl MockMarketData {
    pub(crate) fn set_ticker(&self, ticker: Ticker) {
        *self.ticker.lock() = Some(ticker);
    }

    /// Makes every subsequent ticker fetch fail.
    pub(crate) fn fail_tickers(&self) {
        self.fail_tickers.store(true, Ordering::SeqCst);
    }

    pub(crate) fn ticker_call_count(&self) -> usize {
        self.ticker_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn order_book_depths(&self) -> Vec<u32> {
        self.order_book_depths.lock().clone()
    }

    pub(crate) fn trades_call_count(&self) -> usize {
        self.trades_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataService for MockMarketData {
    async fn ticker(&self, _pair: &CurrencyPair) -> ExchangeResult<Ticker> {
        self.ticker_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_tickers.load(Ordering::SeqCst) {
            return Err(ExchangeError::Timeout { timeout_ms: 10 });
        }
        Ok(self.ticker.lock().clone().unwrap_or_else(|| sample_ticker(1)))
    }

    async fn order_book(&self, _pair: &CurrencyPair, depth: u32) -> ExchangeResult<OrderBook> {
        self.order_book_depths.lock().push(depth);
        Ok(OrderBook::builder()
            .timestamp(Timestamp::new_unchecked(1_704_067_200_000))
            .bid(
                Price::new_unchecked(Decimal::from(99)),
                Quantity::new_unchecked(Decimal::ONE),
            )
            .ask(
                Price::new_unchecked(Decimal::from(101)),
                Quantity::new_unchecked(Decimal::ONE),
            )
            .build()
            .expect("mock book is well formed"))
    }

    async fn trades(&self, _pair: &CurrencyPair) -> ExchangeResult<Vec<PublicTrade>> {
        self.trades_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

/// Mock trade adapter recording pair filters and paging hints.
#[derive(Default)]
pub(crate) struct MockTradeAdapter {
    open_orders_pairs: Mutex<Vec<CurrencyPair>>,
    history_pagings: Mutex<Vec<Paging>>,
    placed: Mutex<Vec<LimitOrder>>,
}

impl MockTradeAdapter {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn open_orders_pairs(&self) -> Vec<CurrencyPair> {
        self.open_orders_pairs.lock().clone()
    }

    pub(crate) fn history_pagings(&self) -> Vec<Paging> {
        self.history_pagings.lock().clone()
    }

    pub(crate) fn placed_orders(&self) -> Vec<LimitOrder> {
        self.placed.lock().clone()
    }
}

#[async_trait]
impl TradeAdapter for MockTradeAdapter {
    async fn open_orders(&self, pair: &CurrencyPair) -> ExchangeResult<Vec<OpenOrder>> {
        self.open_orders_pairs.lock().push(pair.clone());
        Ok(Vec::new())
    }

    async fn trade_history(
        &self,
        _pair: &CurrencyPair,
        paging: Paging,
    ) -> ExchangeResult<Vec<UserTrade>> {
        self.history_pagings.lock().push(paging);
        Ok(Vec::new())
    }

    async fn place_limit_order(&self, order: &LimitOrder) -> ExchangeResult<String> {
        self.placed.lock().push(order.clone());
        Ok("mock-order-1".to_string())
    }
}
