//! The subscription manager surface.
//!
//! Maintains subscriptions to multiple exchanges' market data, using push
//! streams where an exchange supports them and polling where it doesn't.
//! All consumers read filtered views of shared hot event streams; none of
//! the surface methods block or fail.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use tradewind_core::config::MarketDataConfig;
use tradewind_core::types::TickerSpec;

use crate::bus::EventBus;
use crate::event::{
    MarketEvent, OpenOrdersEvent, OrderBookEvent, TickerEvent, TradeEvent, TradeHistoryEvent,
};
use crate::reconcile::{PendingCell, ReconcileEngine};
use crate::registry::ExchangeRegistry;
use crate::subscription::{MarketDataSubscription, MarketDataType, SubscriptionSet};

/// Sentinel for "no update has ever been recorded".
const NEVER_UPDATED: u64 = u64::MAX;

struct LoopTask {
    handle: JoinHandle<()>,
    shutdown_tx: mpsc::Sender<()>,
}

/// Maintains subscriptions to multiple exchanges' market data.
///
/// One instance per process, injected wherever events are consumed. The
/// manager owns a single reconcile/poll task; all exchange state lives on
/// that task and is never exposed.
///
/// Streams returned by the accessors are hot and shared: they deliver
/// events only while the corresponding subscription is in the desired set,
/// and dropping one consumer never affects upstream connections or other
/// consumers.
pub struct MarketDataManager {
    registry: Arc<ExchangeRegistry>,
    bus: Arc<EventBus>,
    config: MarketDataConfig,
    pending: PendingCell,
    nudge: Arc<Notify>,
    running: Arc<AtomicBool>,
    last_update_ms: AtomicU64,
    origin: Instant,
    loop_task: Mutex<Option<LoopTask>>,
}

impl MarketDataManager {
    /// Creates a manager over the given registry and configuration.
    ///
    /// Nothing connects until [`start`](Self::start) is called and a
    /// non-empty set is passed to
    /// [`update_subscriptions`](Self::update_subscriptions).
    #[must_use]
    pub fn new(registry: ExchangeRegistry, config: MarketDataConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            bus: Arc::new(EventBus::default()),
            config,
            pending: Arc::new(Mutex::new(None)),
            nudge: Arc::new(Notify::new()),
            running: Arc::new(AtomicBool::new(false)),
            last_update_ms: AtomicU64::new(NEVER_UPDATED),
            origin: Instant::now(),
            loop_task: Mutex::new(None),
        }
    }

    /// Replaces the desired subscription set, taking effect on the next
    /// loop tick.
    ///
    /// Calls made in quick succession coalesce: only the latest set is
    /// reconciled, and the loop is woken early only when the previous call
    /// was longer than the loop interval ago. The delay keeps a burst of
    /// changes from causing rate bans on exchanges. Call with an empty set
    /// to cancel all subscriptions.
    ///
    /// Never blocks and never fails.
    pub fn update_subscriptions(&self, subscriptions: SubscriptionSet) {
        *self.pending.lock() = Some(subscriptions);

        let now_ms = duration_millis(self.origin.elapsed());
        let last = self.last_update_ms.swap(now_ms, Ordering::AcqRel);
        let interval_ms = duration_millis(self.config.loop_interval);
        if last == NEVER_UPDATED || now_ms.saturating_sub(last) > interval_ms {
            self.nudge.notify_one();
        }
    }

    /// Returns the stream of ticker events for one market.
    pub fn ticker_stream(
        &self,
        spec: &TickerSpec,
    ) -> impl Stream<Item = TickerEvent> + Send + Unpin + 'static {
        let spec = spec.clone();
        self.bus.tickers().stream().filter(move |event| {
            let matched = event.spec == spec;
            if matched {
                debug!(spec = %event.spec, last = %event.ticker.last, "Ticker filtered");
            }
            std::future::ready(matched)
        })
    }

    /// Returns the stream of order book events for one market.
    pub fn order_book_stream(
        &self,
        spec: &TickerSpec,
    ) -> impl Stream<Item = OrderBookEvent> + Send + Unpin + 'static {
        let spec = spec.clone();
        self.bus
            .order_books()
            .stream()
            .filter(move |event| std::future::ready(event.spec == spec))
    }

    /// Returns the stream of public trade events for one market.
    pub fn trade_stream(
        &self,
        spec: &TickerSpec,
    ) -> impl Stream<Item = TradeEvent> + Send + Unpin + 'static {
        let spec = spec.clone();
        self.bus
            .trades()
            .stream()
            .filter(move |event| std::future::ready(event.spec == spec))
    }

    /// Returns the stream of open-orders events for one market.
    pub fn open_orders_stream(
        &self,
        spec: &TickerSpec,
    ) -> impl Stream<Item = OpenOrdersEvent> + Send + Unpin + 'static {
        let spec = spec.clone();
        self.bus
            .open_orders()
            .stream()
            .filter(move |event| std::future::ready(event.spec == spec))
    }

    /// Returns the stream of trade-history events for one market.
    pub fn trade_history_stream(
        &self,
        spec: &TickerSpec,
    ) -> impl Stream<Item = TradeHistoryEvent> + Send + Unpin + 'static {
        let spec = spec.clone();
        self.bus
            .trade_histories()
            .stream()
            .filter(move |event| std::future::ready(event.spec == spec))
    }

    /// Returns the stream for a subscription, dispatching on its data type.
    ///
    /// The underlying stream is the same one the typed accessors return,
    /// wrapped in the [`MarketEvent`] union.
    pub fn event_stream(&self, sub: &MarketDataSubscription) -> BoxStream<'static, MarketEvent> {
        match sub.data_type {
            MarketDataType::Ticker => self
                .ticker_stream(&sub.spec)
                .map(MarketEvent::Ticker)
                .boxed(),
            MarketDataType::OrderBook => self
                .order_book_stream(&sub.spec)
                .map(MarketEvent::OrderBook)
                .boxed(),
            MarketDataType::Trades => self
                .trade_stream(&sub.spec)
                .map(MarketEvent::Trade)
                .boxed(),
            MarketDataType::OpenOrders => self
                .open_orders_stream(&sub.spec)
                .map(MarketEvent::OpenOrders)
                .boxed(),
            MarketDataType::TradeHistory => self
                .trade_history_stream(&sub.spec)
                .map(MarketEvent::TradeHistory)
                .boxed(),
        }
    }

    /// Starts the reconcile/poll loop. Has no effect if already started.
    pub fn start(&self) {
        let mut slot = self.loop_task.lock();
        if slot.is_some() {
            warn!("Subscription manager already started");
            return;
        }

        self.running.store(true, Ordering::SeqCst);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let engine = ReconcileEngine::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.bus),
            self.config.clone(),
            Arc::clone(&self.pending),
        );
        let handle = tokio::spawn(run_loop(
            engine,
            Arc::clone(&self.pending),
            Arc::clone(&self.nudge),
            Arc::clone(&self.running),
            self.config.loop_interval,
            shutdown_rx,
        ));
        *slot = Some(LoopTask {
            handle,
            shutdown_tx,
        });
    }

    /// Stops the loop, disconnecting every exchange before returning.
    ///
    /// The desired set is first replaced with the empty set so the final
    /// reconciliation tears all connections down deterministically. Has no
    /// effect if not started.
    pub async fn stop(&self) {
        let task = self.loop_task.lock().take();
        let Some(task) = task else {
            return;
        };

        self.running.store(false, Ordering::SeqCst);
        self.update_subscriptions(SubscriptionSet::empty());
        let _ = task.shutdown_tx.send(()).await;
        if let Err(e) = task.handle.await {
            error!(error = %e, "Subscription loop ended abnormally");
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn duration_millis(duration: Duration) -> u64 {
    duration.as_millis().min(u128::from(u64::MAX - 1)) as u64
}

async fn run_loop(
    mut engine: ReconcileEngine,
    pending: PendingCell,
    nudge: Arc<Notify>,
    running: Arc<AtomicBool>,
    interval: Duration,
    mut shutdown_rx: mpsc::Receiver<()>,
) {
    info!("Market data subscription manager started");
    loop {
        debug!("Start subscription check");
        engine.reconcile().await;

        debug!("Start poll");
        engine.poll_active(&running).await;

        debug!("Going to sleep");
        tokio::select! {
            () = nudge.notified() => {}
            () = tokio::time::sleep(interval) => {}
            _ = shutdown_rx.recv() => {
                // Final pass with the empty set closes every exchange
                // deterministically rather than leaving teardown to drops.
                *pending.lock() = Some(SubscriptionSet::empty());
                engine.reconcile().await;
                break;
            }
        }
    }
    info!("Market data subscription manager stopped");
}
