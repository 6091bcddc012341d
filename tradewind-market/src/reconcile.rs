//! Subscription reconciliation.
//!
//! The engine moves the live subscription state toward the pending desired
//! state, one pass at a time, on the manager's single loop task:
//!
//! 1. Take-and-clear the pending set; nothing pending means nothing to do.
//! 2. Group the desired subscriptions by exchange.
//! 3. For each exchange holding a live connection, compare its current
//!    streaming subscriptions against the desired streaming target. A
//!    mismatch tears the whole connection down; push libraries only
//!    support connect-with-subscriptions, so rebuild is the only correct
//!    reconciliation.
//! 4. Open fresh connections for changed exchanges with a non-empty
//!    target, and collect every polled subscription into the active
//!    polling set.
//!
//! Any failure aborts the pass and restores the pending set so the next
//! tick retries, unless a newer desired set arrived in the meantime.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info};

use tradewind_core::config::MarketDataConfig;
use tradewind_core::error::ExchangeResult;
use tradewind_core::types::ExchangeId;

use crate::bus::EventBus;
use crate::poll;
use crate::registry::ExchangeRegistry;
use crate::session::StreamingSession;
use crate::subscription::{MarketDataSubscription, SubscriptionSet};

/// The atomic pending-set cell shared between the manager's surface and
/// the engine. `Some` holds a desired set not yet reconciled.
pub(crate) type PendingCell = Arc<Mutex<Option<SubscriptionSet>>>;

/// Owns all per-exchange runtime state. Mutated only by the loop task.
pub(crate) struct ReconcileEngine {
    registry: Arc<ExchangeRegistry>,
    bus: Arc<EventBus>,
    config: MarketDataConfig,
    pending: PendingCell,
    sessions: HashMap<ExchangeId, StreamingSession>,
    active_polling: BTreeSet<MarketDataSubscription>,
}

impl ReconcileEngine {
    pub(crate) fn new(
        registry: Arc<ExchangeRegistry>,
        bus: Arc<EventBus>,
        config: MarketDataConfig,
        pending: PendingCell,
    ) -> Self {
        Self {
            registry,
            bus,
            config,
            pending,
            sessions: HashMap::new(),
            active_polling: BTreeSet::new(),
        }
    }

    /// Performs one reconciliation pass against the pending set, if any.
    pub(crate) async fn reconcile(&mut self) {
        let Some(desired) = self.pending.lock().take() else {
            return;
        };

        debug!(subscriptions = desired.len(), "Updating subscriptions");
        if let Err(e) = self.apply(&desired).await {
            error!(error = %e, "Error updating subscriptions");
            // Retry on the next tick, unless a newer set superseded this one.
            let mut pending = self.pending.lock();
            if pending.is_none() {
                *pending = Some(desired);
            }
        }
    }

    async fn apply(&mut self, desired: &SubscriptionSet) -> ExchangeResult<()> {
        let by_exchange = desired.by_exchange();
        let unchanged = self.disconnect_changed(&by_exchange).await?;
        self.subscribe(&by_exchange, &unchanged).await
    }

    /// Disconnects every exchange whose live streaming subscriptions
    /// mismatch the desired streaming target, returning the exchanges left
    /// untouched.
    async fn disconnect_changed(
        &mut self,
        by_exchange: &HashMap<ExchangeId, HashSet<MarketDataSubscription>>,
    ) -> ExchangeResult<HashSet<ExchangeId>> {
        let mut unchanged = HashSet::new();
        let mut changed = Vec::with_capacity(self.sessions.len());

        for (exchange, session) in &self.sessions {
            let target = streaming_target(by_exchange, exchange);
            debug!(
                exchange = %exchange,
                current = session.subscriptions().len(),
                target = target.len(),
                "Comparing streaming subscriptions"
            );
            if *session.subscriptions() == target {
                unchanged.insert(exchange.clone());
            } else {
                changed.push(exchange.clone());
            }
        }

        for exchange in changed {
            info!(exchange = %exchange, "Disconnecting from exchange");
            if let Some(session) = self.sessions.remove(&exchange) {
                session.close().await?;
            }
            info!(exchange = %exchange, "Disconnected from exchange");
        }

        Ok(unchanged)
    }

    /// Opens sessions for changed streaming exchanges and rebuilds the
    /// active polling set.
    async fn subscribe(
        &mut self,
        by_exchange: &HashMap<ExchangeId, HashSet<MarketDataSubscription>>,
        unchanged: &HashSet<ExchangeId>,
    ) -> ExchangeResult<()> {
        let mut polling = BTreeSet::new();

        for (exchange, subscriptions) in by_exchange {
            let adapter = self.registry.adapter(exchange)?;
            if let Some(streaming) = adapter.streaming() {
                if !unchanged.contains(exchange) {
                    let target = streaming_target(by_exchange, exchange);
                    if !target.is_empty() {
                        let session = StreamingSession::open(
                            exchange.clone(),
                            streaming,
                            target,
                            Arc::clone(&self.bus),
                        )
                        .await?;
                        self.sessions.insert(exchange.clone(), session);
                    }
                }
                polling.extend(
                    subscriptions
                        .iter()
                        .filter(|s| !s.data_type.is_streaming())
                        .cloned(),
                );
            } else {
                polling.extend(subscriptions.iter().cloned());
            }
        }

        self.active_polling = polling;
        debug!(polls = self.active_polling.len(), "Polling set updated");
        Ok(())
    }

    /// Polls every active subscription sequentially, checking for
    /// cancellation between fetches.
    pub(crate) async fn poll_active(&self, running: &AtomicBool) {
        for sub in &self.active_polling {
            if !running.load(Ordering::Relaxed) {
                break;
            }
            poll::fetch_and_publish(&self.registry, &self.bus, &self.config, sub).await;
        }
    }

    #[cfg(test)]
    pub(crate) fn active_polling(&self) -> &BTreeSet<MarketDataSubscription> {
        &self.active_polling
    }

    #[cfg(test)]
    pub(crate) fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

fn streaming_target(
    by_exchange: &HashMap<ExchangeId, HashSet<MarketDataSubscription>>,
    exchange: &ExchangeId,
) -> BTreeSet<MarketDataSubscription> {
    by_exchange
        .get(exchange)
        .map(|subs| {
            subs.iter()
                .filter(|s| s.data_type.is_streaming())
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}
