//! # Tradewind Market
//!
//! Market data subscription manager for the Tradewind trading system.
//!
//! This crate maintains subscriptions to multiple exchanges' market data,
//! using push streams where an exchange supports them and polling where it
//! doesn't, with the difference abstracted away. Consumers declare a
//! desired set of subscriptions and read uniform per-type event streams.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   MarketDataManager                       │
//! │  update_subscriptions() ─► pending set ─► reconcile loop  │
//! │                                              │            │
//! │              ┌───────────────────────────────┤            │
//! │              ▼                               ▼            │
//! │     StreamingSession (per exchange)     polling fetches   │
//! │              │                               │            │
//! │              └──────────► EventBus ◄─────────┘            │
//! │                              │                            │
//! │            ticker/book/trade/orders/history streams       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tradewind_market::{MarketDataManager, MarketDataSubscription, MarketDataType, SubscriptionSet};
//! use tradewind_core::types::TickerSpec;
//!
//! let manager = MarketDataManager::new(registry, config);
//! manager.start();
//!
//! let spec = TickerSpec::new("binance", "BTC", "USDT")?;
//! let mut tickers = manager.ticker_stream(&spec);
//!
//! manager.update_subscriptions(SubscriptionSet::from_iter([
//!     MarketDataSubscription::new(spec, MarketDataType::Ticker),
//! ]));
//!
//! while let Some(event) = tickers.next().await {
//!     println!("{}: {}", event.spec, event.ticker.last);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

/// Subscription value types
pub mod subscription;

/// Event types emitted on the bus
pub mod event;

/// Per-type fan-out topics
pub mod bus;

/// Exchange adapter registry
pub mod registry;

mod manager;
mod poll;
mod reconcile;
mod session;

#[cfg(test)]
pub(crate) mod testkit;

pub use bus::{EventBus, Topic};
pub use event::{
    MarketEvent, OpenOrdersEvent, OrderBookEvent, TickerEvent, TradeEvent, TradeHistoryEvent,
};
pub use manager::MarketDataManager;
pub use registry::{ExchangeRegistry, ExchangeRegistryBuilder};
pub use subscription::{MarketDataSubscription, MarketDataType, SubscriptionSet};
