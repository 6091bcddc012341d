//! Trade adapter trait definitions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::data::{LimitOrder, OpenOrder, UserTrade};
use crate::error::ExchangeResult;
use crate::types::CurrencyPair;

/// Paging hint for history queries.
///
/// Adapters apply as much of the hint as their exchange supports and
/// ignore the rest; exchanges with no paging return their default window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    /// Zero-based page number
    pub page: u32,
    /// Maximum entries per page
    pub page_size: u32,
}

impl Paging {
    /// Creates a hint for the first page with the given size.
    #[must_use]
    pub const fn first(page_size: u32) -> Self {
        Self { page: 0, page_size }
    }
}

/// Authenticated order and trade-history calls against one exchange.
///
/// How a pair filter or paging hint is expressed on the wire is the
/// adapter's concern; exchanges that cannot filter by pair return
/// [`ExchangeError::NotSupported`](crate::error::ExchangeError::NotSupported).
#[async_trait]
pub trait TradeAdapter: Send + Sync {
    /// Fetches the caller's resting orders on a pair.
    async fn open_orders(&self, pair: &CurrencyPair) -> ExchangeResult<Vec<OpenOrder>>;

    /// Fetches the caller's recent executions on a pair.
    async fn trade_history(
        &self,
        pair: &CurrencyPair,
        paging: Paging,
    ) -> ExchangeResult<Vec<UserTrade>>;

    /// Submits a limit order, returning the exchange-assigned order id.
    async fn place_limit_order(&self, order: &LimitOrder) -> ExchangeResult<String>;
}
