//! Configuration for the subscription manager.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Configuration consumed by the subscription manager.
///
/// Exchange credentials and endpoints are not part of this structure;
/// adapters are constructed and authenticated by the enclosing application
/// and injected fully formed.
///
/// # Example YAML
///
/// ```yaml
/// market_data:
///   loop_interval: 15s
///   order_book_depth: 20
///   trade_history_limit: 20
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketDataConfig {
    /// Minimum interval between reconciliation passes, and the sleep unit
    /// of the subscription loop. Must be at least one second.
    #[serde(default = "default_loop_interval", with = "humantime_serde")]
    pub loop_interval: Duration,

    /// Levels requested per side when polling order books.
    #[serde(default = "default_order_book_depth")]
    pub order_book_depth: u32,

    /// Maximum entries requested per trade-history poll.
    #[serde(default = "default_trade_history_limit")]
    pub trade_history_limit: u32,
}

fn default_loop_interval() -> Duration {
    Duration::from_secs(15)
}

fn default_order_book_depth() -> u32 {
    20
}

fn default_trade_history_limit() -> u32 {
    20
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            loop_interval: default_loop_interval(),
            order_book_depth: default_order_book_depth(),
            trade_history_limit: default_trade_history_limit(),
        }
    }
}

impl MarketDataConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the loop interval is below
    /// one second or either limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loop_interval < Duration::from_secs(1) {
            return Err(ConfigError::invalid_value(
                "loop_interval",
                "must be at least 1s",
            ));
        }
        if self.order_book_depth == 0 {
            return Err(ConfigError::invalid_value(
                "order_book_depth",
                "must be greater than zero",
            ));
        }
        if self.trade_history_limit == 0 {
            return Err(ConfigError::invalid_value(
                "trade_history_limit",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
