//! Ticker specification type.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CurrencyPair, ExchangeId, ValidationError};

/// The `(exchange, base, counter)` triple uniquely identifying a market.
///
/// A `TickerSpec` is the unit every subscription and every emitted event is
/// keyed by. It is immutable and compares structurally, so two specs built
/// from the same parts are interchangeable as map keys and filter arguments.
///
/// # Examples
///
/// ```
/// use tradewind_core::types::TickerSpec;
///
/// let spec = TickerSpec::new("binance", "BTC", "USDT").unwrap();
/// assert_eq!(spec.currency_pair().to_string(), "BTC/USDT");
/// assert_eq!(spec.to_string(), "binance:BTC/USDT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TickerSpec {
    exchange: ExchangeId,
    base: String,
    counter: String,
}

impl TickerSpec {
    /// Creates a new `TickerSpec`.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if the exchange identifier or either
    /// asset code is malformed.
    pub fn new(
        exchange: impl Into<String>,
        base: impl Into<String>,
        counter: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let exchange = ExchangeId::new(exchange)?;
        let pair = CurrencyPair::new(base, counter)?;
        Ok(Self {
            exchange,
            base: pair.base,
            counter: pair.counter,
        })
    }

    /// Creates a new `TickerSpec` from already-validated parts.
    #[must_use]
    pub fn from_parts(exchange: ExchangeId, pair: CurrencyPair) -> Self {
        Self {
            exchange,
            base: pair.base,
            counter: pair.counter,
        }
    }

    /// Returns the exchange this market lives on.
    #[must_use]
    pub fn exchange(&self) -> &ExchangeId {
        &self.exchange
    }

    /// Returns the base asset code.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the counter asset code.
    #[must_use]
    pub fn counter(&self) -> &str {
        &self.counter
    }

    /// Derives the currency pair for this market.
    #[must_use]
    pub fn currency_pair(&self) -> CurrencyPair {
        CurrencyPair::new_unchecked(self.base.clone(), self.counter.clone())
    }
}

impl fmt::Display for TickerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.exchange, self.base, self.counter)
    }
}
