//! Ticker (top-of-book snapshot) data structures.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Quantity, Timestamp};

use super::DataValidationError;

/// Latest top-of-book snapshot for a market.
///
/// Carries the best bid, best ask, and last traded price, plus optional
/// 24-hour statistics where the exchange provides them.
///
/// # Examples
///
/// ```
/// use tradewind_core::data::Ticker;
/// use tradewind_core::types::{Price, Timestamp};
/// use rust_decimal_macros::dec;
///
/// let ticker = Ticker::builder()
///     .bid(Price::new(dec!(41999)).unwrap())
///     .ask(Price::new(dec!(42001)).unwrap())
///     .last(Price::new(dec!(42000)).unwrap())
///     .timestamp(Timestamp::now())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    /// Best bid price
    pub bid: Price,
    /// Best ask price
    pub ask: Price,
    /// Last traded price
    pub last: Price,
    /// 24-hour high, where provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_24h: Option<Price>,
    /// 24-hour low, where provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_24h: Option<Price>,
    /// 24-hour traded volume, where provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_24h: Option<Quantity>,
    /// Snapshot timestamp
    pub timestamp: Timestamp,
}

impl Ticker {
    /// Creates a new builder for `Ticker`.
    #[must_use]
    pub fn builder() -> TickerBuilder {
        TickerBuilder::default()
    }
}

/// Builder for [`Ticker`].
#[derive(Debug, Default)]
pub struct TickerBuilder {
    bid: Option<Price>,
    ask: Option<Price>,
    last: Option<Price>,
    high_24h: Option<Price>,
    low_24h: Option<Price>,
    volume_24h: Option<Quantity>,
    timestamp: Option<Timestamp>,
}

impl TickerBuilder {
    /// Sets the best bid price.
    #[must_use]
    pub fn bid(mut self, bid: Price) -> Self {
        self.bid = Some(bid);
        self
    }

    /// Sets the best ask price.
    #[must_use]
    pub fn ask(mut self, ask: Price) -> Self {
        self.ask = Some(ask);
        self
    }

    /// Sets the last traded price.
    #[must_use]
    pub fn last(mut self, last: Price) -> Self {
        self.last = Some(last);
        self
    }

    /// Sets the 24-hour high.
    #[must_use]
    pub fn high_24h(mut self, high: Price) -> Self {
        self.high_24h = Some(high);
        self
    }

    /// Sets the 24-hour low.
    #[must_use]
    pub fn low_24h(mut self, low: Price) -> Self {
        self.low_24h = Some(low);
        self
    }

    /// Sets the 24-hour volume.
    #[must_use]
    pub fn volume_24h(mut self, volume: Quantity) -> Self {
        self.volume_24h = Some(volume);
        self
    }

    /// Sets the snapshot timestamp.
    #[must_use]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builds the `Ticker`.
    ///
    /// # Errors
    ///
    /// Returns `DataValidationError::MissingField` if a required field was
    /// not provided, or `InvalidTimestamp` if the timestamp is zero.
    pub fn build(self) -> Result<Ticker, DataValidationError> {
        let ticker = Ticker {
            bid: self.bid.ok_or(DataValidationError::MissingField("bid"))?,
            ask: self.ask.ok_or(DataValidationError::MissingField("ask"))?,
            last: self.last.ok_or(DataValidationError::MissingField("last"))?,
            high_24h: self.high_24h,
            low_24h: self.low_24h,
            volume_24h: self.volume_24h,
            timestamp: self
                .timestamp
                .ok_or(DataValidationError::MissingField("timestamp"))?,
        };
        if ticker.timestamp.is_zero() {
            return Err(DataValidationError::InvalidTimestamp(
                "timestamp cannot be zero".to_string(),
            ));
        }
        Ok(ticker)
    }
}
