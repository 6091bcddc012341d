//! Order book data structures.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Quantity, Timestamp};

use super::DataValidationError;

/// A single level in the order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    /// Price at this level
    pub price: Price,
    /// Quantity at this level
    pub quantity: Quantity,
}

impl OrderBookLevel {
    /// Creates a new order book level.
    #[must_use]
    pub const fn new(price: Price, quantity: Quantity) -> Self {
        Self { price, quantity }
    }
}

/// Order book snapshot.
///
/// Contains bid and ask levels sorted by price.
///
/// # Examples
///
/// ```
/// use tradewind_core::data::OrderBook;
/// use tradewind_core::types::{Price, Quantity, Timestamp};
/// use rust_decimal_macros::dec;
///
/// let book = OrderBook::builder()
///     .timestamp(Timestamp::now())
///     .bid(Price::new(dec!(41999)).unwrap(), Quantity::new(dec!(10)).unwrap())
///     .ask(Price::new(dec!(42001)).unwrap(), Quantity::new(dec!(8)).unwrap())
///     .build()
///     .unwrap();
/// assert!(book.spread().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    /// Snapshot timestamp
    pub timestamp: Timestamp,
    /// Bid levels (sorted by price descending - highest first)
    pub bids: Vec<OrderBookLevel>,
    /// Ask levels (sorted by price ascending - lowest first)
    pub asks: Vec<OrderBookLevel>,
}

impl OrderBook {
    /// Creates a new builder for `OrderBook`.
    #[must_use]
    pub fn builder() -> OrderBookBuilder {
        OrderBookBuilder::default()
    }

    /// Validates the order book.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp is zero or the book is crossed
    /// (best bid at or above best ask).
    pub fn validate(&self) -> Result<(), DataValidationError> {
        if self.timestamp.is_zero() {
            return Err(DataValidationError::InvalidTimestamp(
                "timestamp cannot be zero".to_string(),
            ));
        }

        if let (Some(best_bid), Some(best_ask)) = (self.best_bid(), self.best_ask()) {
            if best_bid.price >= best_ask.price {
                return Err(DataValidationError::CrossedOrderBook {
                    bid: best_bid.price.to_string(),
                    ask: best_ask.price.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Returns the best bid (highest bid price).
    #[must_use]
    pub fn best_bid(&self) -> Option<&OrderBookLevel> {
        self.bids.first()
    }

    /// Returns the best ask (lowest ask price).
    #[must_use]
    pub fn best_ask(&self) -> Option<&OrderBookLevel> {
        self.asks.first()
    }

    /// Returns the spread (best ask - best bid).
    #[must_use]
    pub fn spread(&self) -> Option<rust_decimal::Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.price - bid.price),
            _ => None,
        }
    }

    /// Returns the mid price ((best bid + best ask) / 2).
    #[must_use]
    pub fn mid_price(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => {
                let mid = (bid.price.as_decimal() + ask.price.as_decimal())
                    / rust_decimal::Decimal::TWO;
                Price::new(mid).ok()
            }
            _ => None,
        }
    }

    /// Returns the number of levels on the deeper side.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.bids.len().max(self.asks.len())
    }
}

/// Builder for [`OrderBook`].
#[derive(Debug, Default)]
pub struct OrderBookBuilder {
    timestamp: Option<Timestamp>,
    bids: Vec<OrderBookLevel>,
    asks: Vec<OrderBookLevel>,
}

impl OrderBookBuilder {
    /// Sets the snapshot timestamp.
    #[must_use]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Appends a bid level. Levels are expected highest-first.
    #[must_use]
    pub fn bid(mut self, price: Price, quantity: Quantity) -> Self {
        self.bids.push(OrderBookLevel::new(price, quantity));
        self
    }

    /// Appends an ask level. Levels are expected lowest-first.
    #[must_use]
    pub fn ask(mut self, price: Price, quantity: Quantity) -> Self {
        self.asks.push(OrderBookLevel::new(price, quantity));
        self
    }

    /// Builds and validates the `OrderBook`.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp is missing or validation fails.
    pub fn build(self) -> Result<OrderBook, DataValidationError> {
        let book = OrderBook {
            timestamp: self
                .timestamp
                .ok_or(DataValidationError::MissingField("timestamp"))?,
            bids: self.bids,
            asks: self.asks,
        };
        book.validate()?;
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn level(p: rust_decimal::Decimal, q: rust_decimal::Decimal) -> (Price, Quantity) {
        (Price::new(p).unwrap(), Quantity::new(q).unwrap())
    }

    fn two_sided_book() -> OrderBook {
        let (bp1, bq1) = level(dec!(41999), dec!(10));
        let (bp2, bq2) = level(dec!(41998), dec!(20));
        let (ap1, aq1) = level(dec!(42001), dec!(8));
        let (ap2, aq2) = level(dec!(42002), dec!(15));
        OrderBook::builder()
            .timestamp(Timestamp::new(1_704_067_200_000).unwrap())
            .bid(bp1, bq1)
            .bid(bp2, bq2)
            .ask(ap1, aq1)
            .ask(ap2, aq2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_best_bid_and_ask() {
        let book = two_sided_book();
        assert_eq!(book.best_bid().unwrap().price.as_decimal(), dec!(41999));
        assert_eq!(book.best_ask().unwrap().price.as_decimal(), dec!(42001));
    }

    #[test]
    fn test_spread_and_mid() {
        let book = two_sided_book();
        assert_eq!(book.spread(), Some(dec!(2)));
        assert_eq!(book.mid_price().unwrap().as_decimal(), dec!(42000));
    }

    #[test]
    fn test_crossed_book_rejected() {
        let (bp, bq) = level(dec!(42002), dec!(1));
        let (ap, aq) = level(dec!(42001), dec!(1));
        let result = OrderBook::builder()
            .timestamp(Timestamp::now())
            .bid(bp, bq)
            .ask(ap, aq)
            .build();
        assert!(matches!(
            result,
            Err(DataValidationError::CrossedOrderBook { .. })
        ));
    }

    #[test]
    fn test_empty_book_is_valid() {
        let book = OrderBook::builder()
            .timestamp(Timestamp::now())
            .build()
            .unwrap();
        assert!(book.spread().is_none());
        assert_eq!(book.depth(), 0);
    }

    #[test]
    fn test_depth() {
        let book = two_sided_book();
        assert_eq!(book.depth(), 2);
    }
}
