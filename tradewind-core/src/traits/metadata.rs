//! Market metadata trait definitions.

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::ExchangeResult;
use crate::types::{Price, Quantity, TickerSpec};

/// Price and quantity scale for a market.
///
/// Consumed by downstream order-sizing code; the subscription manager
/// itself does not use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairMetadata {
    /// Decimal places accepted for prices
    pub price_scale: u32,
    /// Decimal places accepted for quantities
    pub quantity_scale: u32,
    /// Smallest order quantity the exchange accepts, where published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_quantity: Option<Quantity>,
}

impl PairMetadata {
    /// Truncates a price to this market's price scale.
    #[must_use]
    pub fn round_price(&self, price: Price) -> Price {
        Price::new_unchecked(truncate(price.as_decimal(), self.price_scale))
    }

    /// Truncates a quantity to this market's quantity scale.
    #[must_use]
    pub fn round_quantity(&self, quantity: Quantity) -> Quantity {
        Quantity::new_unchecked(truncate(quantity.as_decimal(), self.quantity_scale))
    }
}

fn truncate(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::ToZero)
}

/// Lookup of [`PairMetadata`] for a market.
#[async_trait]
pub trait PairMetadataProvider: Send + Sync {
    /// Returns the metadata for a market.
    async fn metadata(&self, spec: &TickerSpec) -> ExchangeResult<PairMetadata>;
}
