//! Adapter trait definitions.
//!
//! The subscription manager depends on, but does not implement, the
//! contracts in this module. Concrete exchange integrations live in the
//! enclosing application and are injected through these traits:
//!
//! - [`ExchangeAdapter`] - Entry point for one exchange, classifying it as
//!   streaming-capable or polling-only
//! - [`MarketDataService`] - Request/response market data calls
//! - [`StreamingMarketData`] - Push-based market data connections
//! - [`TradeAdapter`] - Authenticated order and trade-history calls
//! - [`PairMetadataProvider`] - Price/quantity scale lookup for a market

mod adapter;
mod metadata;
mod trade;

pub use adapter::{
    ExchangeAdapter, MarketDataService, MarketDataStream, ProductSubscription,
    ProductSubscriptionBuilder, StreamingMarketData,
};
pub use metadata::{PairMetadata, PairMetadataProvider};
pub use trade::{Paging, TradeAdapter};
