//! Exchange adapter registry.
//!
//! Resolves an exchange identifier to the adapters the enclosing
//! application registered for it, and classifies exchanges as
//! streaming-capable or polling-only.

use std::collections::HashMap;
use std::sync::Arc;

use tradewind_core::error::{ExchangeError, ExchangeResult};
use tradewind_core::traits::{ExchangeAdapter, TradeAdapter};
use tradewind_core::types::ExchangeId;

/// Registered adapters, keyed by exchange.
///
/// Built once at startup and shared immutably; the subscription manager
/// never registers or removes exchanges at runtime.
pub struct ExchangeRegistry {
    adapters: HashMap<ExchangeId, Arc<dyn ExchangeAdapter>>,
    trade_adapters: HashMap<ExchangeId, Arc<dyn TradeAdapter>>,
}

impl ExchangeRegistry {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ExchangeRegistryBuilder {
        ExchangeRegistryBuilder::default()
    }

    /// Resolves the market data adapter for an exchange.
    ///
    /// # Errors
    ///
    /// Returns `ExchangeError::UnknownExchange` if no adapter was
    /// registered for the identifier.
    pub fn adapter(&self, exchange: &ExchangeId) -> ExchangeResult<Arc<dyn ExchangeAdapter>> {
        self.adapters
            .get(exchange)
            .cloned()
            .ok_or_else(|| ExchangeError::UnknownExchange {
                exchange: exchange.clone(),
            })
    }

    /// Resolves the trade adapter for an exchange.
    ///
    /// # Errors
    ///
    /// Returns `ExchangeError::UnknownExchange` if no trade adapter was
    /// registered for the identifier.
    pub fn trade_adapter(&self, exchange: &ExchangeId) -> ExchangeResult<Arc<dyn TradeAdapter>> {
        self.trade_adapters
            .get(exchange)
            .cloned()
            .ok_or_else(|| ExchangeError::UnknownExchange {
                exchange: exchange.clone(),
            })
    }

    /// Returns true if the exchange exposes push streams.
    ///
    /// # Errors
    ///
    /// Returns `ExchangeError::UnknownExchange` if no adapter was
    /// registered for the identifier.
    pub fn is_streaming(&self, exchange: &ExchangeId) -> ExchangeResult<bool> {
        Ok(self.adapter(exchange)?.streaming().is_some())
    }

    /// Iterates over the registered exchange identifiers.
    pub fn exchanges(&self) -> impl Iterator<Item = &ExchangeId> {
        self.adapters.keys()
    }
}

/// Builder for [`ExchangeRegistry`].
#[derive(Default)]
pub struct ExchangeRegistryBuilder {
    adapters: HashMap<ExchangeId, Arc<dyn ExchangeAdapter>>,
    trade_adapters: HashMap<ExchangeId, Arc<dyn TradeAdapter>>,
}

impl ExchangeRegistryBuilder {
    /// Registers a market data adapter under its own identifier.
    #[must_use]
    pub fn adapter(mut self, adapter: Arc<dyn ExchangeAdapter>) -> Self {
        self.adapters.insert(adapter.id().clone(), adapter);
        self
    }

    /// Registers a trade adapter for an exchange.
    #[must_use]
    pub fn trade_adapter(
        mut self,
        exchange: ExchangeId,
        adapter: Arc<dyn TradeAdapter>,
    ) -> Self {
        self.trade_adapters.insert(exchange, adapter);
        self
    }

    /// Builds the registry.
    #[must_use]
    pub fn build(self) -> ExchangeRegistry {
        ExchangeRegistry {
            adapters: self.adapters,
            trade_adapters: self.trade_adapters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::MockExchange;

    #[test]
    fn test_resolves_registered_adapter() {
        let exchange = MockExchange::streaming("binance");
        let registry = ExchangeRegistry::builder()
            .adapter(exchange.clone())
            .build();

        let resolved = registry
            .adapter(&ExchangeId::new("binance").unwrap())
            .unwrap();
        assert_eq!(resolved.id().as_str(), "binance");
    }

    #[test]
    fn test_unknown_exchange() {
        let registry = ExchangeRegistry::builder().build();
        let missing = ExchangeId::new("missing").unwrap();
        assert!(matches!(
            registry.adapter(&missing),
            Err(ExchangeError::UnknownExchange { .. })
        ));
        assert!(registry.trade_adapter(&missing).is_err());
    }

    #[test]
    fn test_streaming_classification() {
        let registry = ExchangeRegistry::builder()
            .adapter(MockExchange::streaming("binance"))
            .adapter(MockExchange::polling_only("kraken"))
            .build();

        assert!(registry
            .is_streaming(&ExchangeId::new("binance").unwrap())
            .unwrap());
        assert!(!registry
            .is_streaming(&ExchangeId::new("kraken").unwrap())
            .unwrap());
    }
}
