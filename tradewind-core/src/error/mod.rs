//! Error types and handling.
//!
//! This module provides the error taxonomy for the market data system:
//!
//! - [`ExchangeError`] - Failures talking to an exchange (connect, fetch, stream)
//! - [`ConfigError`] - Configuration validation failures
//!
//! Transient upstream failures are modeled as recoverable
//! ([`ExchangeError::is_recoverable`]); the subscription manager logs and
//! retries them on the next tick rather than surfacing them to stream
//! consumers.

mod config;
mod exchange;

pub use config::ConfigError;
pub use exchange::ExchangeError;

/// A specialized `Result` type for exchange operations.
pub type ExchangeResult<T> = std::result::Result<T, ExchangeError>;
