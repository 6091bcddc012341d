//! Exchange-related error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ExchangeId;

/// Errors raised by exchange adapters and surfaced to the subscription
/// manager.
///
/// # Examples
///
/// ```
/// use tradewind_core::error::ExchangeError;
///
/// let error = ExchangeError::RateLimited { retry_after_ms: 1000 };
/// assert!(error.is_recoverable());
/// assert!(error.to_string().contains("1000ms"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeError {
    /// Establishing the physical connection failed.
    #[error("[Exchange] Connection failed: {reason}")]
    ConnectionFailed {
        /// Reason for the connection failure.
        reason: String,
    },

    /// An operation timed out.
    #[error("[Exchange] Timed out after {timeout_ms}ms")]
    Timeout {
        /// Elapsed time before giving up, in milliseconds.
        timeout_ms: u64,
    },

    /// API rate limit exceeded.
    #[error("[Exchange] Rate limited, retry after {retry_after_ms}ms")]
    RateLimited {
        /// Time to wait before retrying in milliseconds.
        retry_after_ms: u64,
    },

    /// The exchange does not support the requested operation.
    #[error("[Exchange] {exchange} does not support {operation}")]
    NotSupported {
        /// Exchange that rejected the operation.
        exchange: ExchangeId,
        /// Human-readable operation name.
        operation: String,
    },

    /// The exchange is not registered with the system.
    #[error("[Exchange] Unknown exchange: {exchange}")]
    UnknownExchange {
        /// The unrecognized exchange identifier.
        exchange: ExchangeId,
    },

    /// The exchange API returned an error response.
    #[error("[Exchange] API error: code={code}, message={message}")]
    Api {
        /// Error code from the exchange.
        code: i32,
        /// Error message from the exchange.
        message: String,
    },

    /// A push stream terminated unexpectedly.
    #[error("[Exchange] Stream closed: {reason}")]
    StreamClosed {
        /// Reason the stream ended.
        reason: String,
    },

    /// A response could not be decoded.
    #[error("[Exchange] Malformed response: {reason}")]
    MalformedResponse {
        /// Description of the decode failure.
        reason: String,
    },
}

impl ExchangeError {
    /// Creates a `NotSupported` error for the given exchange and operation.
    #[must_use]
    pub fn not_supported(exchange: ExchangeId, operation: impl Into<String>) -> Self {
        Self::NotSupported {
            exchange,
            operation: operation.into(),
        }
    }

    /// Returns true if the failure is transient and the operation can be
    /// retried on a later tick.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. }
            | Self::Timeout { .. }
            | Self::RateLimited { .. }
            | Self::Api { .. }
            | Self::StreamClosed { .. }
            | Self::MalformedResponse { .. } => true,
            Self::NotSupported { .. } | Self::UnknownExchange { .. } => false,
        }
    }

    /// Returns a suggested retry delay in milliseconds, if the exchange
    /// provided one.
    #[must_use]
    pub const fn suggested_retry_delay_ms(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange() -> ExchangeId {
        ExchangeId::new("kraken").unwrap()
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(ExchangeError::Timeout { timeout_ms: 5000 }.is_recoverable());
        assert!(ExchangeError::RateLimited {
            retry_after_ms: 100
        }
        .is_recoverable());
        assert!(!ExchangeError::not_supported(exchange(), "trades polling").is_recoverable());
        assert!(!ExchangeError::UnknownExchange {
            exchange: exchange()
        }
        .is_recoverable());
    }

    #[test]
    fn test_retry_delay() {
        let err = ExchangeError::RateLimited {
            retry_after_ms: 2000,
        };
        assert_eq!(err.suggested_retry_delay_ms(), Some(2000));
        assert_eq!(
            ExchangeError::Timeout { timeout_ms: 1 }.suggested_retry_delay_ms(),
            None
        );
    }

    #[test]
    fn test_display() {
        let err = ExchangeError::not_supported(exchange(), "trades polling");
        assert_eq!(
            err.to_string(),
            "[Exchange] kraken does not support trades polling"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let err = ExchangeError::Api {
            code: 429,
            message: "too many requests".to_string(),
        };
        let json = serde_json::to_string(&err).unwrap();
        let parsed: ExchangeError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, parsed);
    }
}
