//! Exchange identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Identifier of an exchange known to the system.
///
/// Wraps a `String` with validation: identifiers are non-empty, lowercase
/// alphanumeric plus `-` and `_`. Exchange names are used as map keys
/// throughout the subscription manager, so equality and hashing are
/// structural.
///
/// # Examples
///
/// ```
/// use tradewind_core::types::ExchangeId;
///
/// let id = ExchangeId::new("binance").unwrap();
/// assert_eq!(id.as_str(), "binance");
/// assert!(ExchangeId::new("Binance").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeId(String);

impl ExchangeId {
    /// Creates a new `ExchangeId` from a string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyExchange` if the string is empty.
    /// Returns `ValidationError::InvalidExchange` if it contains characters
    /// outside lowercase alphanumerics, `-`, and `_`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.is_empty() {
            return Err(ValidationError::EmptyExchange);
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(ValidationError::InvalidExchange(s));
        }
        Ok(Self(s))
    }

    /// Creates a new `ExchangeId` without validation.
    ///
    /// The caller must ensure the value is a valid identifier.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExchangeId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ExchangeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ExchangeId> for String {
    fn from(id: ExchangeId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_id_valid() {
        let id = ExchangeId::new("kraken").unwrap();
        assert_eq!(id.as_str(), "kraken");
    }

    #[test]
    fn test_exchange_id_empty() {
        assert!(matches!(
            ExchangeId::new(""),
            Err(ValidationError::EmptyExchange)
        ));
    }

    #[test]
    fn test_exchange_id_rejects_uppercase() {
        assert!(matches!(
            ExchangeId::new("Kraken"),
            Err(ValidationError::InvalidExchange(_))
        ));
    }

    #[test]
    fn test_exchange_id_allows_separators() {
        assert!(ExchangeId::new("gate-io").is_ok());
        assert!(ExchangeId::new("gate_io").is_ok());
    }

    #[test]
    fn test_exchange_id_display() {
        let id = ExchangeId::new("bitfinex").unwrap();
        assert_eq!(format!("{id}"), "bitfinex");
    }
}
