//! Currency pair type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A base/counter asset pair, e.g. `BTC/USDT`.
///
/// Asset codes are uppercase alphanumeric. Equality is structural, so pairs
/// can be used as keys when mapping subscriptions onto exchange connections.
///
/// # Examples
///
/// ```
/// use tradewind_core::types::CurrencyPair;
///
/// let pair = CurrencyPair::new("BTC", "USDT").unwrap();
/// assert_eq!(pair.to_string(), "BTC/USDT");
/// assert_eq!(pair, "BTC/USDT".parse().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Base asset code (the asset being priced).
    pub base: String,
    /// Counter asset code (the asset prices are quoted in).
    pub counter: String,
}

impl CurrencyPair {
    /// Creates a new `CurrencyPair` from base and counter asset codes.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidAsset` if either code is empty or
    /// contains non-uppercase-alphanumeric characters.
    pub fn new(base: impl Into<String>, counter: impl Into<String>) -> Result<Self, ValidationError> {
        let base = base.into();
        let counter = counter.into();
        validate_asset(&base)?;
        validate_asset(&counter)?;
        Ok(Self { base, counter })
    }

    /// Creates a new `CurrencyPair` without validation.
    ///
    /// The caller must ensure both codes are valid asset codes.
    #[must_use]
    pub fn new_unchecked(base: impl Into<String>, counter: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            counter: counter.into(),
        }
    }
}

fn validate_asset(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err(ValidationError::InvalidAsset(code.to_string()));
    }
    Ok(())
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.counter)
    }
}

impl FromStr for CurrencyPair {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, counter) = s
            .split_once('/')
            .ok_or_else(|| ValidationError::InvalidPair(s.to_string()))?;
        Self::new(base, counter).map_err(|_| ValidationError::InvalidPair(s.to_string()))
    }
}
