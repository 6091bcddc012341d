//! Configuration error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when validating configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigError {
    /// A field holds a value outside its permitted range.
    #[error("[Config] Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Field path, e.g. `loop_interval`.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Creates an `InvalidValue` error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ConfigError::invalid_value("loop_interval", "must be at least 1s");
        assert_eq!(
            err.to_string(),
            "[Config] Invalid value for loop_interval: must be at least 1s"
        );
    }
}
