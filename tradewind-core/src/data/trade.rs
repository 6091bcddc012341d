//! Trade data structures.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Quantity, Timestamp};

use super::Side;

/// A trade from the public feed of a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicTrade {
    /// Exchange-assigned trade identifier, where provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Taker side
    pub side: Side,
    /// Execution price
    pub price: Price,
    /// Executed quantity
    pub quantity: Quantity,
    /// Execution timestamp
    pub timestamp: Timestamp,
}

/// One of the caller's own executions, as returned by trade-history queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTrade {
    /// Exchange-assigned trade identifier
    pub id: String,
    /// Identifier of the order this execution filled
    pub order_id: String,
    /// Side of the filled order
    pub side: Side,
    /// Execution price
    pub price: Price,
    /// Executed quantity
    pub quantity: Quantity,
    /// Fee charged for this execution
    pub fee: rust_decimal::Decimal,
    /// Currency the fee was charged in
    pub fee_currency: String,
    /// Execution timestamp
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_public_trade_serde_roundtrip() {
        let trade = PublicTrade {
            id: Some("t-1".to_string()),
            side: Side::Sell,
            price: Price::new(dec!(42000)).unwrap(),
            quantity: Quantity::new(dec!(0.25)).unwrap(),
            timestamp: Timestamp::new(1_704_067_200_000).unwrap(),
        };
        let json = serde_json::to_string(&trade).unwrap();
        let parsed: PublicTrade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, parsed);
    }

    #[test]
    fn test_user_trade_fields() {
        let trade = UserTrade {
            id: "t-9".to_string(),
            order_id: "o-3".to_string(),
            side: Side::Buy,
            price: Price::new(dec!(100)).unwrap(),
            quantity: Quantity::new(dec!(1)).unwrap(),
            fee: dec!(0.1),
            fee_currency: "USDT".to_string(),
            timestamp: Timestamp::new(1).unwrap(),
        };
        assert_eq!(trade.fee, dec!(0.1));
        assert_eq!(trade.fee_currency, "USDT");
    }
}
