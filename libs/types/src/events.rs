//! Observable engine events
//!
//! Field sets mirror the state transition that produced them. Liquidity events
//! echo the caller's argument order, not the canonical pool order.

use crate::{AccountId, TokenId};
use ethereum_types::U256;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExchangeEvent {
    LiquidityAdded {
        provider: AccountId,
        token_a: TokenId,
        token_b: TokenId,
        amount_a: U256,
        amount_b: U256,
        timestamp: u64,
    },
    LiquidityRemoved {
        provider: AccountId,
        token_a: TokenId,
        token_b: TokenId,
        amount_a: U256,
        amount_b: U256,
        timestamp: u64,
    },
    TradeExecuted {
        trader: AccountId,
        token_in: TokenId,
        token_out: TokenId,
        amount_in: U256,
        amount_out: U256,
        timestamp: u64,
    },
}

impl ExchangeEvent {
    /// Event name as published to monitors
    pub fn name(&self) -> &'static str {
        match self {
            ExchangeEvent::LiquidityAdded { .. } => "LiquidityAdded",
            ExchangeEvent::LiquidityRemoved { .. } => "LiquidityRemoved",
            ExchangeEvent::TradeExecuted { .. } => "TradeExecuted",
        }
    }

    pub fn timestamp(&self) -> u64 {
        match self {
            ExchangeEvent::LiquidityAdded { timestamp, .. }
            | ExchangeEvent::LiquidityRemoved { timestamp, .. }
            | ExchangeEvent::TradeExecuted { timestamp, .. } => *timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = ExchangeEvent::TradeExecuted {
            trader: AccountId::from_low_u64_be(1),
            token_in: TokenId::from_low_u64_be(2),
            token_out: TokenId::from_low_u64_be(3),
            amount_in: U256::from(23u64),
            amount_out: U256::from(45u64),
            timestamp: 1_700_000_000,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TradeExecuted");
        assert_eq!(json["timestamp"], 1_700_000_000u64);
        assert_eq!(event.name(), "TradeExecuted");
        assert_eq!(event.timestamp(), 1_700_000_000);
    }
}
