//! Trade records and history filters

use crate::{AccountId, TokenId};
use ethereum_types::U256;
use serde::{Deserialize, Serialize};

/// One completed swap. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub trader: AccountId,
    pub token_in: TokenId,
    pub token_out: TokenId,
    pub amount_in: U256,
    pub amount_out: U256,
    /// Unix seconds at execution
    pub timestamp: u64,
}

/// Trade history query
///
/// Zero identifiers match any value, `to_ts == 0` leaves the upper bound
/// open and `limit == 0` returns every remaining match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeFilter {
    pub trader: AccountId,
    pub token_in: TokenId,
    pub token_out: TokenId,
    /// Inclusive lower bound on `timestamp`
    pub from_ts: u64,
    /// Inclusive upper bound on `timestamp`, 0 for none
    pub to_ts: u64,
    pub limit: usize,
    /// Matches skipped before collection starts
    pub offset: usize,
}

impl TradeFilter {
    /// Filter matching every trade of `trader`
    pub fn for_trader(trader: AccountId) -> Self {
        Self {
            trader,
            ..Self::default()
        }
    }

    pub fn token_in(mut self, token: TokenId) -> Self {
        self.token_in = token;
        self
    }

    pub fn token_out(mut self, token: TokenId) -> Self {
        self.token_out = token;
        self
    }

    pub fn between(mut self, from_ts: u64, to_ts: u64) -> Self {
        self.from_ts = from_ts;
        self.to_ts = to_ts;
        self
    }

    pub fn page(mut self, limit: usize, offset: usize) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    /// Whether `record` passes the trader, token and time predicates
    pub fn matches(&self, record: &TradeRecord) -> bool {
        (self.trader.is_zero() || record.trader == self.trader)
            && (self.token_in.is_zero() || record.token_in == self.token_in)
            && (self.token_out.is_zero() || record.token_out == self.token_out)
            && record.timestamp >= self.from_ts
            && (self.to_ts == 0 || record.timestamp <= self.to_ts)
    }
}
