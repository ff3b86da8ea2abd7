//! Trade Ledger
//!
//! Append-only history of executed swaps. Records live in one arena in global
//! execution order; each trader keeps an index of positions into it, so
//! per-trader reads never scan other traders' trades.

use std::collections::HashMap;
use types::{AccountId, TradeFilter, TradeRecord};

#[derive(Debug, Default)]
pub struct TradeLedger {
    records: Vec<TradeRecord>,
    by_trader: HashMap<AccountId, Vec<usize>>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` to its trader's history
    pub fn append(&mut self, record: TradeRecord) {
        let position = self.records.len();
        self.by_trader
            .entry(record.trader)
            .or_default()
            .push(position);
        self.records.push(record);
    }

    /// Number of trades executed by `trader`
    pub fn count(&self, trader: AccountId) -> usize {
        self.by_trader.get(&trader).map_or(0, Vec::len)
    }

    /// The `index`-th trade of `trader`, oldest first
    pub fn get(&self, trader: AccountId, index: usize) -> Option<&TradeRecord> {
        let position = *self.by_trader.get(&trader)?.get(index)?;
        self.records.get(position)
    }

    /// Trades across all traders
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Filtered, paginated snapshot of history in insertion order
    ///
    /// A zero `filter.trader` scans every trader, otherwise only that trader's
    /// history. `offset` matches are skipped, then up to
    /// `min(limit, history_len)` matches are collected (`limit == 0` takes all).
    pub fn query(&self, filter: &TradeFilter) -> Vec<TradeRecord> {
        let history: Box<dyn Iterator<Item = &TradeRecord> + '_> = if filter.trader.is_zero() {
            Box::new(self.records.iter())
        } else {
            match self.by_trader.get(&filter.trader) {
                Some(positions) => Box::new(positions.iter().map(|&p| &self.records[p])),
                None => return Vec::new(),
            }
        };

        let history_len = if filter.trader.is_zero() {
            self.records.len()
        } else {
            self.count(filter.trader)
        };
        let cap = if filter.limit == 0 {
            history_len
        } else {
            filter.limit.min(history_len)
        };

        history
            .filter(|record| filter.matches(record))
            .skip(filter.offset)
            .take(cap)
            .cloned()
            .collect()
    }
}
