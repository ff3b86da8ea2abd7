//! Fungible Asset Ledger Collaborator
//!
//! The engine never tracks token balances itself. It pulls deposits with
//! `transfer_from` (as an approved spender) and pays out with `transfer` from
//! its own account. Because a later step of an operation can still fail after
//! a transfer went through, the ledger exposes checkpoints so the engine can
//! undo every transfer staged by that operation.
//!
//! [`InMemoryAssetLedger`] is the bundled implementation: balances,
//! allowances and a write journal, all in process memory.

use crate::error::AssetError;
use std::collections::HashMap;
use tracing::{debug, trace};
use types::{AccountId, TokenId, U256};

/// External fungible-asset ledger consumed by the engine
pub trait AssetLedger {
    /// Marker returned by [`checkpoint`](Self::checkpoint)
    type Checkpoint;

    /// Move `amount` of `token` from `from` to `to`, spending the allowance
    /// `from` granted to `spender`
    fn transfer_from(
        &mut self,
        token: TokenId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> Result<(), AssetError>;

    /// Move `amount` of `token` out of `from`'s own balance
    fn transfer(
        &mut self,
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> Result<(), AssetError>;

    fn balance_of(&self, token: TokenId, account: AccountId) -> U256;

    /// Start recording writes so they can be undone
    fn checkpoint(&mut self) -> Self::Checkpoint;

    /// Keep every write made since `checkpoint`
    fn commit(&mut self, checkpoint: Self::Checkpoint);

    /// Undo every write made since `checkpoint`
    fn rollback(&mut self, checkpoint: Self::Checkpoint);
}

type BalanceKey = (TokenId, AccountId);
type AllowanceKey = (TokenId, AccountId, AccountId);

#[derive(Debug, Clone)]
enum JournalEntry {
    Balance {
        key: BalanceKey,
        previous: Option<U256>,
    },
    Allowance {
        key: AllowanceKey,
        previous: Option<U256>,
    },
}

/// Position in the write journal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerCheckpoint(usize);

/// In-memory balances and allowances with journaled writes
///
/// An allowance of `U256::MAX` is treated as unlimited and never decremented.
#[derive(Debug, Default)]
pub struct InMemoryAssetLedger {
    balances: HashMap<BalanceKey, U256>,
    allowances: HashMap<AllowanceKey, U256>,
    journal: Vec<JournalEntry>,
    open_checkpoints: usize,
}

impl InMemoryAssetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit newly issued tokens to `account`
    pub fn mint(&mut self, token: TokenId, account: AccountId, amount: U256) -> Result<(), AssetError> {
        let balance = self.balance_of(token, account);
        let updated = balance
            .checked_add(amount)
            .ok_or(AssetError::Overflow { token })?;
        self.set_balance((token, account), updated);
        debug!(%token, %account, %amount, "minted");
        Ok(())
    }

    /// Allow `spender` to move up to `amount` of `owner`'s `token`
    pub fn approve(&mut self, token: TokenId, owner: AccountId, spender: AccountId, amount: U256) {
        self.set_allowance((token, owner, spender), amount);
        trace!(%token, %owner, %spender, %amount, "approved");
    }

    pub fn allowance(&self, token: TokenId, owner: AccountId, spender: AccountId) -> U256 {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Sum of all balances held in `token`
    pub fn total_supply(&self, token: TokenId) -> U256 {
        self.balances
            .iter()
            .filter(|((t, _), _)| *t == token)
            .fold(U256::zero(), |acc, (_, amount)| acc.saturating_add(*amount))
    }

    fn set_balance(&mut self, key: BalanceKey, value: U256) {
        let previous = self.balances.insert(key, value);
        if self.open_checkpoints > 0 {
            self.journal.push(JournalEntry::Balance { key, previous });
        }
    }

    fn set_allowance(&mut self, key: AllowanceKey, value: U256) {
        let previous = self.allowances.insert(key, value);
        if self.open_checkpoints > 0 {
            self.journal.push(JournalEntry::Allowance { key, previous });
        }
    }

    fn move_balance(
        &mut self,
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> Result<(), AssetError> {
        let available = self.balance_of(token, from);
        if available < amount {
            return Err(AssetError::InsufficientBalance {
                token,
                account: from,
                needed: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }

        let credited = self
            .balance_of(token, to)
            .checked_add(amount)
            .ok_or(AssetError::Overflow { token })?;
        self.set_balance((token, from), available - amount);
        self.set_balance((token, to), credited);
        Ok(())
    }
}

impl AssetLedger for InMemoryAssetLedger {
    type Checkpoint = LedgerCheckpoint;

    fn transfer_from(
        &mut self,
        token: TokenId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> Result<(), AssetError> {
        let allowed = self.allowance(token, from, spender);
        if allowed < amount {
            return Err(AssetError::InsufficientAllowance {
                token,
                owner: from,
                spender,
                needed: amount,
                available: allowed,
            });
        }

        self.move_balance(token, from, to, amount)?;
        if allowed != U256::MAX {
            self.set_allowance((token, from, spender), allowed - amount);
        }
        trace!(%token, %from, %to, %amount, "transfer_from");
        Ok(())
    }

    fn transfer(
        &mut self,
        token: TokenId,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> Result<(), AssetError> {
        self.move_balance(token, from, to, amount)?;
        trace!(%token, %from, %to, %amount, "transfer");
        Ok(())
    }

    fn balance_of(&self, token: TokenId, account: AccountId) -> U256 {
        self.balances
            .get(&(token, account))
            .copied()
            .unwrap_or_default()
    }

    fn checkpoint(&mut self) -> LedgerCheckpoint {
        self.open_checkpoints += 1;
        LedgerCheckpoint(self.journal.len())
    }

    fn commit(&mut self, _checkpoint: LedgerCheckpoint) {
        self.open_checkpoints = self.open_checkpoints.saturating_sub(1);
        if self.open_checkpoints == 0 {
            self.journal.clear();
        }
    }

    fn rollback(&mut self, checkpoint: LedgerCheckpoint) {
        let undone = self.journal.len().saturating_sub(checkpoint.0);
        while self.journal.len() > checkpoint.0 {
            match self.journal.pop() {
                Some(JournalEntry::Balance { key, previous }) => match previous {
                    Some(value) => {
                        self.balances.insert(key, value);
                    }
                    None => {
                        self.balances.remove(&key);
                    }
                },
                Some(JournalEntry::Allowance { key, previous }) => match previous {
                    Some(value) => {
                        self.allowances.insert(key, value);
                    }
                    None => {
                        self.allowances.remove(&key);
                    }
                },
                None => break,
            }
        }
        self.open_checkpoints = self.open_checkpoints.saturating_sub(1);
        if self.open_checkpoints == 0 {
            self.journal.clear();
        }
        debug!(undone, "asset ledger rolled back");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> TokenId {
        TokenId::from_low_u64_be(1)
    }

    fn alice() -> AccountId {
        AccountId::from_low_u64_be(100)
    }

    fn bob() -> AccountId {
        AccountId::from_low_u64_be(200)
    }

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    #[test]
    fn test_transfer_moves_balance() {
        let mut ledger = InMemoryAssetLedger::new();
        ledger.mint(token(), alice(), u(100)).unwrap();

        ledger.transfer(token(), alice(), bob(), u(40)).unwrap();

        assert_eq!(ledger.balance_of(token(), alice()), u(60));
        assert_eq!(ledger.balance_of(token(), bob()), u(40));
        assert_eq!(ledger.total_supply(token()), u(100));
    }

    #[test]
    fn test_transfer_rejects_overdraft() {
        let mut ledger = InMemoryAssetLedger::new();
        ledger.mint(token(), alice(), u(10)).unwrap();

        let err = ledger.transfer(token(), alice(), bob(), u(11)).unwrap_err();
        assert!(matches!(err, AssetError::InsufficientBalance { .. }));
        assert_eq!(ledger.balance_of(token(), alice()), u(10));
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let mut ledger = InMemoryAssetLedger::new();
        ledger.mint(token(), alice(), u(100)).unwrap();
        ledger.approve(token(), alice(), bob(), u(50));

        ledger
            .transfer_from(token(), bob(), alice(), bob(), u(30))
            .unwrap();
        assert_eq!(ledger.allowance(token(), alice(), bob()), u(20));

        let err = ledger
            .transfer_from(token(), bob(), alice(), bob(), u(30))
            .unwrap_err();
        assert!(matches!(err, AssetError::InsufficientAllowance { .. }));
    }

    #[test]
    fn test_unlimited_allowance_is_not_spent() {
        let mut ledger = InMemoryAssetLedger::new();
        ledger.mint(token(), alice(), u(100)).unwrap();
        ledger.approve(token(), alice(), bob(), U256::MAX);

        ledger
            .transfer_from(token(), bob(), alice(), bob(), u(30))
            .unwrap();
        assert_eq!(ledger.allowance(token(), alice(), bob()), U256::MAX);
    }

    #[test]
    fn test_rollback_restores_balances_and_allowances() {
        let mut ledger = InMemoryAssetLedger::new();
        ledger.mint(token(), alice(), u(100)).unwrap();
        ledger.approve(token(), alice(), bob(), u(50));

        let checkpoint = ledger.checkpoint();
        ledger
            .transfer_from(token(), bob(), alice(), bob(), u(50))
            .unwrap();
        ledger.transfer(token(), bob(), alice(), u(5)).unwrap();
        ledger.rollback(checkpoint);

        assert_eq!(ledger.balance_of(token(), alice()), u(100));
        assert_eq!(ledger.balance_of(token(), bob()), u(0));
        assert_eq!(ledger.allowance(token(), alice(), bob()), u(50));
    }

    #[test]
    fn test_commit_keeps_writes() {
        let mut ledger = InMemoryAssetLedger::new();
        ledger.mint(token(), alice(), u(100)).unwrap();

        let checkpoint = ledger.checkpoint();
        ledger.transfer(token(), alice(), bob(), u(25)).unwrap();
        ledger.commit(checkpoint);

        assert_eq!(ledger.balance_of(token(), bob()), u(25));
        assert!(ledger.journal.is_empty());
    }
}
