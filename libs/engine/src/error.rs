//! Engine error taxonomy
//!
//! Every public operation is all-or-nothing: when one of these is returned no
//! pool, liquidity, ledger or asset change from that operation survives.

use amm::MathError;
use thiserror::Error;
use types::{AccountId, TokenId, U256};

/// Failures reported by the asset-ledger collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("Insufficient balance of {token} for {account}: need {needed}, have {available}")]
    InsufficientBalance {
        token: TokenId,
        account: AccountId,
        needed: U256,
        available: U256,
    },

    #[error("Insufficient allowance of {token} from {owner} to {spender}: need {needed}, have {available}")]
    InsufficientAllowance {
        token: TokenId,
        owner: AccountId,
        spender: AccountId,
        needed: U256,
        available: U256,
    },

    #[error("Balance overflow for {token}")]
    Overflow { token: TokenId },

    #[error("Transfer rejected: {0}")]
    Rejected(String),
}

/// Exchange operation failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Identical tokens")]
    IdenticalTokens,

    /// Zero or otherwise out-of-range quantity, including arithmetic overflow
    #[error("Invalid amount")]
    InvalidAmount,

    /// Withdrawal exceeds the tracked total, or pricing against an empty reserve
    #[error("Insufficient liquidity")]
    InsufficientLiquidity,

    #[error("Empty pool")]
    EmptyPool,

    /// Swap output rounds down to zero
    #[error("Insufficient output amount")]
    InsufficientOutput,

    #[error("Pool not found")]
    PoolNotFound,

    #[error("Asset transfer failed: {0}")]
    AssetTransferFailed(#[from] AssetError),
}

impl From<MathError> for ExchangeError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientLiquidity => ExchangeError::InsufficientLiquidity,
            MathError::InvalidInput | MathError::Overflow | MathError::DivisionByZero => {
                ExchangeError::InvalidAmount
            }
        }
    }
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;
