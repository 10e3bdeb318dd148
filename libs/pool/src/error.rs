//! Pool error kinds
//!
//! Every error is terminal for the operation that raised it. The pool state
//! and all token balances are left exactly as they were before the call,
//! except after `PartialSettlement`, where the pool has committed the token
//! movements it could not undo so its reserves still match custody.

use crate::token::TokenError;
use crate::types::{AccountId, TokenId};
use amm::AmmError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PoolError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// An input amount, or the amount it would produce, is zero
    #[error("amount must be positive")]
    ZeroAmount,

    /// Quoting against a pool with no liquidity
    #[error("pool has no liquidity")]
    EmptyPool,

    #[error("insufficient reserve: requested {requested}, available {available}")]
    InsufficientReserve { requested: u128, available: u128 },

    #[error("insufficient shares for {holder}: requested {requested}, available {available}")]
    InsufficientShares {
        holder: AccountId,
        requested: u128,
        available: u128,
    },

    #[error("invalid token pair for this pool: {token_in} -> {token_out:?}")]
    InvalidTokenPair {
        token_in: TokenId,
        token_out: Option<TokenId>,
    },

    /// Computed output fell below the caller's minimum; nothing was filled
    #[error("slippage exceeded: minimum {expected_min}, actual {actual}")]
    SlippageExceeded { expected_min: u128, actual: u128 },

    #[error("transfer of {token} failed: {source}")]
    TransferFailed { token: TokenId, source: TokenError },

    /// A transfer failed after earlier ones went through and could not be
    /// reversed; reserves and shares reflect the transfers that stuck
    #[error("transfer of {token} failed after earlier transfers settled: {source}")]
    PartialSettlement { token: TokenId, source: TokenError },

    /// The pool's own address as depositor, withdrawer, trader or recipient
    #[error("pool account {0} cannot be a counterparty")]
    InvalidCounterparty(AccountId),

    /// Deposit off the reserve ratio under the exact-ratio policy
    #[error("deposit {amount0}/{amount1} does not match reserve ratio {reserve0}/{reserve1}")]
    UnbalancedDeposit {
        amount0: u128,
        amount1: u128,
        reserve0: u128,
        reserve1: u128,
    },

    /// Nested call while another operation is in flight on this thread
    #[error("reentrant call to {operation} rejected")]
    Reentrancy { operation: &'static str },

    #[error("arithmetic overflow")]
    Overflow,

    #[error("pricing error: {0}")]
    Pricing(AmmError),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl From<AmmError> for PoolError {
    fn from(err: AmmError) -> Self {
        match err {
            AmmError::ZeroAmount => Self::ZeroAmount,
            AmmError::EmptyPool => Self::EmptyPool,
            AmmError::InsufficientLiquidity {
                requested,
                available,
            } => Self::InsufficientReserve {
                requested,
                available,
            },
            AmmError::Overflow => Self::Overflow,
            other => Self::Pricing(other),
        }
    }
}
