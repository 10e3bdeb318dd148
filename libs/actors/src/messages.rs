//! Requests understood by the pool actor
//!
//! Each request carries a oneshot reply channel. A reply sender dropped
//! without an answer means the actor stopped first.

use pool::{AccountId, PoolError, PoolSnapshot, SwapQuote, SwapRequest, TokenId};
use tokio::sync::oneshot;

pub type Reply<T> = oneshot::Sender<Result<T, PoolError>>;

pub enum PoolRequest {
    Add {
        caller: AccountId,
        amount0: u128,
        amount1: u128,
        reply: Reply<u128>,
    },
    Remove {
        caller: AccountId,
        share_amount: u128,
        reply: Reply<(u128, u128)>,
    },
    Swap {
        caller: AccountId,
        request: SwapRequest,
        reply: Reply<u128>,
    },
    Quote {
        amount_in: u128,
        input_token: TokenId,
        reply: Reply<SwapQuote>,
    },
    Snapshot {
        reply: oneshot::Sender<PoolSnapshot>,
    },
    BalanceOf {
        holder: AccountId,
        reply: oneshot::Sender<u128>,
    },
    /// Stop after acknowledging; requests queued behind it are dropped
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

impl PoolRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            PoolRequest::Add { .. } => "add",
            PoolRequest::Remove { .. } => "remove",
            PoolRequest::Swap { .. } => "swap",
            PoolRequest::Quote { .. } => "quote",
            PoolRequest::Snapshot { .. } => "snapshot",
            PoolRequest::BalanceOf { .. } => "balance_of",
            PoolRequest::Shutdown { .. } => "shutdown",
        }
    }
}
