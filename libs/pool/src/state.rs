//! Ledger state of the pool aggregate

use crate::reserves::ReserveLedger;
use crate::shares::ShareLedger;
use crate::types::TokenId;
use serde::{Deserialize, Serialize};

/// Reserves and shares, staged and committed together
#[derive(Debug, Clone, Default)]
pub struct PoolState {
    pub reserves: ReserveLedger,
    pub shares: ShareLedger,
}

impl PoolState {
    /// Describe the first broken invariant, if any
    pub fn invariant_violation(&self) -> Option<String> {
        let (reserve0, reserve1) = self.reserves.read();
        let total = self.shares.total_supply();

        let held: u128 = self.shares.holders().map(|(_, balance)| balance).sum();
        if held != total {
            return Some(format!("share balances sum to {held}, total supply is {total}"));
        }
        if (reserve0 == 0) != (reserve1 == 0) || (reserve0 == 0) != (total == 0) {
            return Some(format!(
                "pool half funded: reserves ({reserve0}, {reserve1}), total supply {total}"
            ));
        }
        None
    }
}

/// Read-only view handed out to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub token0: TokenId,
    pub token1: TokenId,
    pub reserve0: u128,
    pub reserve1: u128,
    pub total_supply: u128,
}
