//! Reserve ledger: the pool's held balance of each asset

use crate::error::{PoolError, Result};
use crate::types::{Asset, Direction};
use amm::ReservePair;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveLedger {
    reserves: [u128; 2],
}

impl ReserveLedger {
    pub fn new(reserve0: u128, reserve1: u128) -> Self {
        Self {
            reserves: [reserve0, reserve1],
        }
    }

    pub fn credit(&mut self, asset: Asset, amount: u128) -> Result<()> {
        let slot = &mut self.reserves[asset.index()];
        *slot = slot.checked_add(amount).ok_or(PoolError::Overflow)?;
        Ok(())
    }

    pub fn debit(&mut self, asset: Asset, amount: u128) -> Result<()> {
        let slot = &mut self.reserves[asset.index()];
        if amount > *slot {
            return Err(PoolError::InsufficientReserve {
                requested: amount,
                available: *slot,
            });
        }
        *slot -= amount;
        Ok(())
    }

    /// Current `(reserve0, reserve1)`
    pub fn read(&self) -> (u128, u128) {
        (self.reserves[0], self.reserves[1])
    }

    pub fn get(&self, asset: Asset) -> u128 {
        self.reserves[asset.index()]
    }

    /// `(reserve_in, reserve_out)` for a swap direction
    pub fn oriented(&self, direction: Direction) -> ReservePair {
        ReservePair::new(self.get(direction.input()), self.get(direction.output()))
    }

    pub fn is_empty(&self) -> bool {
        self.reserves == [0, 0]
    }
}
