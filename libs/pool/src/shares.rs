//! LP share accounting
//!
//! Plain fungible bookkeeping, independent of the pooled assets. Holders
//! whose balance drops to zero are removed so the map only lists live
//! positions.

use crate::error::{PoolError, Result};
use crate::types::AccountId;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareLedger {
    total: u128,
    balances: HashMap<AccountId, u128>,
}

impl ShareLedger {
    pub fn mint(&mut self, holder: &AccountId, amount: u128) -> Result<()> {
        let total = self.total.checked_add(amount).ok_or(PoolError::Overflow)?;
        if amount == 0 {
            return Ok(());
        }
        // bounded by the total, cannot overflow
        *self.balances.entry(holder.clone()).or_insert(0) += amount;
        self.total = total;
        Ok(())
    }

    pub fn burn(&mut self, holder: &AccountId, amount: u128) -> Result<()> {
        self.debit(holder, amount)?;
        self.total -= amount;
        Ok(())
    }

    /// Move shares between holders; the total is unchanged
    pub fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: u128) -> Result<()> {
        self.debit(from, amount)?;
        if amount > 0 {
            *self.balances.entry(to.clone()).or_insert(0) += amount;
        }
        Ok(())
    }

    pub fn balance_of(&self, holder: &AccountId) -> u128 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total
    }

    pub fn holders(&self) -> impl Iterator<Item = (&AccountId, u128)> {
        self.balances.iter().map(|(holder, balance)| (holder, *balance))
    }

    fn debit(&mut self, holder: &AccountId, amount: u128) -> Result<()> {
        let available = self.balance_of(holder);
        if available < amount {
            return Err(PoolError::InsufficientShares {
                holder: holder.clone(),
                requested: amount,
                available,
            });
        }
        let remaining = available - amount;
        if remaining == 0 {
            self.balances.remove(holder);
        } else {
            self.balances.insert(holder.clone(), remaining);
        }
        Ok(())
    }
}
