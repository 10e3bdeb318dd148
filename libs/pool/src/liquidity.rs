//! Liquidity accounting for deposits and withdrawals
//!
//! Works on a staged copy of the pool state. The pool moves tokens and
//! commits the staged copy only when every transfer has gone through.

use crate::error::{PoolError, Result};
use crate::settings::{DepositPolicy, PoolSettings};
use crate::state::PoolState;
use crate::types::{AccountId, Asset};

pub struct LiquidityManager<'a> {
    settings: &'a PoolSettings,
}

impl<'a> LiquidityManager<'a> {
    pub fn new(settings: &'a PoolSettings) -> Self {
        Self { settings }
    }

    /// Mint shares for a deposit and credit both reserves
    ///
    /// Returns the number of shares minted to `holder`.
    pub fn add(
        &self,
        state: &mut PoolState,
        holder: &AccountId,
        amount0: u128,
        amount1: u128,
    ) -> Result<u128> {
        if amount0 == 0 || amount1 == 0 {
            return Err(PoolError::ZeroAmount);
        }

        let minted = self.shares_for_deposit(state, amount0, amount1)?;
        if minted == 0 {
            return Err(PoolError::ZeroAmount);
        }

        state.shares.mint(holder, minted)?;
        state.reserves.credit(Asset::Token0, amount0)?;
        state.reserves.credit(Asset::Token1, amount1)?;
        Ok(minted)
    }

    /// Burn shares and debit the pro-rata slice of both reserves
    ///
    /// Returns `(amount0, amount1)` owed to `holder`.
    pub fn remove(
        &self,
        state: &mut PoolState,
        holder: &AccountId,
        share_amount: u128,
    ) -> Result<(u128, u128)> {
        if share_amount == 0 {
            return Err(PoolError::ZeroAmount);
        }
        let available = state.shares.balance_of(holder);
        if available < share_amount {
            return Err(PoolError::InsufficientShares {
                holder: holder.clone(),
                requested: share_amount,
                available,
            });
        }

        // pre-burn total
        let total = state.shares.total_supply();
        let (reserve0, reserve1) = state.reserves.read();
        let amount0 = mul_div(reserve0, share_amount, total)?;
        let amount1 = mul_div(reserve1, share_amount, total)?;
        if amount0 == 0 || amount1 == 0 {
            return Err(PoolError::ZeroAmount);
        }

        state.reserves.debit(Asset::Token0, amount0)?;
        state.reserves.debit(Asset::Token1, amount1)?;
        state.shares.burn(holder, share_amount)?;
        Ok((amount0, amount1))
    }

    fn shares_for_deposit(&self, state: &PoolState, amount0: u128, amount1: u128) -> Result<u128> {
        let total = state.shares.total_supply();
        if total == 0 {
            return Ok(u128::from(self.settings.initial_shares));
        }

        let (reserve0, reserve1) = state.reserves.read();
        if self.settings.deposit_policy == DepositPolicy::ExactRatio {
            let lhs = amount0.checked_mul(reserve1).ok_or(PoolError::Overflow)?;
            let rhs = amount1.checked_mul(reserve0).ok_or(PoolError::Overflow)?;
            if lhs != rhs {
                return Err(PoolError::UnbalancedDeposit {
                    amount0,
                    amount1,
                    reserve0,
                    reserve1,
                });
            }
        }

        let by_token0 = mul_div(amount0, total, reserve0)?;
        let by_token1 = mul_div(amount1, total, reserve1)?;
        Ok(by_token0.min(by_token1))
    }
}

/// `a * b / c`, truncating
fn mul_div(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(PoolError::EmptyPool);
    }
    Ok(a.checked_mul(b).ok_or(PoolError::Overflow)? / c)
}
