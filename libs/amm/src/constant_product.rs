//! Constant-product (x·y=k) quote math on raw integer reserves
//!
//! No fee is charged: the input joins the reserve at full value and the
//! output leaves at full value. The output division rounds **up**, toward
//! the trader, so the post-trade product may shrink by the rounding unit.

use crate::{AmmError, Result};
use serde::{Deserialize, Serialize};

/// Directional reserves of a two-asset pool for one swap direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservePair {
    pub reserve_in: u128,
    pub reserve_out: u128,
}

impl ReservePair {
    pub fn new(reserve_in: u128, reserve_out: u128) -> Self {
        Self {
            reserve_in,
            reserve_out,
        }
    }

    /// Same pool seen from the opposite direction
    pub fn flipped(self) -> Self {
        Self::new(self.reserve_out, self.reserve_in)
    }
}

/// Constant-product math functions over `u128` amounts
pub struct ConstantProduct;

impl ConstantProduct {
    /// Output amount for `amount_in` against the given reserves
    ///
    /// `amount_out = ceil(amount_in * reserve_out / (reserve_in + amount_in))`
    ///
    /// # Errors
    /// * `ZeroAmount` if `amount_in == 0`
    /// * `EmptyPool` if either reserve is zero
    /// * `Overflow` if an intermediate value exceeds `u128`
    pub fn quote(amount_in: u128, reserve_in: u128, reserve_out: u128) -> Result<u128> {
        if reserve_in == 0 || reserve_out == 0 {
            return Err(AmmError::EmptyPool);
        }
        if amount_in == 0 {
            return Err(AmmError::ZeroAmount);
        }

        let numerator = amount_in
            .checked_mul(reserve_out)
            .ok_or(AmmError::Overflow)?;
        let denominator = reserve_in
            .checked_add(amount_in)
            .ok_or(AmmError::Overflow)?;

        Ok(div_ceil(numerator, denominator))
    }

    /// Smallest input whose [`quote`](Self::quote) is at least `amount_out`
    ///
    /// Inverts the rounded-up quote exactly:
    /// `floor((amount_out - 1) * reserve_in / (reserve_out - amount_out + 1)) + 1`
    ///
    /// # Errors
    /// * `ZeroAmount` if `amount_out == 0`
    /// * `EmptyPool` if either reserve is zero
    /// * `InsufficientLiquidity` if `amount_out >= reserve_out`
    pub fn quote_input(amount_out: u128, reserve_in: u128, reserve_out: u128) -> Result<u128> {
        if reserve_in == 0 || reserve_out == 0 {
            return Err(AmmError::EmptyPool);
        }
        if amount_out == 0 {
            return Err(AmmError::ZeroAmount);
        }
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity {
                requested: amount_out,
                available: reserve_out,
            });
        }

        let numerator = (amount_out - 1)
            .checked_mul(reserve_in)
            .ok_or(AmmError::Overflow)?;
        let denominator = reserve_out - amount_out + 1;

        (numerator / denominator)
            .checked_add(1)
            .ok_or(AmmError::Overflow)
    }

    /// Reserves after applying a trade of `amount_in` yielding `amount_out`
    ///
    /// # Errors
    /// * `InsufficientLiquidity` if `amount_out > reserve_out`
    /// * `Overflow` if the input reserve would exceed `u128`
    pub fn apply(pair: ReservePair, amount_in: u128, amount_out: u128) -> Result<ReservePair> {
        let reserve_in = pair
            .reserve_in
            .checked_add(amount_in)
            .ok_or(AmmError::Overflow)?;
        let reserve_out = pair
            .reserve_out
            .checked_sub(amount_out)
            .ok_or(AmmError::InsufficientLiquidity {
                requested: amount_out,
                available: pair.reserve_out,
            })?;
        Ok(ReservePair::new(reserve_in, reserve_out))
    }
}

fn div_ceil(numerator: u128, denominator: u128) -> u128 {
    let quotient = numerator / denominator;
    if numerator % denominator == 0 {
        quotient
    } else {
        quotient + 1
    }
}
