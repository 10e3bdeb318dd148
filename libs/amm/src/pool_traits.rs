//! Pool trait definitions for a unified quoting interface

use crate::{ConstantProduct, ReservePair, Result};

/// Unified quoting interface over one swap direction of a pool
pub trait AmmPool {
    /// Calculate output amount for given input
    fn get_amount_out(&self, amount_in: u128) -> Result<u128>;

    /// Calculate required input for desired output
    fn get_amount_in(&self, amount_out: u128) -> Result<u128>;

    /// Get current (input, output) reserves
    fn get_liquidity(&self) -> (u128, u128);
}

impl AmmPool for ReservePair {
    fn get_amount_out(&self, amount_in: u128) -> Result<u128> {
        ConstantProduct::quote(amount_in, self.reserve_in, self.reserve_out)
    }

    fn get_amount_in(&self, amount_out: u128) -> Result<u128> {
        ConstantProduct::quote_input(amount_out, self.reserve_in, self.reserve_out)
    }

    fn get_liquidity(&self) -> (u128, u128) {
        (self.reserve_in, self.reserve_out)
    }
}
