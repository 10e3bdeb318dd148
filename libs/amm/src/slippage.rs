//! Pre-flight slippage and price-impact analytics
//!
//! Callers quote a trade off the current reserves, then derive the
//! `amount_out_min` they submit with the swap. Prices are reported as
//! `Decimal` so no floating-point rounding leaks into the comparison.

use crate::{AmmError, ConstantProduct, Result};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u32 = 10_000;

/// Tolerance settings for deriving a swap's minimum output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlippageTolerance {
    /// Accepted shortfall against the quote, in basis points
    pub tolerance_bps: u32,
}

impl Default for SlippageTolerance {
    fn default() -> Self {
        Self { tolerance_bps: 0 } // exact quote
    }
}

impl SlippageTolerance {
    pub fn new(tolerance_bps: u32) -> Result<Self> {
        if tolerance_bps > BPS_SCALE {
            return Err(AmmError::InvalidTolerance(tolerance_bps));
        }
        Ok(Self { tolerance_bps })
    }

    /// Minimum acceptable output for a quoted amount
    pub fn min_amount_out(&self, quoted: u128) -> Result<u128> {
        min_amount_out(quoted, self.tolerance_bps)
    }
}

/// `floor(quoted * (10000 - tolerance_bps) / 10000)`
pub fn min_amount_out(quoted: u128, tolerance_bps: u32) -> Result<u128> {
    if tolerance_bps > BPS_SCALE {
        return Err(AmmError::InvalidTolerance(tolerance_bps));
    }
    let kept = u128::from(BPS_SCALE - tolerance_bps);
    let scaled = quoted.checked_mul(kept).ok_or(AmmError::Overflow)?;
    Ok(scaled / u128::from(BPS_SCALE))
}

/// Marginal price of the input asset in units of the output asset
pub fn spot_price(reserve_in: u128, reserve_out: u128) -> Result<Decimal> {
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmError::EmptyPool);
    }
    Ok(to_decimal(reserve_out)? / to_decimal(reserve_in)?)
}

/// Price impact of a trade as a percentage of the pre-trade spot price
///
/// Uses the rounded-up quote, so tiny trades against shallow pools can
/// report a negative impact.
pub fn price_impact(amount_in: u128, reserve_in: u128, reserve_out: u128) -> Result<Decimal> {
    let amount_out = ConstantProduct::quote(amount_in, reserve_in, reserve_out)?;

    let price_before = spot_price(reserve_in, reserve_out)?;
    let new_reserve_in = reserve_in.checked_add(amount_in).ok_or(AmmError::Overflow)?;
    let new_reserve_out = reserve_out.saturating_sub(amount_out);
    if new_reserve_out == 0 {
        return Ok(dec!(100));
    }
    let price_after = spot_price(new_reserve_in, new_reserve_out)?;

    Ok((price_before - price_after) / price_before * dec!(100))
}

fn to_decimal(value: u128) -> Result<Decimal> {
    Decimal::from_u128(value).ok_or(AmmError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_amount_out_tolerance() {
        assert_eq!(min_amount_out(47_620, 0).unwrap(), 47_620);
        // 1% of 47620 = 476.2 -> floor(47143.8)
        assert_eq!(min_amount_out(47_620, 100).unwrap(), 47_143);
        assert_eq!(min_amount_out(47_620, BPS_SCALE).unwrap(), 0);
        assert_eq!(
            min_amount_out(1, BPS_SCALE + 1),
            Err(AmmError::InvalidTolerance(BPS_SCALE + 1))
        );
    }

    #[test]
    fn test_tolerance_struct() {
        assert!(SlippageTolerance::new(20_000).is_err());
        let tolerance = SlippageTolerance::new(50).unwrap();
        assert_eq!(tolerance.min_amount_out(10_000).unwrap(), 9_950);
        assert_eq!(SlippageTolerance::default().min_amount_out(77).unwrap(), 77);
    }

    #[test]
    fn test_spot_price() {
        assert_eq!(spot_price(20, 1_000_000).unwrap(), dec!(50000));
        assert_eq!(spot_price(0, 1), Err(AmmError::EmptyPool));
    }

    #[test]
    fn test_price_impact_grows_with_size() {
        let small = price_impact(1, 20_000, 1_000_000).unwrap();
        let large = price_impact(2_000, 20_000, 1_000_000).unwrap();

        assert!(large > small);
        assert!(large > dec!(0));
        assert!(large < dec!(100));
    }
}
