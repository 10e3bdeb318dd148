//! Slippage-guarded swap accounting

use crate::error::{PoolError, Result};
use crate::reserves::ReserveLedger;
use crate::types::{AccountId, Direction, TokenId};
use amm::{AmmPool, ConstantProduct};
use serde::{Deserialize, Serialize};

/// Parameters of a swap submitted by a trader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub amount_in: u128,
    /// Minimum acceptable output; the swap fails rather than fill below it
    pub amount_out_min: u128,
    pub token_in: TokenId,
    pub token_out: TokenId,
    /// Recipient of the output
    pub to: AccountId,
}

/// Output of a trade and the reserves the pool would hold after it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub amount_out: u128,
    pub reserve0: u128,
    pub reserve1: u128,
}

pub struct SwapExecutor;

impl SwapExecutor {
    /// Resolve the swap direction for a token pair of this pool
    pub fn direction(
        token0: &TokenId,
        token1: &TokenId,
        token_in: &TokenId,
        token_out: &TokenId,
    ) -> Result<Direction> {
        if token_in == token0 && token_out == token1 {
            Ok(Direction::ZeroForOne)
        } else if token_in == token1 && token_out == token0 {
            Ok(Direction::OneForZero)
        } else {
            Err(PoolError::InvalidTokenPair {
                token_in: token_in.clone(),
                token_out: Some(token_out.clone()),
            })
        }
    }

    /// Quote a trade against `reserves` without touching them
    ///
    /// A trade that would empty the output reserve is refused with
    /// `InsufficientReserve`: the pool must stay funded on both sides.
    pub fn quote(reserves: &ReserveLedger, direction: Direction, amount_in: u128) -> Result<SwapQuote> {
        let pair = reserves.oriented(direction);
        let amount_out = pair.get_amount_out(amount_in)?;
        if amount_out >= pair.reserve_out {
            return Err(PoolError::InsufficientReserve {
                requested: amount_out,
                available: pair.reserve_out - 1,
            });
        }

        let after = ConstantProduct::apply(pair, amount_in, amount_out)?;
        let (reserve0, reserve1) = match direction {
            Direction::ZeroForOne => (after.reserve_in, after.reserve_out),
            Direction::OneForZero => (after.reserve_out, after.reserve_in),
        };
        Ok(SwapQuote {
            amount_out,
            reserve0,
            reserve1,
        })
    }

    /// Apply a trade to `reserves`, failing if it fills below `amount_out_min`
    ///
    /// Returns the output amount. On error `reserves` is untouched.
    pub fn execute(
        reserves: &mut ReserveLedger,
        direction: Direction,
        amount_in: u128,
        amount_out_min: u128,
    ) -> Result<u128> {
        let quote = Self::quote(reserves, direction, amount_in)?;
        if quote.amount_out < amount_out_min {
            return Err(PoolError::SlippageExceeded {
                expected_min: amount_out_min,
                actual: quote.amount_out,
            });
        }

        *reserves = ReserveLedger::new(quote.reserve0, quote.reserve1);
        Ok(quote.amount_out)
    }
}
