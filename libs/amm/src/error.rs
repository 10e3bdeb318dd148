//! Error types for constant-product math

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AmmError>;

/// Failures of a quote or analytics calculation
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AmmError {
    /// Input or output amount is zero
    #[error("amount must be positive")]
    ZeroAmount,

    /// One of the reserves is zero
    #[error("pool has no liquidity")]
    EmptyPool,

    /// Requested output cannot be served by the reserve
    #[error("insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity { requested: u128, available: u128 },

    /// Intermediate value exceeds the integer width
    #[error("arithmetic overflow")]
    Overflow,

    /// Tolerance above 100%
    #[error("slippage tolerance {0} bps exceeds 10000")]
    InvalidTolerance(u32),
}
