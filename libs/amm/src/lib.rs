//! # AMM Pricing Engine
//!
//! ## Purpose
//!
//! Pure constant-product mathematics for a two-asset liquidity pool. Every
//! function takes the reserves it prices against as explicit arguments; there
//! is no hidden state, so a quote computed here is exactly what a pool holding
//! those reserves would execute.
//!
//! ## Rounding Policy
//!
//! - **Quotes** round the output **up** (toward the trader)
//! - **Reverse quotes** return the smallest input that reaches the target
//! - **No fee** is applied on either side of the trade
//!
//! ## Integration Points
//!
//! - **Input Sources**: reserve snapshots from the pool's reserve ledger
//! - **Output Destinations**: swap execution, pre-flight quoting by callers
//! - **Precision**: raw `u128` integer units, `Decimal` only for analytics

pub mod constant_product;
pub mod error;
pub mod pool_traits;
pub mod slippage;

pub use constant_product::{ConstantProduct, ReservePair};
pub use error::{AmmError, Result};
pub use pool_traits::AmmPool;
pub use slippage::{min_amount_out, price_impact, spot_price, SlippageTolerance};

/// Common types for analytics
pub use rust_decimal::Decimal;
