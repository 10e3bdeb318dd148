//! # Constant-Product Liquidity Pool
//!
//! ## Purpose
//!
//! Custodies deposits of two fungible assets, issues LP shares proportional
//! to contributed liquidity, and exchanges one asset for the other at the
//! price set by the constant-product curve in the `amm` crate.
//!
//! ## Components
//!
//! - **ReserveLedger**: the pool's held balance of each asset
//! - **ShareLedger**: LP share supply and per-holder balances
//! - **LiquidityManager**: share issuance for deposits, pro-rata withdrawals
//! - **SwapExecutor**: direction resolution, quoting, slippage guard
//! - **Pool**: the aggregate; serializes operations and moves tokens
//!
//! ## Atomicity
//!
//! `add`, `remove` and `swap` either fully apply or leave the pool and every
//! token balance untouched. A transfer the pool cannot undo is committed
//! instead and reported as `PartialSettlement`, so reserves always match
//! the tokens the pool holds. See [`pool`] for the execution model.
//!
//! ## Usage
//!
//! ```rust
//! use pool::{AccountId, FungibleToken, InMemoryToken, Pool, PoolSettings, SwapRequest};
//! use std::sync::Arc;
//!
//! let btc = Arc::new(InMemoryToken::new("BTC"));
//! let usdc = Arc::new(InMemoryToken::new("USDC"));
//! let pool_address = AccountId::from("pool");
//! let pool = Pool::new(pool_address.clone(), btc.clone(), usdc.clone(), PoolSettings::default()).unwrap();
//!
//! let alice = AccountId::from("alice");
//! btc.mint(&alice, 21).unwrap();
//! usdc.mint(&alice, 1_000_000).unwrap();
//! btc.approve(&alice, &pool_address, 21).unwrap();
//! usdc.approve(&alice, &pool_address, 1_000_000).unwrap();
//!
//! pool.add(&alice, 20, 1_000_000).unwrap();
//! let quote = pool.get_amount_out(1, &"BTC".into()).unwrap();
//! let out = pool
//!     .swap(&alice, &SwapRequest {
//!         amount_in: 1,
//!         amount_out_min: quote.amount_out,
//!         token_in: "BTC".into(),
//!         token_out: "USDC".into(),
//!         to: alice.clone(),
//!     })
//!     .unwrap();
//! assert_eq!(out, 47_620);
//! ```

pub mod error;
mod guard;
pub mod liquidity;
pub mod pool;
pub mod reserves;
mod settlement;
pub mod settings;
pub mod shares;
pub mod state;
pub mod swap;
pub mod token;
pub mod types;

pub use error::{PoolError, Result};
pub use liquidity::LiquidityManager;
pub use pool::Pool;
pub use reserves::ReserveLedger;
pub use settings::{DepositPolicy, PoolSettings, DEFAULT_INITIAL_SHARES};
pub use shares::ShareLedger;
pub use state::{PoolSnapshot, PoolState};
pub use swap::{SwapExecutor, SwapQuote, SwapRequest};
pub use token::{FungibleToken, InMemoryToken, TokenError, TransferEvent, TransferHook};
pub use types::{AccountId, Asset, Direction, TokenId};
