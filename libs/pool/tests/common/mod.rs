//! Shared fixtures for pool integration tests

#![allow(dead_code)]

use pool::{AccountId, FungibleToken, InMemoryToken, Pool, PoolSettings, SwapRequest, TokenId};
use std::sync::Arc;

pub const TOKEN0_FUNDING: u128 = 200;
pub const TOKEN1_FUNDING: u128 = 10_000_000;

pub struct Fixture {
    pub token0: Arc<InMemoryToken>,
    pub token1: Arc<InMemoryToken>,
    pub pool: Arc<Pool>,
    pub accounts: Vec<AccountId>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_settings(PoolSettings::default())
    }

    /// Four accounts, each funded with 200 BTC and 10,000,000 USDC
    pub fn with_settings(settings: PoolSettings) -> Self {
        let token0 = Arc::new(InMemoryToken::new("BTC"));
        let token1 = Arc::new(InMemoryToken::new("USDC"));
        let pool = Arc::new(
            Pool::new(
                AccountId::from("pool"),
                token0.clone(),
                token1.clone(),
                settings,
            )
            .unwrap(),
        );

        let accounts: Vec<AccountId> = ["alice", "bob", "carol", "dave"]
            .into_iter()
            .map(AccountId::from)
            .collect();
        for account in &accounts {
            token0.mint(account, TOKEN0_FUNDING).unwrap();
            token1.mint(account, TOKEN1_FUNDING).unwrap();
        }

        Self {
            token0,
            token1,
            pool,
            accounts,
        }
    }

    pub fn account(&self, index: usize) -> &AccountId {
        &self.accounts[index]
    }

    pub fn token0_id(&self) -> TokenId {
        self.token0.id().clone()
    }

    pub fn token1_id(&self) -> TokenId {
        self.token1.id().clone()
    }

    pub fn approve(&self, index: usize, amount0: u128, amount1: u128) {
        let owner = self.account(index);
        self.token0.approve(owner, self.pool.address(), amount0).unwrap();
        self.token1.approve(owner, self.pool.address(), amount1).unwrap();
    }

    /// Approve and deposit in one step
    pub fn deposit(&self, index: usize, amount0: u128, amount1: u128) -> u128 {
        self.approve(index, amount0, amount1);
        self.pool.add(self.account(index), amount0, amount1).unwrap()
    }

    pub fn sell_token0(&self, index: usize, amount_in: u128, amount_out_min: u128) -> SwapRequest {
        SwapRequest {
            amount_in,
            amount_out_min,
            token_in: self.token0_id(),
            token_out: self.token1_id(),
            to: self.account(index).clone(),
        }
    }
}
