//! Token movements of one pool operation
//!
//! Legs run in order. When a leg fails, the legs that already ran are
//! reversed newest-first. Reversing a pull is a plain transfer back out of
//! the pool; reversing a push needs the recipient's allowance and may fail.
//! A leg that could not be reversed is reported back as [`Stuck`] so the
//! pool can commit what actually moved.

use crate::error::PoolError;
use crate::token::{FungibleToken, TokenError};
use crate::types::{AccountId, Asset, TokenId};
use tracing::{debug, error};

enum Leg<'a> {
    /// `from` -> pool, spending `from`'s allowance to the pool
    Pull {
        asset: Asset,
        token: &'a dyn FungibleToken,
        from: &'a AccountId,
        amount: u128,
    },
    /// pool -> `to`
    Push {
        asset: Asset,
        token: &'a dyn FungibleToken,
        to: &'a AccountId,
        amount: u128,
    },
}

impl Leg<'_> {
    fn token(&self) -> &dyn FungibleToken {
        match self {
            Leg::Pull { token, .. } | Leg::Push { token, .. } => *token,
        }
    }

    fn run(&self, pool: &AccountId) -> std::result::Result<(), TokenError> {
        match self {
            Leg::Pull {
                token,
                from,
                amount,
                ..
            } => token.transfer_from(pool, from, pool, *amount),
            Leg::Push {
                token, to, amount, ..
            } => token.transfer(pool, to, *amount),
        }
    }

    fn reverse(&self, pool: &AccountId) -> std::result::Result<(), TokenError> {
        match self {
            Leg::Pull {
                token,
                from,
                amount,
                ..
            } => token.transfer(pool, from, *amount),
            Leg::Push {
                token, to, amount, ..
            } => token.transfer_from(pool, to, pool, *amount),
        }
    }

    fn stuck(&self) -> Stuck {
        match *self {
            Leg::Pull { asset, amount, .. } => Stuck::Pulled { asset, amount },
            Leg::Push { asset, amount, .. } => Stuck::Pushed { asset, amount },
        }
    }
}

/// A leg that ran and could not be reversed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stuck {
    /// Still held by the pool
    Pulled { asset: Asset, amount: u128 },
    /// Already paid out by the pool
    Pushed { asset: Asset, amount: u128 },
}

/// The failing leg, plus whatever could not be put back
#[derive(Debug)]
pub(crate) struct SettlementFailure {
    pub(crate) token: TokenId,
    pub(crate) source: TokenError,
    pub(crate) stuck: Vec<Stuck>,
}

impl SettlementFailure {
    pub(crate) fn paid_out(&self) -> bool {
        self.stuck.iter().any(|leg| matches!(leg, Stuck::Pushed { .. }))
    }
}

impl From<SettlementFailure> for PoolError {
    fn from(failure: SettlementFailure) -> Self {
        if failure.stuck.is_empty() {
            PoolError::TransferFailed {
                token: failure.token,
                source: failure.source,
            }
        } else {
            PoolError::PartialSettlement {
                token: failure.token,
                source: failure.source,
            }
        }
    }
}

pub(crate) struct Settlement<'a> {
    pool: &'a AccountId,
    legs: Vec<Leg<'a>>,
}

impl<'a> Settlement<'a> {
    pub(crate) fn new(pool: &'a AccountId) -> Self {
        Self {
            pool,
            legs: Vec::with_capacity(2),
        }
    }

    pub(crate) fn pull(
        mut self,
        asset: Asset,
        token: &'a dyn FungibleToken,
        from: &'a AccountId,
        amount: u128,
    ) -> Self {
        if amount > 0 {
            self.legs.push(Leg::Pull {
                asset,
                token,
                from,
                amount,
            });
        }
        self
    }

    pub(crate) fn push(
        mut self,
        asset: Asset,
        token: &'a dyn FungibleToken,
        to: &'a AccountId,
        amount: u128,
    ) -> Self {
        if amount > 0 {
            self.legs.push(Leg::Push {
                asset,
                token,
                to,
                amount,
            });
        }
        self
    }

    pub(crate) fn execute(self) -> std::result::Result<(), SettlementFailure> {
        for (index, leg) in self.legs.iter().enumerate() {
            if let Err(source) = leg.run(self.pool) {
                let token = leg.token().id().clone();
                debug!(%token, %source, "settlement leg failed, unwinding");
                let stuck = self.unwind(&self.legs[..index]);
                return Err(SettlementFailure {
                    token,
                    source,
                    stuck,
                });
            }
        }
        Ok(())
    }

    fn unwind(&self, done: &[Leg<'_>]) -> Vec<Stuck> {
        let mut stuck = Vec::new();
        for leg in done.iter().rev() {
            if let Err(err) = leg.reverse(self.pool) {
                error!(token = %leg.token().id(), %err, "failed to reverse settlement leg");
                stuck.push(leg.stuck());
            }
        }
        stuck
    }
}
