//! The pool aggregate
//!
//! Ties the ledgers, the pricing engine and the two token contracts
//! together behind one lock.
//!
//! # Execution model
//!
//! Every operation takes the pool's reentrant lock for its whole duration,
//! so operations from different threads run one at a time, in lock order.
//! Within an operation:
//!
//! 1. validation and quoting read the committed state
//! 2. the outcome is computed on a staged copy
//! 3. tokens move through a [`Settlement`]
//! 4. the staged copy replaces the committed state
//!
//! A failure at any step drops the staged copy, so the committed state is
//! never partially updated. The one exception is a settlement leg that ran
//! and could not be reversed: the pool then commits exactly the movements
//! that stuck and reports `PartialSettlement`, keeping reserves equal to
//! custody balances. A token that calls back into the pool during
//! step 3 runs on the same thread, gets through the reentrant lock, and is
//! refused by the in-flight flag. Read accessors stay available to it and
//! see the state as of the last commit.

use crate::error::{PoolError, Result};
use crate::guard::EntryGuard;
use crate::liquidity::LiquidityManager;
use crate::settings::PoolSettings;
use crate::settlement::{Settlement, SettlementFailure, Stuck};
use crate::state::{PoolSnapshot, PoolState};
use crate::swap::{SwapExecutor, SwapQuote, SwapRequest};
use crate::token::FungibleToken;
use crate::types::{AccountId, Asset, Direction, TokenId};
use amm::AmmPool;
use parking_lot::ReentrantMutex;
use std::cell::{Cell, RefCell};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

struct PoolCell {
    in_flight: Cell<bool>,
    state: RefCell<PoolState>,
}

/// Two-asset constant-product liquidity pool
pub struct Pool {
    address: AccountId,
    token0: Arc<dyn FungibleToken>,
    token1: Arc<dyn FungibleToken>,
    settings: PoolSettings,
    inner: ReentrantMutex<PoolCell>,
}

impl Pool {
    /// Create an empty pool custodying balances under `address`
    ///
    /// # Errors
    /// * `InvalidTokenPair` if both tokens share an identifier
    pub fn new(
        address: AccountId,
        token0: Arc<dyn FungibleToken>,
        token1: Arc<dyn FungibleToken>,
        settings: PoolSettings,
    ) -> Result<Self> {
        if token0.id() == token1.id() {
            return Err(PoolError::InvalidTokenPair {
                token_in: token0.id().clone(),
                token_out: Some(token1.id().clone()),
            });
        }
        if settings.initial_shares == 0 {
            return Err(PoolError::ZeroAmount);
        }

        info!(
            pool = %address,
            token0 = %token0.id(),
            token1 = %token1.id(),
            initial_shares = settings.initial_shares,
            deposit_policy = ?settings.deposit_policy,
            "pool created"
        );

        Ok(Self {
            address,
            token0,
            token1,
            settings,
            inner: ReentrantMutex::new(PoolCell {
                in_flight: Cell::new(false),
                state: RefCell::new(PoolState::default()),
            }),
        })
    }

    pub fn address(&self) -> &AccountId {
        &self.address
    }

    pub fn token0(&self) -> &TokenId {
        self.token0.id()
    }

    pub fn token1(&self) -> &TokenId {
        self.token1.id()
    }

    pub fn settings(&self) -> &PoolSettings {
        &self.settings
    }

    pub fn reserve0(&self) -> u128 {
        self.read(|state| state.reserves.get(Asset::Token0))
    }

    pub fn reserve1(&self) -> u128 {
        self.read(|state| state.reserves.get(Asset::Token1))
    }

    pub fn reserves(&self) -> (u128, u128) {
        self.read(|state| state.reserves.read())
    }

    pub fn total_supply(&self) -> u128 {
        self.read(|state| state.shares.total_supply())
    }

    pub fn balance_of(&self, holder: &AccountId) -> u128 {
        self.read(|state| state.shares.balance_of(holder))
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        let (reserve0, reserve1, total_supply) = self.read(|state| {
            let (reserve0, reserve1) = state.reserves.read();
            (reserve0, reserve1, state.shares.total_supply())
        });
        PoolSnapshot {
            token0: self.token0().clone(),
            token1: self.token1().clone(),
            reserve0,
            reserve1,
            total_supply,
        }
    }

    /// Deposit both assets and mint LP shares to `caller`
    ///
    /// `caller` must have approved the pool for both amounts beforehand.
    ///
    /// # Errors
    /// * `InvalidCounterparty` if `caller` is the pool itself
    /// * `ZeroAmount` for a zero amount, or a deposit minting no shares
    /// * `UnbalancedDeposit` off-ratio under the exact-ratio policy
    /// * `TransferFailed` if either pull fails; nothing is kept
    /// * `PartialSettlement` if a completed pull could not be refunded; it
    ///   stays in the reserves and no shares are minted
    /// * `Reentrancy` when called from inside another pool operation
    pub fn add(&self, caller: &AccountId, amount0: u128, amount1: u128) -> Result<u128> {
        let cell = self.inner.lock();
        let _entry = EntryGuard::enter(&cell.in_flight, "add").map_err(|e| self.rejected("add", e))?;
        self.counterparty(caller).map_err(|e| self.rejected("add", e))?;

        let mut staged = cell.state.borrow().clone();
        let minted = LiquidityManager::new(&self.settings)
            .add(&mut staged, caller, amount0, amount1)
            .map_err(|e| self.rejected("add", e))?;

        let settled = Settlement::new(&self.address)
            .pull(Asset::Token0, self.token0.as_ref(), caller, amount0)
            .pull(Asset::Token1, self.token1.as_ref(), caller, amount1)
            .execute();
        if let Err(failure) = settled {
            return Err(self.unsettled("add", &cell.state, failure, None));
        }

        *cell.state.borrow_mut() = staged;
        info!(pool = %self.address, %caller, amount0, amount1, minted, "liquidity added");
        Ok(minted)
    }

    /// Burn `share_amount` of `caller`'s shares for a pro-rata slice of both reserves
    ///
    /// # Errors
    /// * `ZeroAmount` for zero shares, or a slice that truncates to nothing
    /// * `InsufficientShares` if `caller` holds fewer shares
    /// * `InvalidCounterparty` if `caller` is the pool itself
    /// * `TransferFailed` if either payout fails and nothing was paid
    /// * `PartialSettlement` if the token1 payout fails after the token0
    ///   payout could not be taken back; the paid asset leaves the reserves
    ///   and `share_amount` is burned, the unpaid asset stays in the pool
    /// * `Reentrancy` when called from inside another pool operation
    pub fn remove(&self, caller: &AccountId, share_amount: u128) -> Result<(u128, u128)> {
        let cell = self.inner.lock();
        let _entry =
            EntryGuard::enter(&cell.in_flight, "remove").map_err(|e| self.rejected("remove", e))?;
        self.counterparty(caller).map_err(|e| self.rejected("remove", e))?;

        let mut staged = cell.state.borrow().clone();
        let (amount0, amount1) = LiquidityManager::new(&self.settings)
            .remove(&mut staged, caller, share_amount)
            .map_err(|e| self.rejected("remove", e))?;

        let settled = Settlement::new(&self.address)
            .push(Asset::Token0, self.token0.as_ref(), caller, amount0)
            .push(Asset::Token1, self.token1.as_ref(), caller, amount1)
            .execute();
        if let Err(failure) = settled {
            return Err(self.unsettled("remove", &cell.state, failure, Some((caller, share_amount))));
        }

        *cell.state.borrow_mut() = staged;
        info!(pool = %self.address, %caller, share_amount, amount0, amount1, "liquidity removed");
        Ok((amount0, amount1))
    }

    /// Quote a trade of `amount_in` of `input_token` against current reserves
    ///
    /// Read-only: returns the output and the reserves the pool would hold
    /// after the trade.
    ///
    /// # Errors
    /// * `InvalidTokenPair` if `input_token` is not one of this pool's tokens
    /// * `ZeroAmount` for a zero input
    /// * `EmptyPool` if the pool holds no liquidity
    /// * `InsufficientReserve` if the trade would empty the output reserve
    pub fn get_amount_out(&self, amount_in: u128, input_token: &TokenId) -> Result<SwapQuote> {
        let direction = Direction::from_input(self.asset_of(input_token)?);
        let quote = self.read(|state| SwapExecutor::quote(&state.reserves, direction, amount_in))?;
        debug!(pool = %self.address, %direction, amount_in, amount_out = quote.amount_out, "quote");
        Ok(quote)
    }

    /// Smallest input of the opposite asset that yields `amount_out` of `output_token`
    pub fn get_amount_in(&self, amount_out: u128, output_token: &TokenId) -> Result<u128> {
        let direction = Direction::from_input(self.asset_of(output_token)?.other());
        let amount_in = self.read(|state| state.reserves.oriented(direction).get_amount_in(amount_out))?;
        Ok(amount_in)
    }

    /// Exchange `request.amount_in` of one asset for the other
    ///
    /// The output goes to `request.to`; the input is pulled from `caller`.
    ///
    /// # Errors
    /// * `InvalidCounterparty` if `caller` or `request.to` is the pool itself
    /// * `InvalidTokenPair` unless the request names this pool's two tokens
    /// * `SlippageExceeded` if the output is below `amount_out_min`
    /// * `InsufficientReserve` if the trade would empty the output reserve
    /// * `TransferFailed` if the pull or the payout fails
    /// * `PartialSettlement` if the payout fails and the input could not be
    ///   refunded; the input stays in the reserves
    /// * `Reentrancy` when called from inside another pool operation
    pub fn swap(&self, caller: &AccountId, request: &SwapRequest) -> Result<u128> {
        let cell = self.inner.lock();
        let _entry =
            EntryGuard::enter(&cell.in_flight, "swap").map_err(|e| self.rejected("swap", e))?;
        self.counterparty(caller)
            .and_then(|()| self.counterparty(&request.to))
            .map_err(|e| self.rejected("swap", e))?;

        let direction = SwapExecutor::direction(
            self.token0(),
            self.token1(),
            &request.token_in,
            &request.token_out,
        )
        .map_err(|e| self.rejected("swap", e))?;

        let mut reserves = cell.state.borrow().reserves;
        let amount_out = SwapExecutor::execute(
            &mut reserves,
            direction,
            request.amount_in,
            request.amount_out_min,
        )
        .map_err(|e| self.rejected("swap", e))?;

        let (token_in, token_out) = self.oriented_tokens(direction);
        let settled = Settlement::new(&self.address)
            .pull(direction.input(), token_in, caller, request.amount_in)
            .push(direction.output(), token_out, &request.to, amount_out)
            .execute();
        if let Err(failure) = settled {
            return Err(self.unsettled("swap", &cell.state, failure, None));
        }

        cell.state.borrow_mut().reserves = reserves;
        info!(
            pool = %self.address,
            %caller,
            to = %request.to,
            %direction,
            amount_in = request.amount_in,
            amount_out,
            "swap executed"
        );
        Ok(amount_out)
    }

    /// Move LP shares between holders
    pub fn transfer_shares(&self, from: &AccountId, to: &AccountId, amount: u128) -> Result<()> {
        let cell = self.inner.lock();
        let _entry = EntryGuard::enter(&cell.in_flight, "transfer_shares")
            .map_err(|e| self.rejected("transfer_shares", e))?;

        cell.state
            .borrow_mut()
            .shares
            .transfer(from, to, amount)
            .map_err(|e| self.rejected("transfer_shares", e))?;
        debug!(pool = %self.address, %from, %to, amount, "shares transferred");
        Ok(())
    }

    /// Verify ledger invariants and that reserves match custody balances
    pub fn check_invariants(&self) -> Result<()> {
        let cell = self.inner.lock();
        let state = cell.state.borrow();

        if let Some(violation) = state.invariant_violation() {
            return Err(PoolError::InvariantViolation(violation));
        }
        for (asset, token) in [(Asset::Token0, &self.token0), (Asset::Token1, &self.token1)] {
            let reserve = state.reserves.get(asset);
            let held = token.balance_of(&self.address);
            if reserve != held {
                return Err(PoolError::InvariantViolation(format!(
                    "{} reserve {reserve} differs from custody balance {held}",
                    token.id()
                )));
            }
        }
        Ok(())
    }

    fn read<R>(&self, f: impl FnOnce(&PoolState) -> R) -> R {
        let cell = self.inner.lock();
        let state = cell.state.borrow();
        f(&state)
    }

    fn asset_of(&self, token: &TokenId) -> Result<Asset> {
        if token == self.token0() {
            Ok(Asset::Token0)
        } else if token == self.token1() {
            Ok(Asset::Token1)
        } else {
            Err(PoolError::InvalidTokenPair {
                token_in: token.clone(),
                token_out: None,
            })
        }
    }

    fn oriented_tokens(&self, direction: Direction) -> (&dyn FungibleToken, &dyn FungibleToken) {
        match direction {
            Direction::ZeroForOne => (self.token0.as_ref(), self.token1.as_ref()),
            Direction::OneForZero => (self.token1.as_ref(), self.token0.as_ref()),
        }
    }

    fn counterparty(&self, account: &AccountId) -> Result<()> {
        if *account == self.address {
            return Err(PoolError::InvalidCounterparty(account.clone()));
        }
        Ok(())
    }

    /// Commit the legs a failed settlement left in place
    ///
    /// `burn` names the withdrawal whose shares go once any payout stuck.
    fn unsettled(
        &self,
        operation: &'static str,
        state: &RefCell<PoolState>,
        failure: SettlementFailure,
        burn: Option<(&AccountId, u128)>,
    ) -> PoolError {
        if failure.stuck.is_empty() {
            return self.rejected(operation, failure.into());
        }

        let mut reconciled = state.borrow().clone();
        let applied = failure
            .stuck
            .iter()
            .try_for_each(|leg| match *leg {
                Stuck::Pulled { asset, amount } => reconciled.reserves.credit(asset, amount),
                Stuck::Pushed { asset, amount } => reconciled.reserves.debit(asset, amount),
            })
            .and_then(|()| match burn {
                Some((holder, shares)) if failure.paid_out() => reconciled.shares.burn(holder, shares),
                _ => Ok(()),
            });
        if let Err(err) = applied {
            error!(pool = %self.address, operation, %err, stuck = ?failure.stuck, "cannot reconcile settled legs");
            return PoolError::InvariantViolation(format!(
                "{operation} left unreversed transfers that do not fit the ledgers: {err}"
            ));
        }

        *state.borrow_mut() = reconciled;
        error!(
            pool = %self.address,
            operation,
            token = %failure.token,
            stuck = ?failure.stuck,
            "settlement partially applied, committed the transfers that stuck"
        );
        failure.into()
    }

    fn rejected(&self, operation: &'static str, err: PoolError) -> PoolError {
        warn!(pool = %self.address, operation, %err, "operation rejected");
        err
    }
}
