//! Fungible token capability
//!
//! The pool never embeds token state. It holds each asset as an
//! `Arc<dyn FungibleToken>` and moves funds only through this interface.
//! `InMemoryToken` is the adapter used by tests and simulations; it can
//! freeze accounts and run a hook after every transfer, which is how an
//! adversarial token that calls back into the pool is modelled.

use crate::types::{AccountId, TokenId};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

/// Failures reported by a token contract
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u128, available: u128 },

    #[error("insufficient allowance: requested {requested}, available {available}")]
    InsufficientAllowance { requested: u128, available: u128 },

    #[error("account {0} is frozen")]
    Frozen(AccountId),

    #[error("token balance overflow")]
    Overflow,
}

/// Capability interface of an external fungible token
///
/// The first account argument of every mutating call is the execution
/// context: the account on whose behalf the call is made.
pub trait FungibleToken: Send + Sync {
    fn id(&self) -> &TokenId;

    fn balance_of(&self, holder: &AccountId) -> u128;

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128;

    /// Move `amount` from `sender` to `to`
    fn transfer(&self, sender: &AccountId, to: &AccountId, amount: u128)
        -> Result<(), TokenError>;

    /// Move `amount` from `from` to `to`, spending `spender`'s allowance
    fn transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), TokenError>;

    /// Set `spender`'s allowance over `owner`'s balance
    fn approve(&self, owner: &AccountId, spender: &AccountId, amount: u128)
        -> Result<(), TokenError>;
}

/// A completed balance movement, passed to the transfer hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferEvent {
    pub token: TokenId,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: u128,
}

pub type TransferHook = Arc<dyn Fn(&TransferEvent) + Send + Sync>;

#[derive(Debug, Default)]
struct TokenState {
    balances: HashMap<AccountId, u128>,
    allowances: HashMap<(AccountId, AccountId), u128>,
    frozen: Vec<AccountId>,
    total_supply: u128,
}

impl TokenState {
    fn balance(&self, holder: &AccountId) -> u128 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    fn check_not_frozen(&self, account: &AccountId) -> Result<(), TokenError> {
        if self.frozen.contains(account) {
            return Err(TokenError::Frozen(account.clone()));
        }
        Ok(())
    }

    fn move_balance(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), TokenError> {
        self.check_not_frozen(from)?;
        self.check_not_frozen(to)?;

        let available = self.balance(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.balances.insert(from.clone(), available - amount);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }
}

/// In-process token ledger implementing [`FungibleToken`]
pub struct InMemoryToken {
    id: TokenId,
    state: Mutex<TokenState>,
    hook: RwLock<Option<TransferHook>>,
}

impl InMemoryToken {
    pub fn new(id: impl Into<TokenId>) -> Self {
        Self {
            id: id.into(),
            state: Mutex::new(TokenState::default()),
            hook: RwLock::new(None),
        }
    }

    /// Create new supply for `holder`
    pub fn mint(&self, holder: &AccountId, amount: u128) -> Result<(), TokenError> {
        let mut state = self.state.lock();
        let total_supply = state
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let balance = state.balance(holder) + amount;
        state.total_supply = total_supply;
        state.balances.insert(holder.clone(), balance);
        Ok(())
    }

    pub fn total_supply(&self) -> u128 {
        self.state.lock().total_supply
    }

    /// Block every transfer into or out of `account`
    pub fn freeze(&self, account: &AccountId) {
        let mut state = self.state.lock();
        if !state.frozen.contains(account) {
            state.frozen.push(account.clone());
        }
    }

    pub fn unfreeze(&self, account: &AccountId) {
        self.state.lock().frozen.retain(|frozen| frozen != account);
    }

    /// Install a hook run after every successful transfer
    pub fn set_hook(&self, hook: TransferHook) {
        *self.hook.write() = Some(hook);
    }

    pub fn clear_hook(&self) {
        *self.hook.write() = None;
    }

    // Runs with the state lock released so the hook may query this token.
    fn notify(&self, from: &AccountId, to: &AccountId, amount: u128) {
        let hook = self.hook.read().clone();
        if let Some(hook) = hook {
            hook(&TransferEvent {
                token: self.id.clone(),
                from: from.clone(),
                to: to.clone(),
                amount,
            });
        }
    }
}

impl FungibleToken for InMemoryToken {
    fn id(&self) -> &TokenId {
        &self.id
    }

    fn balance_of(&self, holder: &AccountId) -> u128 {
        self.state.lock().balance(holder)
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.state
            .lock()
            .allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(
        &self,
        sender: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), TokenError> {
        self.state.lock().move_balance(sender, to, amount)?;
        trace!(token = %self.id, from = %sender, to = %to, amount, "transfer");
        self.notify(sender, to, amount);
        Ok(())
    }

    fn transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), TokenError> {
        {
            let mut state = self.state.lock();
            let key = (from.clone(), spender.clone());
            let allowed = state.allowances.get(&key).copied().unwrap_or(0);
            if allowed < amount {
                return Err(TokenError::InsufficientAllowance {
                    requested: amount,
                    available: allowed,
                });
            }
            state.move_balance(from, to, amount)?;
            state.allowances.insert(key, allowed - amount);
        }
        trace!(token = %self.id, spender = %spender, from = %from, to = %to, amount, "transfer_from");
        self.notify(from, to, amount);
        Ok(())
    }

    fn approve(
        &self,
        owner: &AccountId,
        spender: &AccountId,
        amount: u128,
    ) -> Result<(), TokenError> {
        self.state
            .lock()
            .allowances
            .insert((owner.clone(), spender.clone()), amount);
        Ok(())
    }
}
