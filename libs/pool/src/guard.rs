//! In-flight flag rejecting nested pool operations
//!
//! The pool's lock is reentrant, so a token callback running on the same
//! thread can get back in. The flag is what turns that second entry into
//! an error instead of a nested mutation.

use crate::error::{PoolError, Result};
use std::cell::Cell;

pub(crate) struct EntryGuard<'a> {
    in_flight: &'a Cell<bool>,
}

impl<'a> EntryGuard<'a> {
    pub(crate) fn enter(in_flight: &'a Cell<bool>, operation: &'static str) -> Result<Self> {
        if in_flight.replace(true) {
            return Err(PoolError::Reentrancy { operation });
        }
        Ok(Self { in_flight })
    }
}

impl Drop for EntryGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.set(false);
    }
}
