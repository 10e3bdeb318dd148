//! Executor error kinds

use pool::PoolError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    /// The actor has stopped; the request was not processed
    #[error("pool executor is closed")]
    Closed,

    /// The pool rejected the request
    #[error(transparent)]
    Pool(#[from] PoolError),
}

impl ExecutorError {
    /// The pool error behind this failure, if the pool produced one
    pub fn pool_error(&self) -> Option<&PoolError> {
        match self {
            ExecutorError::Pool(err) => Some(err),
            ExecutorError::Closed => None,
        }
    }
}
