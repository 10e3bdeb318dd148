//! Pool actor and its caller-side handle
//!
//! The actor owns the pool reference and applies requests strictly in
//! mailbox order, so every caller observes one total order of operations.

use crate::error::ExecutorError;
use crate::messages::PoolRequest;
use crate::system::{self, ActorBehavior, ActorRef, Flow};
use async_trait::async_trait;
use pool::{AccountId, Pool, PoolSnapshot, SwapQuote, SwapRequest, TokenId};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub struct PoolActor {
    pool: Arc<Pool>,
}

impl PoolActor {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActorBehavior for PoolActor {
    type Message = PoolRequest;

    async fn handle(&mut self, msg: PoolRequest) -> Flow {
        debug!(pool = %self.pool.address(), request = msg.kind(), "handling request");

        // a caller that gave up on its reply is not an error
        match msg {
            PoolRequest::Add {
                caller,
                amount0,
                amount1,
                reply,
            } => {
                let _ = reply.send(self.pool.add(&caller, amount0, amount1));
            }
            PoolRequest::Remove {
                caller,
                share_amount,
                reply,
            } => {
                let _ = reply.send(self.pool.remove(&caller, share_amount));
            }
            PoolRequest::Swap {
                caller,
                request,
                reply,
            } => {
                let _ = reply.send(self.pool.swap(&caller, &request));
            }
            PoolRequest::Quote {
                amount_in,
                input_token,
                reply,
            } => {
                let _ = reply.send(self.pool.get_amount_out(amount_in, &input_token));
            }
            PoolRequest::Snapshot { reply } => {
                let _ = reply.send(self.pool.snapshot());
            }
            PoolRequest::BalanceOf { holder, reply } => {
                let _ = reply.send(self.pool.balance_of(&holder));
            }
            PoolRequest::Shutdown { reply } => {
                let _ = reply.send(());
                return Flow::Stop;
            }
        }
        Flow::Continue
    }

    async fn on_start(&mut self) {
        info!(
            pool = %self.pool.address(),
            token0 = %self.pool.token0(),
            token1 = %self.pool.token1(),
            "pool executor started"
        );
    }

    async fn on_stop(&mut self) {
        let snapshot = self.pool.snapshot();
        info!(
            pool = %self.pool.address(),
            reserve0 = snapshot.reserve0,
            reserve1 = snapshot.reserve1,
            total_supply = snapshot.total_supply,
            "pool executor stopped"
        );
    }
}

/// Cloneable async front end to a pool actor
#[derive(Debug, Clone)]
pub struct PoolHandle {
    actor: ActorRef<PoolRequest>,
}

impl PoolHandle {
    /// Start an actor for `pool` on the current runtime
    ///
    /// The returned task finishes after `shutdown` or once every handle is
    /// dropped.
    pub fn spawn(pool: Arc<Pool>, mailbox_capacity: usize) -> (Self, JoinHandle<()>) {
        let (actor, task) = system::spawn(PoolActor::new(pool), mailbox_capacity);
        (Self { actor }, task)
    }

    pub async fn add(
        &self,
        caller: &AccountId,
        amount0: u128,
        amount1: u128,
    ) -> Result<u128, ExecutorError> {
        let result = self
            .request(|reply| PoolRequest::Add {
                caller: caller.clone(),
                amount0,
                amount1,
                reply,
            })
            .await?;
        Ok(result?)
    }

    pub async fn remove(
        &self,
        caller: &AccountId,
        share_amount: u128,
    ) -> Result<(u128, u128), ExecutorError> {
        let result = self
            .request(|reply| PoolRequest::Remove {
                caller: caller.clone(),
                share_amount,
                reply,
            })
            .await?;
        Ok(result?)
    }

    pub async fn swap(&self, caller: &AccountId, request: SwapRequest) -> Result<u128, ExecutorError> {
        let result = self
            .request(|reply| PoolRequest::Swap {
                caller: caller.clone(),
                request,
                reply,
            })
            .await?;
        Ok(result?)
    }

    pub async fn get_amount_out(
        &self,
        amount_in: u128,
        input_token: &TokenId,
    ) -> Result<SwapQuote, ExecutorError> {
        let result = self
            .request(|reply| PoolRequest::Quote {
                amount_in,
                input_token: input_token.clone(),
                reply,
            })
            .await?;
        Ok(result?)
    }

    pub async fn snapshot(&self) -> Result<PoolSnapshot, ExecutorError> {
        self.request(|reply| PoolRequest::Snapshot { reply }).await
    }

    pub async fn balance_of(&self, holder: &AccountId) -> Result<u128, ExecutorError> {
        self.request(|reply| PoolRequest::BalanceOf {
            holder: holder.clone(),
            reply,
        })
        .await
    }

    /// Stop the actor once the requests queued ahead of this one are done
    pub async fn shutdown(&self) -> Result<(), ExecutorError> {
        self.request(|reply| PoolRequest::Shutdown { reply }).await
    }

    pub fn is_closed(&self) -> bool {
        self.actor.is_closed()
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> PoolRequest,
    ) -> Result<T, ExecutorError> {
        let (reply, response) = oneshot::channel();
        self.actor.send(build(reply)).await?;
        response.await.map_err(|_| ExecutorError::Closed)
    }
}
