//! Serializing Pool Executor
//!
//! Runs a [`Pool`](pool::Pool) inside an actor so that callers on any task
//! submit operations through a bounded mailbox and await the outcome.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   PoolRequest    ┌──────────────────────┐
//! │ PoolHandle   │ ───────────────► │  PoolActor (task)    │
//! │ (cloneable)  │   bounded mpsc   │                      │
//! └──────────────┘                  │  Arc<Pool>           │
//!        ▲                          │  one request at a    │
//!        │        oneshot reply     │  time, mailbox order │
//!        └───────────────────────── └──────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! # async fn demo(pool: std::sync::Arc<pool::Pool>) -> Result<(), pool_actors::ExecutorError> {
//! use pool_actors::PoolHandle;
//!
//! let (handle, task) = PoolHandle::spawn(pool, 1024);
//! let snapshot = handle.snapshot().await?;
//! println!("reserves: {} / {}", snapshot.reserve0, snapshot.reserve1);
//!
//! handle.shutdown().await?;
//! task.await.ok();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod messages;
pub mod pool_actor;
pub mod system;

pub use error::ExecutorError;
pub use messages::{PoolRequest, Reply};
pub use pool_actor::{PoolActor, PoolHandle};
pub use system::{spawn, ActorBehavior, ActorId, ActorRef, Flow};
