//! Actor runtime
//!
//! An actor is a tokio task that owns its state and drains a bounded
//! mailbox one message at a time. Callers talk to it through a cloneable
//! [`ActorRef`]; the task ends when it asks to stop or when every
//! reference has been dropped.

use crate::error::ExecutorError;
use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

static NEXT_ACTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique actor identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(u64);

impl ActorId {
    fn next() -> Self {
        Self(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor-{}", self.0)
    }
}

/// What the message loop does after a message is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Trait for actor behavior
#[async_trait]
pub trait ActorBehavior: Send + 'static {
    type Message: Send + 'static;

    /// Handle incoming message
    async fn handle(&mut self, msg: Self::Message) -> Flow;

    /// Called when actor starts
    async fn on_start(&mut self) {}

    /// Called after the message loop exits
    async fn on_stop(&mut self) {}
}

/// Cloneable address of a running actor
pub struct ActorRef<M> {
    id: ActorId,
    sender: mpsc::Sender<M>,
}

impl<M: Send + 'static> ActorRef<M> {
    /// Enqueue a message, waiting while the mailbox is full
    pub async fn send(&self, msg: M) -> Result<(), ExecutorError> {
        self.sender.send(msg).await.map_err(|_| ExecutorError::Closed)
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    /// True once the actor has stopped draining its mailbox
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<M> Clone for ActorRef<M> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            sender: self.sender.clone(),
        }
    }
}

impl<M> fmt::Debug for ActorRef<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorRef").field("id", &self.id).finish()
    }
}

/// Spawn `actor` on the current tokio runtime with a mailbox of `capacity`
///
/// Panics if `capacity` is zero, like [`mpsc::channel`].
pub fn spawn<A: ActorBehavior>(actor: A, capacity: usize) -> (ActorRef<A::Message>, JoinHandle<()>) {
    let id = ActorId::next();
    let (sender, receiver) = mpsc::channel(capacity);

    debug!(
        actor_id = %id,
        actor_type = std::any::type_name::<A>(),
        capacity,
        "Spawning actor"
    );

    let task = ActorTask {
        id,
        behavior: actor,
        receiver,
    };
    let handle = tokio::spawn(task.run());
    (ActorRef { id, sender }, handle)
}

struct ActorTask<A: ActorBehavior> {
    id: ActorId,
    behavior: A,
    receiver: mpsc::Receiver<A::Message>,
}

impl<A: ActorBehavior> ActorTask<A> {
    async fn run(mut self) {
        let task_start = Instant::now();
        self.behavior.on_start().await;
        info!(actor_id = %self.id, "Actor started");

        let mut handled: u64 = 0;
        let mut stopped = false;
        while let Some(msg) = self.receiver.recv().await {
            handled += 1;
            if self.behavior.handle(msg).await == Flow::Stop {
                stopped = true;
                break;
            }
        }

        // pending messages are dropped with the receiver
        self.receiver.close();
        if !stopped {
            warn!(actor_id = %self.id, "All actor references dropped");
        }
        self.behavior.on_stop().await;
        info!(
            actor_id = %self.id,
            messages_handled = handled,
            uptime_ms = task_start.elapsed().as_millis() as u64,
            "Actor stopped"
        );
    }
}
