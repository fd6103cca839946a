use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::task::AbortHandle;

/// Work to run once a scheduled delay elapses.
pub type ScheduledAction = BoxFuture<'static, ()>;

/// Identifies a scheduled action for cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    id: u64,
}

/// Delayed, cancelable execution.
pub trait Scheduler: Send + Sync {
    /// Run `action` after `delay`.
    fn schedule(&self, delay: Duration, action: ScheduledAction) -> TaskHandle;

    /// Drop a scheduled action if its delay has not elapsed yet.
    ///
    /// An action that already started keeps running; cancelling it, or an
    /// unknown handle, is a no-op.
    fn cancel(&self, handle: &TaskHandle);
}

type PendingTasks = Arc<Mutex<HashMap<u64, AbortHandle>>>;

/// Scheduler backed by tokio timers.
///
/// Must be used from within a tokio runtime.
#[derive(Default)]
pub struct TokioScheduler {
    next_id: AtomicU64,
    pending: PendingTasks,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actions still waiting for their delay.
    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }
}

fn lock(pending: &PendingTasks) -> MutexGuard<'_, HashMap<u64, AbortHandle>> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, action: ScheduledAction) -> TaskHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let pending = Arc::clone(&self.pending);

        // Held across the spawn so the task cannot claim its slot before it exists.
        let mut tasks = lock(&self.pending);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if lock(&pending).remove(&id).is_none() {
                return;
            }
            action.await;
        });
        tasks.insert(id, task.abort_handle());

        TaskHandle { id }
    }

    fn cancel(&self, handle: &TaskHandle) {
        if let Some(task) = lock(&self.pending).remove(&handle.id) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in lock(&self.pending).drain() {
            task.abort();
        }
    }
}
