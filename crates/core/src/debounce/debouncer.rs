use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::trace;

use super::scheduler::{ScheduledAction, Scheduler, TaskHandle};

/// Quiet period after the last parameter change before a query fires.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Coalesces rapid triggers into one delayed action.
///
/// Each [`trigger`](Debouncer::trigger) replaces whatever was pending, so only
/// the last action of a burst runs, [`DEBOUNCE_DELAY`] after the burst ends.
/// Dropping the debouncer cancels the pending action.
pub struct Debouncer {
    scheduler: Arc<dyn Scheduler>,
    pending: Mutex<Option<TaskHandle>>,
}

impl Debouncer {
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `action`, discarding any action still waiting.
    pub fn trigger(&self, action: ScheduledAction) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            trace!("Superseding pending debounced action");
            self.scheduler.cancel(&previous);
        }
        *pending = Some(self.scheduler.schedule(DEBOUNCE_DELAY, action));
    }

    /// Discard the pending action, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            self.scheduler.cancel(&handle);
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
