//! Debounced query triggering.
//!
//! Parameter changes arrive in bursts while the user types. The
//! [`Debouncer`] turns each burst into a single delayed action on top of a
//! cancelable [`Scheduler`].

mod debouncer;
mod scheduler;

pub use debouncer::{Debouncer, DEBOUNCE_DELAY};
pub use scheduler::{ScheduledAction, Scheduler, TaskHandle, TokioScheduler};
