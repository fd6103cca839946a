//! Infinite-scroll continuation.
//!
//! The view publishes its scroll position on a [`ViewportSignal`]. A
//! [`ScrollTrigger`] listens while the search view is mounted and asks the
//! controller for the next page once the user nears the end of the list.

mod signal;
mod trigger;

pub use signal::{ViewportPosition, ViewportSignal, SCROLL_THRESHOLD};
pub use trigger::ScrollTrigger;
