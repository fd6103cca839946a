use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::controller::SearchController;

use super::signal::{ViewportSignal, SCROLL_THRESHOLD};

/// Requests the next page when the viewport nears the end of the results.
///
/// Listens from [`attach`](ScrollTrigger::attach) until dropped.
pub struct ScrollTrigger {
    listener: JoinHandle<()>,
}

impl ScrollTrigger {
    /// Start listening to `signal` on behalf of `controller`.
    pub fn attach(signal: &ViewportSignal, controller: Arc<SearchController>) -> Self {
        let mut positions = signal.subscribe();

        let listener = tokio::spawn(async move {
            loop {
                match positions.recv().await {
                    Ok(position) => {
                        if !position.is_near_bottom(SCROLL_THRESHOLD) {
                            continue;
                        }
                        // Checked again inside continue_search; this only
                        // avoids spawning for positions that cannot load more.
                        if !controller.can_continue() {
                            trace!("Near bottom, nothing to continue");
                            continue;
                        }
                        debug!("Near bottom, requesting next page");
                        let controller = Arc::clone(&controller);
                        tokio::spawn(async move {
                            controller.continue_search().await;
                        });
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        trace!(skipped, "Viewport listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Self { listener }
    }
}

impl Drop for ScrollTrigger {
    fn drop(&mut self) {
        self.listener.abort();
    }
}
