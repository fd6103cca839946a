use tokio::sync::broadcast;
use tracing::trace;

/// Fraction of the content height at which the next page is requested.
pub const SCROLL_THRESHOLD: f64 = 0.9;

const SIGNAL_CAPACITY: usize = 64;

/// Scroll position reported by the view, in any consistent unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportPosition {
    /// Distance scrolled from the top.
    pub scroll_offset: f64,
    /// Height of the visible area.
    pub viewport_height: f64,
    /// Total height of the scrollable content.
    pub content_height: f64,
}

impl ViewportPosition {
    pub fn new(scroll_offset: f64, viewport_height: f64, content_height: f64) -> Self {
        Self {
            scroll_offset,
            viewport_height,
            content_height,
        }
    }

    /// A viewport scrolled all the way down.
    pub fn at_bottom(viewport_height: f64, content_height: f64) -> Self {
        Self::new(
            (content_height - viewport_height).max(0.0),
            viewport_height,
            content_height,
        )
    }

    /// Whether the bottom of the viewport has reached `threshold` of the content.
    pub fn is_near_bottom(&self, threshold: f64) -> bool {
        self.scroll_offset + self.viewport_height >= threshold * self.content_height
    }
}

/// Broadcast of viewport positions from the view to its listeners.
#[derive(Debug, Clone)]
pub struct ViewportSignal {
    tx: broadcast::Sender<ViewportPosition>,
}

impl Default for ViewportSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self { tx }
    }

    /// Report a scroll position. Positions emitted with no listener are dropped.
    pub fn emit(&self, position: ViewportPosition) {
        if self.tx.send(position).is_err() {
            trace!("Viewport position dropped, no listeners");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewportPosition> {
        self.tx.subscribe()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_bottom_threshold() {
        // 800 + 100 = 900 = 0.9 * 1000
        assert!(ViewportPosition::new(800.0, 100.0, 1000.0).is_near_bottom(SCROLL_THRESHOLD));
        assert!(!ViewportPosition::new(799.0, 100.0, 1000.0).is_near_bottom(SCROLL_THRESHOLD));
    }

    #[test]
    fn test_short_content_is_always_near_bottom() {
        assert!(ViewportPosition::new(0.0, 900.0, 300.0).is_near_bottom(SCROLL_THRESHOLD));
    }

    #[test]
    fn test_at_bottom() {
        let position = ViewportPosition::at_bottom(100.0, 1000.0);
        assert_eq!(position.scroll_offset, 900.0);
        assert!(position.is_near_bottom(SCROLL_THRESHOLD));

        let short = ViewportPosition::at_bottom(500.0, 100.0);
        assert_eq!(short.scroll_offset, 0.0);
    }

    #[tokio::test]
    async fn test_emit_reaches_subscribers() {
        let signal = ViewportSignal::new();
        let mut rx = signal.subscribe();
        assert_eq!(signal.listener_count(), 1);

        signal.emit(ViewportPosition::new(1.0, 2.0, 3.0));
        assert_eq!(rx.recv().await.unwrap(), ViewportPosition::new(1.0, 2.0, 3.0));

        drop(rx);
        assert_eq!(signal.listener_count(), 0);
        signal.emit(ViewportPosition::new(1.0, 2.0, 3.0));
    }
}
