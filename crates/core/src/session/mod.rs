//! The mounted search view.
//!
//! A [`SearchSession`] lives as long as the search screen: it owns the
//! debounced trigger and the scroll listener, exposes parameter setters and
//! result snapshots, and releases both triggers when dropped.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::client::SearchClient;
use crate::controller::{ResultSnapshot, SearchController};
use crate::debounce::{Debouncer, Scheduler};
use crate::query::{QueryParameters, TitleType, Year};
use crate::scroll::{ScrollTrigger, ViewportSignal};

pub struct SearchSession {
    controller: Arc<SearchController>,
    debouncer: Debouncer,
    _scroll: ScrollTrigger,
}

impl SearchSession {
    /// Mount the search view.
    ///
    /// Schedules the initial debounced query, which is a no-op while the
    /// search term is empty.
    pub fn mount(
        client: Arc<dyn SearchClient>,
        scheduler: Arc<dyn Scheduler>,
        viewport: &ViewportSignal,
    ) -> Self {
        let controller = Arc::new(SearchController::new(client));
        let scroll = ScrollTrigger::attach(viewport, Arc::clone(&controller));

        let session = Self {
            controller,
            debouncer: Debouncer::new(scheduler),
            _scroll: scroll,
        };
        session.schedule_query();

        info!("Search view mounted");
        session
    }

    pub fn set_search_term(&self, search_term: impl Into<String>) {
        let search_term = search_term.into();
        self.update(|params| params.search_term = search_term);
    }

    pub fn set_year(&self, year: Option<Year>) {
        self.update(|params| params.year = year);
    }

    pub fn set_title_type(&self, title_type: TitleType) {
        self.update(|params| params.title_type = title_type);
    }

    pub fn parameters(&self) -> QueryParameters {
        self.controller.parameters()
    }

    pub fn snapshot(&self) -> ResultSnapshot {
        self.controller.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResultSnapshot> {
        self.controller.subscribe()
    }

    pub fn controller(&self) -> &Arc<SearchController> {
        &self.controller
    }

    // Setting a value equal to the current one does not restart the timer.
    fn update(&self, update: impl FnOnce(&mut QueryParameters)) {
        if self.controller.update_parameters(update) {
            debug!(params = ?self.controller.parameters(), "Search parameters changed");
            self.schedule_query();
        }
    }

    fn schedule_query(&self) {
        let controller = Arc::clone(&self.controller);
        self.debouncer.trigger(Box::pin(async move {
            let params = controller.parameters();
            controller.fresh_search(params).await;
        }));
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.debouncer.cancel();
        info!("Search view unmounted");
    }
}
