//! Pagination and aggregation of search results.
//!
//! The [`SearchController`] owns the only mutable result state. A fresh
//! search starts a new session and replaces the list; a continuation fetches
//! the next page of the same session and appends to it.
//!
//! Every request is tagged with the session and parameter snapshot it was
//! issued under. When it settles the tag is compared with the current
//! session and parameters, and a mismatching (stale) response is dropped
//! without touching the visible results. `loading` always tracks the most
//! recently issued request.

mod state;

pub use state::*;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::{PageRequest, SearchClient, SearchError, SearchPage};
use crate::query::QueryParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Fresh,
    Continuation,
}

/// Identity of an in-flight request, checked again when it settles.
#[derive(Debug, Clone)]
struct RequestTag {
    id: u64,
    session: u64,
    params: QueryParameters,
    page: u32,
    kind: RequestKind,
}

#[derive(Debug, Default)]
struct ControllerInner {
    /// Parameters currently entered in the view.
    params: QueryParameters,
    /// Parameters the current results belong to.
    session_params: QueryParameters,
    session: u64,
    state: AggregatedResultState,
    next_request_id: u64,
    in_flight: Option<u64>,
}

impl ControllerInner {
    fn issue(&mut self, kind: RequestKind, page: u32) -> RequestTag {
        self.next_request_id += 1;
        self.in_flight = Some(self.next_request_id);
        RequestTag {
            id: self.next_request_id,
            session: self.session,
            params: self.session_params.clone(),
            page,
            kind,
        }
    }

    fn is_current(&self, tag: &RequestTag) -> bool {
        tag.session == self.session && tag.params == self.params
    }
}

/// Owner of the aggregated search results.
pub struct SearchController {
    client: Arc<dyn SearchClient>,
    inner: Mutex<ControllerInner>,
    snapshots: watch::Sender<ResultSnapshot>,
}

impl SearchController {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        let (snapshots, _) = watch::channel(ResultSnapshot::default());
        Self {
            client,
            inner: Mutex::new(ControllerInner::default()),
            snapshots,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Callers hold the lock, so snapshots are published in update order.
    fn replace_state(&self, inner: &mut ControllerInner, state: AggregatedResultState) {
        self.snapshots.send_replace(ResultSnapshot::from(&state));
        inner.state = state;
    }

    /// Parameters currently entered in the view.
    pub fn parameters(&self) -> QueryParameters {
        self.lock().params.clone()
    }

    /// Record the parameters entered in the view.
    ///
    /// In-flight requests issued under other parameters become stale.
    pub fn set_parameters(&self, params: QueryParameters) {
        self.lock().params = params;
    }

    /// Apply `update` to the current parameters; returns whether they changed.
    pub fn update_parameters(&self, update: impl FnOnce(&mut QueryParameters)) -> bool {
        let mut inner = self.lock();
        let before = inner.params.clone();
        update(&mut inner.params);
        inner.params != before
    }

    /// Full controller state, including the next page.
    pub fn state(&self) -> AggregatedResultState {
        self.lock().state.clone()
    }

    /// Current view snapshot.
    pub fn snapshot(&self) -> ResultSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receive a new snapshot on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ResultSnapshot> {
        self.snapshots.subscribe()
    }

    /// Whether [`continue_search`](Self::continue_search) would issue a request.
    pub fn can_continue(&self) -> bool {
        let inner = self.lock();
        inner.state.next_page.is_some()
            && inner.in_flight.is_none()
            && inner.params == inner.session_params
    }

    /// Start a new session for `params` and load its first page.
    ///
    /// An empty search term clears the results without a network call.
    pub async fn fresh_search(&self, params: QueryParameters) -> Settlement {
        let tag = {
            let mut inner = self.lock();
            inner.params = params.clone();
            inner.session_params = params;
            inner.session += 1;

            if !inner.session_params.has_term() {
                inner.in_flight = None;
                self.replace_state(&mut inner, AggregatedResultState::default());
                debug!(session = inner.session, "Empty search term, results cleared");
                return Settlement::Cleared;
            }

            let tag = inner.issue(RequestKind::Fresh, 1);
            // The page cursor belongs to the previous session.
            let state = AggregatedResultState {
                next_page: None,
                loading: true,
                error: String::new(),
                ..inner.state.clone()
            };
            self.replace_state(&mut inner, state);
            tag
        };

        debug!(
            request = tag.id,
            session = tag.session,
            term = %tag.params.search_term,
            "Fresh search"
        );
        self.run(tag).await
    }

    /// Load the next page of the current session and append it.
    ///
    /// No-op when there is no next page, a request is already in flight, or
    /// the parameters changed since the session started.
    pub async fn continue_search(&self) -> Settlement {
        let tag = {
            let mut inner = self.lock();
            let Some(page) = inner.state.next_page else {
                return Settlement::Skipped;
            };
            if inner.in_flight.is_some() || inner.params != inner.session_params {
                return Settlement::Skipped;
            }

            let tag = inner.issue(RequestKind::Continuation, page);
            let state = AggregatedResultState {
                loading: true,
                ..inner.state.clone()
            };
            self.replace_state(&mut inner, state);
            tag
        };

        debug!(
            request = tag.id,
            session = tag.session,
            page = tag.page,
            "Continuing search"
        );
        self.run(tag).await
    }

    async fn run(&self, tag: RequestTag) -> Settlement {
        let request = PageRequest::new(tag.params.clone(), tag.page);
        let result = self.client.fetch_page(&request).await;
        self.settle(&tag, result)
    }

    fn settle(&self, tag: &RequestTag, result: Result<SearchPage, SearchError>) -> Settlement {
        let mut inner = self.lock();

        let latest = inner.in_flight == Some(tag.id);
        if latest {
            inner.in_flight = None;
        }

        if !inner.is_current(tag) {
            debug!(
                request = tag.id,
                session = tag.session,
                term = %tag.params.search_term,
                "Discarding stale response"
            );
            if latest {
                let state = AggregatedResultState {
                    loading: false,
                    ..inner.state.clone()
                };
                self.replace_state(&mut inner, state);
            }
            return Settlement::Stale;
        }

        let previous = inner.state.clone();
        let (state, settlement) = match result {
            Ok(page) => {
                let movies = match tag.kind {
                    RequestKind::Fresh => page.items,
                    RequestKind::Continuation => {
                        let mut movies = previous.movies;
                        movies.extend(page.items);
                        movies
                    }
                };
                let next_page = page.has_more.then(|| tag.page + 1);
                debug!(
                    request = tag.id,
                    total = movies.len(),
                    next_page = ?next_page,
                    "Search results merged"
                );
                let state = AggregatedResultState {
                    movies,
                    next_page,
                    loading: false,
                    error: String::new(),
                };
                (state, Settlement::Applied)
            }
            Err(e) => {
                warn!(request = tag.id, page = tag.page, "Search failed: {}", e);
                // A failed continuation keeps its page so scrolling retries it.
                let next_page = match tag.kind {
                    RequestKind::Fresh => None,
                    RequestKind::Continuation => previous.next_page,
                };
                let state = AggregatedResultState {
                    movies: previous.movies,
                    next_page,
                    loading: false,
                    error: e.to_string(),
                };
                (state, Settlement::Failed)
            }
        };

        self.replace_state(&mut inner, state);
        settlement
    }
}
