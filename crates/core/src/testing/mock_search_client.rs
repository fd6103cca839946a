//! Mock search client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::client::{PageRequest, SearchClient, SearchError, SearchPage};

/// Mock implementation of the SearchClient trait.
///
/// Provides controllable behavior for testing:
/// - Return configured pages per (term, page)
/// - Track requests for assertions
/// - Simulate failures and slow responses
///
/// Unconfigured pages come back empty, like an upstream "not found".
#[derive(Debug, Default)]
pub struct MockSearchClient {
    /// Configured pages by (search term, page number).
    pages: Arc<RwLock<HashMap<(String, u32), SearchPage>>>,
    /// Recorded requests, in call order.
    requests: Arc<RwLock<Vec<PageRequest>>>,
    /// If set, the next request will fail with this error.
    next_error: Arc<RwLock<Option<SearchError>>>,
    /// Errors returned for every request with a given term.
    term_errors: Arc<RwLock<HashMap<String, SearchError>>>,
    /// Latency applied to every request.
    delay: Arc<RwLock<Option<Duration>>>,
    /// Latency applied to requests for a given term (overrides `delay`).
    term_delays: Arc<RwLock<HashMap<String, Duration>>>,
}

impl MockSearchClient {
    /// Create a new mock returning empty pages.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Configure the page returned for `term` at `page`.
    pub async fn set_page(&self, term: &str, page: u32, result: SearchPage) {
        self.pages
            .write()
            .await
            .insert((term.to_string(), page), result);
    }

    /// Make the next request fail.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every request for `term` fail.
    pub async fn set_error_for(&self, term: &str, error: SearchError) {
        self.term_errors
            .write()
            .await
            .insert(term.to_string(), error);
    }

    /// Delay every response.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Delay responses for `term`.
    pub async fn set_delay_for(&self, term: &str, delay: Duration) {
        self.term_delays
            .write()
            .await
            .insert(term.to_string(), delay);
    }

    // =========================================================================
    // Assertions
    // =========================================================================

    /// All requests made so far.
    pub async fn requests(&self) -> Vec<PageRequest> {
        self.requests.read().await.clone()
    }

    /// Number of requests made so far.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Search terms requested, in order.
    pub async fn requested_terms(&self) -> Vec<String> {
        self.requests
            .read()
            .await
            .iter()
            .map(|r| r.params.search_term.clone())
            .collect()
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage, SearchError> {
        self.requests.write().await.push(request.clone());

        let term = &request.params.search_term;
        let delay = match self.term_delays.read().await.get(term) {
            Some(delay) => Some(*delay),
            None => *self.delay.read().await,
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        if let Some(error) = self.term_errors.read().await.get(term) {
            return Err(error.clone());
        }

        Ok(self
            .pages
            .read()
            .await
            .get(&(term.clone(), request.page))
            .cloned()
            .unwrap_or_default())
    }
}
