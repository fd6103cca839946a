//! Testing utilities and mock implementations.
//!
//! This module provides a mock search client and fixtures so the controller,
//! triggers and session can be tested without a search API.
//!
//! # Example
//!
//! ```rust,ignore
//! use movielookup_core::testing::{fixtures, MockSearchClient};
//!
//! let client = MockSearchClient::new();
//! client.set_page("batman", 1, fixtures::page("bat", 10, true)).await;
//! client.set_delay_for("batman", Duration::from_millis(200)).await;
//! ```

mod mock_search_client;

pub use mock_search_client::MockSearchClient;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::client::{MovieSummary, SearchPage};

    /// Create a search result with reasonable defaults.
    pub fn movie(id: &str, title: &str) -> MovieSummary {
        MovieSummary {
            id: id.to_string(),
            title: title.to_string(),
            year: "1999".to_string(),
            poster_url: format!("https://img.example.com/{}.jpg", id),
        }
    }

    /// Create a page of `count` results with ids `{prefix}-1..={prefix}-{count}`.
    pub fn page(prefix: &str, count: usize, has_more: bool) -> SearchPage {
        SearchPage {
            items: (1..=count)
                .map(|i| movie(&format!("{}-{}", prefix, i), &format!("{} {}", prefix, i)))
                .collect(),
            has_more,
        }
    }
}
