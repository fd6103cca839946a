//! Remote title search.
//!
//! This module provides a `SearchClient` trait for fetching one page of
//! results per call, and an HTTP implementation for the title-search API.

mod http;
mod types;

pub use http::HttpSearchClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when fetching a page of results.
///
/// `Display` is the message shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// No stored credentials to authenticate with.
    #[error("Not signed in")]
    NotSignedIn,

    /// Credential storage could not be read.
    #[error("Could not read stored credentials: {0}")]
    Credentials(String),

    /// The request was rejected before being sent.
    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Could not reach the search API.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// API answered with a non-success status.
    #[error("Request failed with status code {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Any other transport failure.
    #[error("Network error: {0}")]
    Transport(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Fetches a single page of search results.
///
/// One call is one query attempt; implementations never retry.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage, SearchError>;
}
