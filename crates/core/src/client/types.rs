//! Types for search API requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::query::QueryParameters;

use super::SearchError;

/// Number of results the search API returns per page.
pub const PAGE_SIZE: u64 = 10;

/// One search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSummary {
    /// Stable external identifier (IMDb ID).
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster_url: String,
}

/// One page of results, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub items: Vec<MovieSummary>,
    pub has_more: bool,
}

impl SearchPage {
    /// The "nothing found" page.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A request for one page under a given parameter snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub params: QueryParameters,
    /// 1-based page number.
    pub page: u32,
}

impl PageRequest {
    pub fn new(params: QueryParameters, page: u32) -> Self {
        Self { params, page }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.params.has_term() {
            return Err(SearchError::InvalidRequest(
                "search term is empty".to_string(),
            ));
        }
        if self.page == 0 {
            return Err(SearchError::InvalidRequest(
                "pages are numbered from 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    #[serde(rename = "Search", default)]
    search: Option<Vec<MovieSummary>>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<Value>,
    #[serde(rename = "nextPage", default)]
    next_page: Option<Value>,
}

/// Parse a response body for the given page.
///
/// A body without a `Search` array is an empty page, not an error.
pub fn parse_search_body(body: &str, page: u32) -> Result<SearchPage, SearchError> {
    let parsed: SearchResponseBody = serde_json::from_str(body)
        .map_err(|e| SearchError::ParseError(format!("Invalid search response: {}", e)))?;

    let Some(items) = parsed.search else {
        return Ok(SearchPage::empty());
    };

    let has_more = match (&parsed.next_page, &parsed.total_results) {
        (Some(next), _) => is_truthy(next),
        (None, Some(total)) => {
            as_count(total).is_some_and(|total| u64::from(page) * PAGE_SIZE < total)
        }
        (None, None) => false,
    };

    Ok(SearchPage { items, has_more })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        _ => true,
    }
}

// The API sends counts as strings ("60"), but accept plain numbers too.
fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
