//! Result state owned by the search controller and its view projection.

use serde::Serialize;

use crate::client::MovieSummary;

/// Merged results of the current search session.
///
/// Replaced as a whole on every update; consumers only ever see complete
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedResultState {
    /// Results so far, page 1 first, each page in server order.
    pub movies: Vec<MovieSummary>,
    /// Page a continuation would request; `None` when nothing is left.
    pub next_page: Option<u32>,
    pub loading: bool,
    /// Last failure message, empty when the last settled request succeeded.
    pub error: String,
}

/// What the view should show besides the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Results,
    /// No results and no error: "Nothing found".
    NothingFound,
    Error,
}

/// Read-only snapshot handed to the view layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSnapshot {
    pub movies: Vec<MovieSummary>,
    pub loading: bool,
    pub error: String,
}

impl ResultSnapshot {
    pub fn status(&self) -> DisplayStatus {
        if !self.error.is_empty() {
            DisplayStatus::Error
        } else if self.movies.is_empty() {
            DisplayStatus::NothingFound
        } else {
            DisplayStatus::Results
        }
    }
}

impl From<&AggregatedResultState> for ResultSnapshot {
    fn from(state: &AggregatedResultState) -> Self {
        Self {
            movies: state.movies.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }
}

/// How a controller entry point ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Nothing was requested (no next page, or a request already in flight).
    Skipped,
    /// Empty search term: results cleared without a network call.
    Cleared,
    /// Response merged into the visible state.
    Applied,
    /// Request failed; the error is visible and previous results are kept.
    Failed,
    /// Parameters changed while the request was in flight; response dropped.
    Stale,
}
