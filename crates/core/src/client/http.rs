//! HTTP client for the title-search API.
//!
//! Every request authenticates with HTTP Basic credentials read from the
//! injected provider at call time.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::ApiConfig;
use crate::credentials::CredentialProvider;

use super::types::{parse_search_body, PageRequest, SearchPage};
use super::{SearchClient, SearchError};

/// Title-search API client.
pub struct HttpSearchClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpSearchClient {
    /// Create a new client.
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/api/search", self.base_url)
    }
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<SearchPage, SearchError> {
        request.validate()?;

        let credentials = self
            .credentials
            .credentials()
            .await
            .map_err(|e| SearchError::Credentials(e.to_string()))?
            .ok_or(SearchError::NotSignedIn)?;

        let params = &request.params;
        debug!(
            term = %params.search_term,
            year = params.year_param(),
            title_type = %params.title_type,
            page = request.page,
            "Searching titles"
        );

        let page = request.page.to_string();
        let response = self
            .client
            .get(self.search_url())
            .query(&[
                ("t", params.search_term.as_str()),
                ("y", params.year_param()),
                ("type", params.title_type.as_str()),
                ("page", page.as_str()),
            ])
            .basic_auth(&credentials.username, Some(&credentials.password))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else if e.is_connect() {
                    SearchError::ConnectionFailed(e.to_string())
                } else {
                    SearchError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::HttpStatus {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout
            } else {
                SearchError::Transport(e.to_string())
            }
        })?;

        let page = parse_search_body(&body, request.page)?;
        debug!(
            items = page.items.len(),
            has_more = page.has_more,
            "Search page received"
        );
        Ok(page)
    }
}
