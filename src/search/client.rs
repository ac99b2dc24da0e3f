//! Search client trait and the Stack Exchange implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::{Error, Result};

use super::types::{ItemsEnvelope, SearchAnswer, SearchComment, SearchQuestion};

/// Maximum questions returned by a search, by relevance.
const MAX_SEARCH_RESULTS: usize = 3;

/// Narrow contract over the Q&A search API.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Search for questions matching a free-text query, capped to the top
    /// 3 by relevance. Only questions with at least one answer are returned.
    async fn search(&self, query: &str) -> Result<Vec<SearchQuestion>>;

    /// Fetch a question's answers with bodies, sorted by votes descending.
    async fn fetch_answers(&self, question_id: u64) -> Result<Vec<SearchAnswer>>;

    /// Fetch an answer's comments with bodies, in creation order.
    async fn fetch_comments(&self, answer_id: u64) -> Result<Vec<SearchComment>>;
}

/// Configuration for the Stack Exchange client.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// API base URL
    pub base_url: String,
    /// Stack Exchange site parameter
    pub site: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.stackexchange.com/2.3".to_string(),
            site: "stackoverflow".to_string(),
            timeout_secs: 30,
        }
    }
}

impl SearchConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Stack Exchange API v2.3 client.
pub struct StackExchangeClient {
    config: SearchConfig,
    http: Client,
}

impl StackExchangeClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, http })
    }

    async fn get_items<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.config.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| Error::search(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::search(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::search(format!("{}: {}", status, body)));
        }

        let envelope: ItemsEnvelope<T> = serde_json::from_str(&body)
            .map_err(|e| Error::search(format!("Failed to parse response: {}", e)))?;

        Ok(envelope.items)
    }
}

#[async_trait]
impl SearchClient for StackExchangeClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchQuestion>> {
        let mut items: Vec<SearchQuestion> = self
            .get_items(
                "search/advanced",
                &[
                    ("order", "desc"),
                    ("sort", "relevance"),
                    ("q", query),
                    ("site", &self.config.site),
                    ("answers", "1"),
                ],
            )
            .await?;

        items.truncate(MAX_SEARCH_RESULTS);
        Ok(items)
    }

    async fn fetch_answers(&self, question_id: u64) -> Result<Vec<SearchAnswer>> {
        self.get_items(
            &format!("questions/{}/answers", question_id),
            &[
                ("order", "desc"),
                ("sort", "votes"),
                ("site", &self.config.site),
                ("filter", "withbody"),
            ],
        )
        .await
    }

    async fn fetch_comments(&self, answer_id: u64) -> Result<Vec<SearchComment>> {
        self.get_items(
            &format!("answers/{}/comments", answer_id),
            &[
                ("order", "asc"),
                ("sort", "creation"),
                ("site", &self.config.site),
                ("filter", "withbody"),
            ],
        )
        .await
    }
}
