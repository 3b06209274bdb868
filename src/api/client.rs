//! Readwise v2 REST client.
//!
//! Every list is fetched with a single GET. `page_size` caps how many items
//! come back; `next` links are logged but never followed.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use crate::api::{ApiError, BookRecord, HighlightRecord, HighlightSource, Page};
use crate::core::config::{DEFAULT_PAGE_SIZE, DEFAULT_READWISE_BASE_URL, ResolvedConfig};

/// HTTP client for the Readwise API.
pub struct ReadwiseClient {
    token: String,
    base_url: String,
    page_size: u32,
    client: reqwest::Client,
}

impl ReadwiseClient {
    /// Creates a client with default page size and no request timeout.
    ///
    /// # Arguments
    /// * `token` - Readwise access token
    /// * `base_url` - Optional custom base URL (defaults to Readwise's v2 API)
    pub fn new(token: String, base_url: Option<String>) -> Self {
        Self {
            token,
            base_url: trim_base_url(
                base_url.unwrap_or_else(|| DEFAULT_READWISE_BASE_URL.to_string()),
            ),
            page_size: DEFAULT_PAGE_SIZE,
            client: reqwest::Client::new(),
        }
    }

    /// Builds a client from resolved configuration, applying the request timeout.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            token: config.token.clone(),
            base_url: trim_base_url(config.base_url.clone()),
            page_size: config.page_size,
            client,
        })
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `{base_url}/{endpoint}/` with the given query and decodes one page.
    async fn get_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Page<T>, ApiError> {
        let url = format!("{}/{}/", self.base_url, endpoint);
        info!("Readwise request: GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.token))
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("Readwise response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Readwise API error: {} - {}", status, err_body);
            return Err(ApiError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let page: Page<T> =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;

        if let Some(next) = &page.next {
            debug!("Ignoring further results at {} (count={:?})", next, page.count);
        }
        Ok(page)
    }
}

/// Strips trailing slashes so endpoint paths can be appended uniformly.
fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[async_trait]
impl HighlightSource for ReadwiseClient {
    fn name(&self) -> &str {
        "readwise"
    }

    async fn fetch_books(&self) -> Result<Vec<BookRecord>, ApiError> {
        let page: Page<BookRecord> = self
            .get_page("books", &[("page_size", self.page_size.to_string())])
            .await?;
        info!("Fetched {} books", page.results.len());
        Ok(page.results)
    }

    async fn fetch_highlights(&self, book_id: i64) -> Result<Vec<HighlightRecord>, ApiError> {
        let page: Page<HighlightRecord> = self
            .get_page(
                "highlights",
                &[
                    ("book_id", book_id.to_string()),
                    ("page_size", self.page_size.to_string()),
                ],
            )
            .await?;
        info!("Fetched {} highlights for book {}", page.results.len(), book_id);
        Ok(page.results)
    }
}
