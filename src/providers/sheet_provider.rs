use super::util::{cache_busted, with_retry};
use crate::core::config::RetrievalConfig;
use crate::core::source::TableSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use tracing::debug;

/// Reads tables published as CSV over HTTP, such as spreadsheet exports.
pub struct SheetProvider {
    client: reqwest::Client,
    retrieval: RetrievalConfig,
}

impl SheetProvider {
    pub fn new(retrieval: RetrievalConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("editquote/0.1")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(SheetProvider { client, retrieval })
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        let url = cache_busted(url, chrono::Utc::now().timestamp_millis());
        debug!("Requesting table from {}", url);

        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl TableSource for SheetProvider {
    async fn fetch_text(&self, source_id: &str) -> Result<String> {
        with_retry(
            move || self.fetch_once(source_id),
            self.retrieval.retries,
            self.retrieval.delay_ms,
        )
        .await
        .with_context(|| format!("Failed to fetch table: {source_id}"))
    }
}
