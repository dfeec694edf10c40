//! Retrieval abstraction for published tables

use anyhow::Result;
use async_trait::async_trait;

/// Fetches the raw text a table is published as.
///
/// Implementations own their retry policy and only return an error once it
/// is exhausted.
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn fetch_text(&self, source_id: &str) -> Result<String>;
}
