use crate::error::{ApiError, Result};
use crate::model::{DocumentDetail, HealthStatus, SearchQuery, SearchResponse, StatsReport};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Operations the search backend offers to the client
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Heartbeat with per-subsystem flags
    async fn check_health(&self) -> Result<HealthStatus>;

    /// Aggregate document counts. Check [`StatsReport::is_success`] before
    /// trusting any field.
    async fn fetch_stats(&self) -> Result<StatsReport>;

    async fn submit_query(&self, query: &SearchQuery) -> Result<SearchResponse>;

    async fn fetch_document(&self, id: &str) -> Result<DocumentDetail>;

    /// Best effort batch lookup. Lookups run concurrently and the ones that
    /// fail are left out of the result.
    async fn fetch_documents(&self, ids: &[String]) -> Result<Vec<Value>> {
        if ids.is_empty() {
            return Err(ApiError::Argument(
                "fetch_documents requires at least one document id".to_string(),
            ));
        }

        let lookups = ids.iter().map(|id| self.fetch_document(id));
        let results = futures::future::join_all(lookups).await;

        let documents = results
            .into_iter()
            .zip(ids)
            .filter_map(|(result, id)| match result {
                Ok(DocumentDetail::Found { document, .. }) => Some(document),
                Ok(DocumentDetail::Raw(_)) => {
                    debug!(id = %id, "document lookup returned no document");
                    None
                }
                Err(e) => {
                    debug!(id = %id, error = %e, "dropping failed document lookup");
                    None
                }
            })
            .collect();

        Ok(documents)
    }
}
