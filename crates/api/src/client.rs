use crate::error::{ApiError, RequestFailure, Result};
use crate::model::{DocumentDetail, HealthStatus, SearchQuery, SearchResponse, StatsReport};
use crate::normalize;
use crate::service::SearchService;
use crate::wire::QueryRequestBody;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url, header};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the search backend. Cheap to clone, the connection pool is
/// shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|e| ApiError::Argument(format!("invalid base url `{base_url}`: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::Argument(format!(
                "base url `{base_url}` cannot carry a path"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Argument(format!("cannot build HTTP client: {e}")))?;

        info!(base_url = %parsed, timeout_secs = timeout.as_secs(), "API client initialized");

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    /// `GET /`, returns the service banner as is
    pub async fn ping_root(&self) -> Result<Value> {
        self.get_json(&[""]).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Argument(format!("base url `{}` cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, segments: &[&str]) -> Result<Value> {
        let url = self.endpoint(segments)?;
        let request = self.http.get(url);
        self.send(request, &Method::GET, &display_path(segments)).await
    }

    async fn post_json<B: serde::Serialize + Sync>(&self, segments: &[&str], body: &B) -> Result<Value> {
        let url = self.endpoint(segments)?;
        let request = self.http.post(url).json(body);
        self.send(request, &Method::POST, &display_path(segments)).await
    }

    async fn send(&self, request: RequestBuilder, method: &Method, path: &str) -> Result<Value> {
        debug!(%method, path, "sending request");

        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, method.as_str(), path))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let failure = RequestFailure {
                method: method.to_string(),
                path: path.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                detail: error_detail(&body),
            };
            warn!(%method, path, status = failure.status, "backend returned an error status");
            return Err(ApiError::Request(failure));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::from_transport(e, method.as_str(), path)
            } else {
                ApiError::Decode {
                    method: method.to_string(),
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }
}

fn display_path(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}

/// `detail` of a JSON error body (structured details are re-encoded), or the
/// raw text when the body is not JSON
fn error_detail(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => match json.get("detail") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()).filter(|s| !s.is_empty()),
            Some(other) => Some(other.to_string()),
        },
        Err(_) => {
            let text = body.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
    }
}

#[async_trait]
impl SearchService for ApiClient {
    async fn check_health(&self) -> Result<HealthStatus> {
        let raw = self.get_json(&["health"]).await?;
        let health = normalize::normalize_health(&raw);
        debug!(status = %health.status, "health checked");
        Ok(health)
    }

    async fn fetch_stats(&self) -> Result<StatsReport> {
        let raw = self.get_json(&["stats"]).await?;
        Ok(normalize::normalize_stats(raw))
    }

    async fn submit_query(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let body = QueryRequestBody::from(query);
        info!(query = body.query, mode = %body.mode, top_k = body.top_k, "submitting search");

        let raw = self.post_json(&["query"], &body).await?;
        let response = normalize::map_query_response(&raw, query);

        info!(
            total_hits = response.total_hits,
            returned = response.sources.len(),
            time_ms = response.processing_time_ms,
            "search answered"
        );
        Ok(response)
    }

    async fn fetch_document(&self, id: &str) -> Result<DocumentDetail> {
        if id.trim().is_empty() {
            return Err(ApiError::Argument(
                "fetch_document requires a document id".to_string(),
            ));
        }

        let raw = self.get_json(&["document", id]).await?;
        Ok(normalize::normalize_document(raw))
    }
}
