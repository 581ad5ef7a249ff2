//! Thin client for the document search backend.
//!
//! [`ApiClient`] talks JSON over HTTP and hands back the normalized types of
//! [`model`]. The [`SearchService`] trait is the seam the controller is built
//! against.

mod client;
mod error;
pub mod model;
pub mod normalize;
mod service;
mod wire;

pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use error::{ApiError, RequestFailure, Result};
pub use model::{
    DocumentDetail, HealthStatus, HighlightField, Highlights, IndexStats, SearchMetadata,
    SearchMode, SearchQuery, SearchResponse, ServiceStatus, SourceDocument, StatsReport,
};
pub use service::SearchService;
pub use wire::QueryRequestBody;
