//! Normalized types consumed by the controller and the result renderer.
//!
//! Every field here is always present. Backend payloads are mapped into these
//! types by [`crate::normalize`], which supplies a fallback for anything that is
//! missing or malformed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::EnumIter;

/// Highlight field holding the backend's preferred preview fragment
pub const PREVIEW_FIELD: &str = "_searchable_preview";
/// Highlight field holding longer content snippets for the expanded view
pub const SNIPPETS_FIELD: &str = "content_snippets";

pub const DEFAULT_RESULT_COUNT: u32 = 10;

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchMode {
    Keyword,
    Vector,
    /// Keyword and vector retrieval combined
    #[default]
    Hybrid,
}

/// One user submission. Built by the controller and never mutated after it
/// has been sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub mode: SearchMode,
    pub result_count: u32,
    /// Ask the backend to generate an answer from the retrieved documents
    pub use_generated_answer: bool,
    pub doc_type_filter: Vec<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub department: Option<String>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: SearchMode::default(),
            result_count: DEFAULT_RESULT_COUNT,
            use_generated_answer: true,
            doc_type_filter: Vec::new(),
            date_from: None,
            date_to: None,
            department: None,
        }
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_result_count(mut self, result_count: u32) -> Self {
        self.result_count = result_count;
        self
    }

    pub fn with_generated_answer(mut self, enabled: bool) -> Self {
        self.use_generated_answer = enabled;
        self
    }

    pub fn with_doc_type_filter(mut self, doc_types: Vec<String>) -> Self {
        self.doc_type_filter = doc_types;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightField {
    pub field: String,
    pub fragments: Vec<String>,
}

/// Highlight fragments per field, in the order the backend sent them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlights(Vec<HighlightField>);

impl Highlights {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HighlightField> {
        self.0.iter()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|h| h.field == field)
            .map(|h| h.fragments.as_slice())
    }

    /// First fragment of `field`, if the field exists and has any
    pub fn first_fragment(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(|fragments| fragments.first())
            .map(String::as_str)
    }

    /// First field (in backend order) that has at least one fragment and is
    /// not listed in `excluded`
    pub fn first_non_empty(&self, excluded: &[&str]) -> Option<&HighlightField> {
        self.0
            .iter()
            .find(|h| !h.fragments.is_empty() && !excluded.contains(&h.field.as_str()))
    }
}

impl FromIterator<HighlightField> for Highlights {
    fn from_iter<T: IntoIterator<Item = HighlightField>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single hit, normalized from the backend's document record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocument {
    pub id: String,
    pub number: String,
    pub doc_type: String,
    pub file_name: String,
    pub file_url: String,
    pub title: String,
    pub summary: String,
    /// Text shown when nothing better is available: preview highlight, first
    /// highlight, or the summary
    pub searchable_content: String,
    pub date: String,
    pub department: String,
    pub applicant: String,
    pub product_codes: Vec<String>,
    pub keywords: Vec<String>,
    pub score: f64,
    pub highlights: Highlights,
    /// Name of the index the hit came from
    pub source_index: String,

    // Type specific content, empty unless the index provides it
    pub complaint_description: String,
    pub change_description: String,
    pub failure_mode: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchMetadata {
    pub mysql_hits: u64,
    pub product_ids_found: Vec<String>,
    pub keywords_used: Vec<String>,
    pub indices_searched: String,
    pub index_distribution: Vec<(String, u64)>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub mode: String,
    pub total_hits: u64,
    pub processing_time_ms: u64,
    pub answer: Option<String>,
    pub sources: Vec<SourceDocument>,
    pub metadata: SearchMetadata,
}

impl SearchResponse {
    /// Whether the "no results" view applies
    pub fn has_no_results(&self) -> bool {
        self.sources.is_empty()
    }
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    Warning,
    #[default]
    Error,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthStatus {
    pub elasticsearch_up: bool,
    pub mysql_up: bool,
    pub openai_up: bool,
    pub status: ServiceStatus,
    pub indices: Vec<String>,
    pub timestamp: Option<String>,
}

impl HealthStatus {
    /// What the UI shows when the backend cannot be reached at all
    pub fn unreachable() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexStats {
    pub total_documents: u64,
    pub index_counts: Vec<(String, u64)>,
    pub timestamp: Option<String>,
}

/// `/stats` is only normalized when the backend flags success, otherwise the
/// payload is handed over untouched and callers must not trust its fields.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsReport {
    Normalized(IndexStats),
    Raw(Value),
}

impl StatsReport {
    pub fn is_success(&self) -> bool {
        matches!(self, StatsReport::Normalized(_))
    }

    pub fn stats(&self) -> Option<&IndexStats> {
        match self {
            StatsReport::Normalized(stats) => Some(stats),
            StatsReport::Raw(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentDetail {
    Found {
        document: Value,
        related_documents: Vec<String>,
    },
    /// Anything that is not a successful lookup, passed through as is
    Raw(Value),
}

impl DocumentDetail {
    pub fn document(&self) -> Option<&Value> {
        match self {
            DocumentDetail::Found { document, .. } => Some(document),
            DocumentDetail::Raw(_) => None,
        }
    }

    pub fn related_documents(&self) -> &[String] {
        match self {
            DocumentDetail::Found {
                related_documents, ..
            } => related_documents,
            DocumentDetail::Raw(_) => &[],
        }
    }
}
