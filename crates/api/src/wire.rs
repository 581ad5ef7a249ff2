use crate::model::{SearchMode, SearchQuery};
use serde::Serialize;

/// Body of `POST /query`. Unset filters are sent as `null`, never omitted.
#[derive(Debug, Serialize)]
pub struct QueryRequestBody<'a> {
    pub query: &'a str,
    pub mode: SearchMode,
    pub top_k: u32,
    pub use_gpt: bool,
    pub doc_type_filter: Option<&'a [String]>,
    pub date_from: Option<&'a str>,
    pub date_to: Option<&'a str>,
    pub department: Option<&'a str>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl<'a> From<&'a SearchQuery> for QueryRequestBody<'a> {
    fn from(query: &'a SearchQuery) -> Self {
        Self {
            query: query.text.trim(),
            mode: query.mode,
            top_k: query.result_count,
            use_gpt: query.use_generated_answer,
            doc_type_filter: (!query.doc_type_filter.is_empty())
                .then_some(query.doc_type_filter.as_slice()),
            date_from: non_blank(&query.date_from),
            date_to: non_blank(&query.date_to),
            department: non_blank(&query.department),
        }
    }
}
