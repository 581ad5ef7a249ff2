use crate::history::SearchHistory;
use api::{DocumentDetail, HealthStatus, SearchMode, SearchQuery, SearchResponse, StatsReport};
use serde_json::Value;

pub const RESULT_COUNT_CHOICES: [u32; 5] = [5, 10, 15, 20, 30];

/// Lifecycle of the current search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    Submitting {
        seq: u64,
        mode: SearchMode,
    },
    Succeeded {
        seq: u64,
    },
    Failed,
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Submitting { .. })
    }
}

/// A successful response together with the query that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    /// Sequence number of the submission, changes with every new result set
    pub seq: u64,
    pub query: SearchQuery,
    pub response: SearchResponse,
}

/// On demand lookup of one document or of a set of related documents
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<K, T> {
    Loading(K),
    Loaded(K, T),
    Failed(K, String),
}

impl<K, T> Lookup<K, T> {
    pub fn key(&self) -> &K {
        match self {
            Lookup::Loading(key) | Lookup::Loaded(key, _) | Lookup::Failed(key, _) => key,
        }
    }
}

pub type DocumentLookup = Lookup<String, DocumentDetail>;
pub type RelatedLookup = Lookup<Vec<String>, Vec<Value>>;

/// Everything the front end draws. Written only by the controller.
#[derive(Debug, Clone)]
pub struct ControllerState {
    pub query_text: String,
    pub mode: SearchMode,
    pub result_count: u32,
    pub use_generated_answer: bool,
    pub doc_type_filter: Vec<String>,

    pub search: SearchState,
    pub results: Option<SearchResults>,
    pub error: Option<String>,
    /// Local time of the last submission, `YYYY/MM/DD HH:MM:SS`
    pub last_search_time: Option<String>,
    pub history: SearchHistory,

    /// `None` until the first health check has finished
    pub health: Option<HealthStatus>,
    pub stats: Option<StatsReport>,

    pub document: Option<DocumentLookup>,
    pub related: Option<RelatedLookup>,
}

impl ControllerState {
    pub fn new(history: SearchHistory) -> Self {
        let defaults = SearchQuery::new("");
        Self {
            query_text: String::new(),
            mode: defaults.mode,
            result_count: defaults.result_count,
            use_generated_answer: defaults.use_generated_answer,
            doc_type_filter: defaults.doc_type_filter,
            search: SearchState::Idle,
            results: None,
            error: None,
            last_search_time: None,
            history,
            health: None,
            stats: None,
            document: None,
            related: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.search.is_loading()
    }

    /// The query a submission of `text` would send
    pub fn build_query(&self, text: &str) -> SearchQuery {
        SearchQuery::new(text.trim())
            .with_mode(self.mode)
            .with_result_count(self.result_count)
            .with_generated_answer(self.use_generated_answer)
            .with_doc_type_filter(self.doc_type_filter.clone())
    }
}

/// Status line shown while a search of `mode` is running
pub fn loading_message(mode: SearchMode) -> String {
    let name = match mode {
        SearchMode::Hybrid => "混合",
        SearchMode::Vector => "語義",
        SearchMode::Keyword => "關鍵字",
    };
    format!("正在執行{name}搜尋...")
}
