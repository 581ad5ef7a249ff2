use crate::error::HistoryError;
use config::constants::HISTORY_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const HISTORY_CAPACITY: usize = 10;

/// Past queries, most recent first, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory(Vec<String>);

impl SearchHistory {
    /// Builds a history from stored entries, applying the same rules as
    /// [`SearchHistory::push`]
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut history = Self::default();
        for entry in entries.iter().rev() {
            history.push(entry);
        }
        history
    }

    /// Moves `query` to the front. Blank queries are ignored. Returns whether
    /// the history changed.
    pub fn push(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        if self.0.first().is_some_and(|first| first == query) {
            return false;
        }

        self.0.retain(|entry| entry != query);
        self.0.insert(0, query.to_string());
        self.0.truncate(HISTORY_CAPACITY);
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// JSON file holding the search history
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `search-history.json` in the platform data directory
    pub fn in_data_dir() -> Self {
        Self::new(config::data_dir().join(HISTORY_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty history
    pub fn try_load(&self) -> Result<SearchHistory, HistoryError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SearchHistory::default()),
            Err(source) => {
                return Err(HistoryError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let entries: Vec<String> =
            serde_json::from_str(&text).map_err(|source| HistoryError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(SearchHistory::from_entries(entries))
    }

    /// Like [`HistoryStore::try_load`], but unreadable history is logged and
    /// treated as empty
    pub fn load(&self) -> SearchHistory {
        match self.try_load() {
            Ok(history) => {
                debug!(path = %self.path.display(), entries = history.len(), "search history loaded");
                history
            }
            Err(e) => {
                warn!("Ignoring search history: {e}");
                SearchHistory::default()
            }
        }
    }

    pub fn save(&self, history: &SearchHistory) -> Result<(), HistoryError> {
        let io_error = |source| HistoryError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let text = serde_json::to_string(history).map_err(|source| HistoryError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, text).map_err(io_error)
    }
}
