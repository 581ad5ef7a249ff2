//! Client side of a document search: what the user typed, what came back and
//! what the backend looks like right now.

mod controller;
pub mod error;
pub mod history;
mod poll;
pub mod state;

pub use controller::{Controller, ControllerEvent, LAST_SEARCH_TIME_FORMAT, Notifier};
pub use error::{HistoryError, ValidationError, user_message};
pub use history::{HISTORY_CAPACITY, HistoryStore, SearchHistory};
pub use poll::{DEFAULT_HEALTH_INTERVAL, DEFAULT_STATS_INTERVAL, PollIntervals};
pub use state::{
    ControllerState, DocumentLookup, Lookup, RESULT_COUNT_CHOICES, RelatedLookup, SearchResults,
    SearchState, loading_message,
};
