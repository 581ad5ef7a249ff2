//! Result set level presentation.

use crate::answer::{AnswerLine, parse_answer};
use crate::card::ResultCard;
use api::SearchResponse;

pub const NO_RESULTS_TITLE: &str = "未找到相關結果";
pub const NO_RESULTS_HINT: &str = "嘗試以下建議：";
pub const NO_RESULTS_HISTORY_HINT: &str = "或試試最近的搜尋：";

pub const NO_RESULTS_SUGGESTIONS: [&str; 5] = [
    "檢查搜尋關鍵字是否正確",
    "嘗試更簡短或更具體的關鍵字",
    "使用不同的搜尋模式（關鍵字/語義/混合）",
    "檢查是否有相關的產品代碼或文件編號",
    "嘗試移除文件類型過濾",
];

pub const MAX_RECENT_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsHeader {
    pub count: String,
    pub mode: String,
    pub elapsed: String,
}

impl ResultsHeader {
    pub fn new(response: &SearchResponse) -> Self {
        Self {
            count: format!("找到 {} 筆資料", response.total_hits),
            mode: format!("模式: {}", response.mode),
            elapsed: format!("耗時: {}ms", response.processing_time_ms),
        }
    }
}

/// Most recent history entries offered when a search found nothing
pub fn recent_suggestions(history: &[String]) -> &[String] {
    &history[..history.len().min(MAX_RECENT_SUGGESTIONS)]
}

/// A response prepared for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub header: ResultsHeader,
    pub answer: Vec<AnswerLine>,
    pub cards: Vec<ResultCard>,
}

impl ResultsView {
    /// `show_answer` mirrors whether a generated answer was requested
    pub fn new(response: &SearchResponse, show_answer: bool) -> Self {
        let answer = match &response.answer {
            Some(answer) if show_answer => parse_answer(answer),
            _ => Vec::new(),
        };

        Self {
            header: ResultsHeader::new(response),
            answer,
            cards: response.sources.iter().map(ResultCard::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
