use api::ApiError;
use std::path::PathBuf;
use thiserror::Error;

pub const EMPTY_QUERY_MESSAGE: &str = "請輸入搜尋內容";
pub const UNSUCCESSFUL_MESSAGE: &str = "搜尋請求未成功";
pub const NETWORK_MESSAGE: &str = "無法連接到搜尋服務，請檢查網路連接或確認服務是否運行";
pub const TIMEOUT_MESSAGE: &str = "搜尋請求超時，請稍後再試或減少結果數量";
pub const UNAVAILABLE_MESSAGE: &str = "搜尋服務暫時不可用，請稍後再試";
pub const INTERNAL_ERROR_MESSAGE: &str = "服務器內部錯誤，請檢查後端日誌";
pub const GENERIC_MESSAGE: &str = "搜尋時發生錯誤";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("請輸入搜尋內容")]
    EmptyQuery,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("cannot access search history at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("search history at {} is not a list of strings: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// What the user is told when a search fails
pub fn user_message(error: &ApiError) -> String {
    match error {
        ApiError::Network { .. } => NETWORK_MESSAGE.to_string(),
        ApiError::Timeout { .. } => TIMEOUT_MESSAGE.to_string(),
        ApiError::Request(failure) if failure.status == 503 => UNAVAILABLE_MESSAGE.to_string(),
        ApiError::Request(failure) if failure.status == 500 => INTERNAL_ERROR_MESSAGE.to_string(),
        other => {
            let message = other.to_string();
            if message.trim().is_empty() {
                GENERIC_MESSAGE.to_string()
            } else {
                message
            }
        }
    }
}
