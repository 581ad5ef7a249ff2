use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got a response
    #[error("NetworkError: {method} {path}: {message}")]
    Network {
        method: String,
        path: String,
        message: String,
    },

    #[error("{method} {path} timeout")]
    Timeout { method: String, path: String },

    /// The backend answered with a non-success status
    #[error("{0}")]
    Request(RequestFailure),

    /// A success status whose body is not JSON
    #[error("{method} {path} returned an unreadable body: {message}")]
    Decode {
        method: String,
        path: String,
        message: String,
    },

    #[error("{0}")]
    Argument(String),
}

impl ApiError {
    /// HTTP status of a failed request, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request(failure) => Some(failure.status),
            _ => None,
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error, method: &str, path: &str) -> Self {
        if err.is_timeout() {
            ApiError::Timeout {
                method: method.to_string(),
                path: path.to_string(),
            }
        } else {
            ApiError::Network {
                method: method.to_string(),
                path: path.to_string(),
                message: error_chain(&err),
            }
        }
    }
}

/// A non-2xx answer, with the server supplied `detail` when there is one
#[derive(Debug, Clone, PartialEq)]
pub struct RequestFailure {
    pub method: String,
    pub path: String,
    pub status: u16,
    pub reason: String,
    pub detail: Option<String>,
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} 失敗 ({}) {}",
            self.method, self.path, self.status, self.reason
        )?;
        if let Some(detail) = &self.detail {
            write!(f, "\n{detail}")?;
        }
        Ok(())
    }
}

// reqwest hides the interesting part (connection refused, dns...) in the source
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failure_message_with_detail() {
        let failure = RequestFailure {
            method: "POST".into(),
            path: "/query".into(),
            status: 500,
            reason: "Internal Server Error".into(),
            detail: Some("index missing".into()),
        };
        let err = ApiError::Request(failure);
        assert_eq!(
            err.to_string(),
            "POST /query 失敗 (500) Internal Server Error\nindex missing"
        );
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_request_failure_message_without_detail() {
        let failure = RequestFailure {
            method: "GET".into(),
            path: "/health".into(),
            status: 503,
            reason: "Service Unavailable".into(),
            detail: None,
        };
        assert_eq!(failure.to_string(), "GET /health 失敗 (503) Service Unavailable");
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = ApiError::Network {
            method: "GET".into(),
            path: "/stats".into(),
            message: "connection refused".into(),
        };
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("NetworkError"));
    }
}
