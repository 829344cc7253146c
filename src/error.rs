use std::time::Duration;

use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    /// User input rejected before any request was issued.
    #[error("{0}")]
    Validation(String),
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        source: serde_json::Error,
    },
    /// Non-2xx reply; `detail` is the service's message or the status text.
    #[error("{detail}")]
    Status { status: u16, detail: String },
    /// The service answered `success: false`.
    #[error("{}", .0.as_deref().unwrap_or("the service rejected the request"))]
    Rejected(Option<String>),
    #[error("invalid configuration:\n  - {}", .0.join("\n  - "))]
    Config(Vec<String>),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        AppError::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_without_message_uses_generic_text() {
        assert_eq!(
            AppError::Rejected(None).to_string(),
            "the service rejected the request"
        );
        assert_eq!(AppError::Rejected(Some("quota".into())).to_string(), "quota");
    }

    #[test]
    fn config_error_lists_every_issue() {
        let err = AppError::Config(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "invalid configuration:\n  - a\n  - b");
    }
}
