use thiserror::Error;

/// Every way a refresh can fail. The `Display` text is what the error
/// region shows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NewsError {
    #[error("Please select at least one topic")]
    Validation,

    #[error("Request timeout - please try again")]
    Timeout,

    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Network error - cannot reach server")]
    NetworkUnreachable,

    #[error("Request cancelled")]
    Cancelled,

    #[error("{}", unexpected_message(.0))]
    Unexpected(String),
}

fn unexpected_message(detail: &str) -> &str {
    if detail.trim().is_empty() {
        "Failed to fetch news. Please try again."
    } else {
        detail
    }
}

impl NewsError {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Timeout => "timeout",
            Self::Server { .. } => "server",
            Self::NetworkUnreachable => "network",
            Self::Cancelled => "cancelled",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> NewsError {
    if err.is_timeout() {
        return NewsError::Timeout;
    }
    if err.is_connect() || err.is_request() {
        return NewsError::NetworkUnreachable;
    }
    if err.is_decode() {
        return NewsError::Unexpected(format!("Invalid response from server: {}", err));
    }
    NewsError::Unexpected(err.to_string())
}
