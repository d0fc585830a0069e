use thiserror::Error;

/// Graph API error code for an invalid or expired access token.
pub const EXPIRED_TOKEN_CODE: i64 = 190;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("network error requesting {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("HTTP {status} {reason} from {url}")]
    HttpStatus {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("Instagram API error: {message}")]
    Api { message: String, code: Option<i64> },

    #[error("parse error for {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no posts found: {context}")]
    EmptyResult { context: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl FeedError {
    /// The text recorded in a fallback feed's `error` field.
    ///
    /// Graph API errors carry the upstream message verbatim; everything else
    /// uses the display form.
    #[must_use]
    pub fn feed_message(&self) -> String {
        match self {
            FeedError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// `true` when the Graph API rejected the access token as invalid or expired.
    #[must_use]
    pub fn is_expired_token(&self) -> bool {
        matches!(self, FeedError::Api { code: Some(code), .. } if *code == EXPIRED_TOKEN_CODE)
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        FeedError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
