//! Single-attempt HTTP fetcher shared by the Graph API and profile-scrape paths.

mod download;
mod url;

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::FeedError;

pub use url::{profile_url, redact_url};

/// Desktop browser identity used for the public profile page, which serves a
/// login wall to obvious bots.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Status and body of a completed request, before any status policy is applied.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP client with a fixed timeout and `User-Agent`.
///
/// Every request is attempted exactly once. A response other than 200 is an
/// error; a request that outlives the timeout is cancelled and reported as
/// [`FeedError::Timeout`].
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    timeout_secs: u64,
}

impl FeedClient {
    /// Creates a `FeedClient` with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Client`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// Creates a client that presents itself as [`BROWSER_USER_AGENT`].
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Client`] if the client cannot be constructed.
    pub fn browser(timeout_secs: u64) -> Result<Self, FeedError> {
        Self::new(timeout_secs, BROWSER_USER_AGENT)
    }

    /// Fetches `url` and returns the body as text.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Timeout`]: the request exceeded the client timeout.
    /// - [`FeedError::Network`]: connection, TLS, or body read failure.
    /// - [`FeedError::HttpStatus`]: any status other than 200.
    pub async fn get_text(&self, url: &str) -> Result<String, FeedError> {
        let response = self.get_raw(url).await?;
        if response.status != StatusCode::OK {
            return Err(status_error(response.status, url));
        }
        Ok(response.body)
    }

    /// Fetches `url` without judging the status code. Callers that can make
    /// sense of an error body (the Graph API) apply their own policy.
    pub(crate) async fn get_raw(&self, url: &str) -> Result<RawResponse, FeedError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/json;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| self.request_error(url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.request_error(url, e))?;

        tracing::debug!(
            url = %redact_url(url),
            status = status.as_u16(),
            bytes = body.len(),
            "fetched"
        );

        Ok(RawResponse { status, body })
    }

    /// Maps a `reqwest` failure to the timeout or network variant, stripping
    /// the URL from the source error so tokens never reach logs or the feed.
    pub(crate) fn request_error(&self, url: &str, error: reqwest::Error) -> FeedError {
        if error.is_timeout() {
            FeedError::Timeout {
                url: redact_url(url),
                timeout_secs: self.timeout_secs,
            }
        } else {
            FeedError::Network {
                url: redact_url(url),
                source: error.without_url(),
            }
        }
    }
}

pub(crate) fn status_error(status: StatusCode, url: &str) -> FeedError {
    FeedError::HttpStatus {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_owned(),
        url: redact_url(url),
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
