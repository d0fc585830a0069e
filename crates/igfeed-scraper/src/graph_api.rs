//! Client for the Instagram Graph API media listing.
//!
//! The API reports failures as `{"error": {"message", "code", ...}}`, usually
//! with a 4xx status. Such a body is surfaced as [`FeedError::Api`] whatever
//! the status, so the upstream message reaches the feed verbatim.

use igfeed_core::Credentials;
use reqwest::{StatusCode, Url};

use crate::client::{redact_url, status_error, FeedClient};
use crate::error::FeedError;
use crate::types::{ApiAccount, ApiMedia, ApiMediaResponse};

const MEDIA_FIELDS: &str = "id,media_type,media_url,thumbnail_url,permalink,caption,timestamp";
const ACCOUNT_FIELDS: &str = "id,username";

/// Graph API client bound to one account's credentials.
///
/// Use a mock server's URI as `base_url` in tests.
pub struct GraphApiClient {
    http: FeedClient,
    credentials: Credentials,
    base_url: Url,
}

impl std::fmt::Debug for GraphApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphApiClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GraphApiClient {
    /// # Errors
    ///
    /// Returns [`FeedError::Client`] if the HTTP client cannot be built, or
    /// [`FeedError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(
        credentials: Credentials,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, FeedError> {
        let http = FeedClient::new(timeout_secs, user_agent)?;

        // Exactly one trailing slash so joined paths extend the base instead
        // of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| FeedError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            credentials,
            base_url,
        })
    }

    /// The underlying HTTP client, shared with image downloads.
    #[must_use]
    pub fn http(&self) -> &FeedClient {
        &self.http
    }

    /// Fetches up to `limit` of the account's most recent media objects, in
    /// upstream (newest first) order.
    ///
    /// A response without a `data` array yields an empty list. Items that do
    /// not deserialize are skipped.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Api`] if the body carries an `error` object.
    /// - [`FeedError::HttpStatus`] on any other non-200 response.
    /// - [`FeedError::Timeout`] / [`FeedError::Network`] on transport failure.
    /// - [`FeedError::Parse`] if the body is not JSON.
    pub async fn fetch_media(&self, limit: usize) -> Result<Vec<ApiMedia>, FeedError> {
        let path = format!("{}/media", self.credentials.user_id);
        let url = self.build_url(
            &path,
            &[("fields", MEDIA_FIELDS), ("limit", &limit.to_string())],
        )?;
        let body = self.request_json(&url).await?;

        let response: ApiMediaResponse =
            serde_json::from_value(body).map_err(|e| FeedError::Parse {
                context: format!("media listing for user {}", self.credentials.user_id),
                source: e,
            })?;

        let total = response.data.len();
        let media: Vec<ApiMedia> = response
            .data
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect();
        if media.len() < total {
            tracing::warn!(
                skipped = total - media.len(),
                "skipped media items that did not match the expected shape"
            );
        }

        Ok(media)
    }

    /// Fetches the account behind the access token (`/me`).
    ///
    /// # Errors
    ///
    /// Same as [`GraphApiClient::fetch_media`].
    pub async fn fetch_account(&self) -> Result<ApiAccount, FeedError> {
        let url = self.build_url("me", &[("fields", ACCOUNT_FIELDS)])?;
        let body = self.request_json(&url).await?;
        serde_json::from_value(body).map_err(|e| FeedError::Parse {
            context: "account lookup".to_owned(),
            source: e,
        })
    }

    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, FeedError> {
        let mut url = self.base_url.join(path).map_err(|e| FeedError::InvalidUrl {
            url: format!("{}{path}", self.base_url),
            reason: e.to_string(),
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("access_token", &self.credentials.access_token);
        }
        Ok(url)
    }

    /// Sends the request and parses the body as JSON, mapping an `error`
    /// object to [`FeedError::Api`] before looking at the status.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, FeedError> {
        let response = self.http.get_raw(url.as_str()).await?;

        let parsed = serde_json::from_str::<serde_json::Value>(&response.body);
        if let Ok(body) = &parsed {
            if let Some(err) = api_error(body) {
                tracing::warn!(
                    url = %redact_url(url.as_str()),
                    status = response.status.as_u16(),
                    error = %err,
                    "Graph API returned an error object"
                );
                return Err(err);
            }
        }

        if response.status != StatusCode::OK {
            return Err(status_error(response.status, url.as_str()));
        }

        parsed.map_err(|e| FeedError::Parse {
            context: redact_url(url.as_str()),
            source: e,
        })
    }
}

fn api_error(body: &serde_json::Value) -> Option<FeedError> {
    let error = body.get("error").filter(|e| e.is_object())?;
    let message = error
        .get("message")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("unknown error")
        .to_owned();
    let code = error.get("code").and_then(serde_json::Value::as_i64);
    Some(FeedError::Api { message, code })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GraphApiClient {
        GraphApiClient::new(
            Credentials {
                access_token: "IGQVJ-secret".to_owned(),
                user_id: "17841400000000000".to_owned(),
            },
            15,
            "igfeed-test/0.1",
            base_url,
        )
        .expect("client construction should not fail")
    }

    #[test]
    fn build_url_joins_user_media_path() {
        let client = test_client("https://graph.instagram.com");
        let url = client.build_url("17841400000000000/media", &[("limit", "9")]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://graph.instagram.com/17841400000000000/media?limit=9&access_token=IGQVJ-secret"
        );
    }

    #[test]
    fn build_url_keeps_base_path_prefix() {
        let client = test_client("http://127.0.0.1:9000/v19.0/");
        let url = client.build_url("me", &[("fields", ACCOUNT_FIELDS)]).unwrap();
        assert!(
            url.as_str().starts_with("http://127.0.0.1:9000/v19.0/me?fields=id%2Cusername"),
            "got: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = GraphApiClient::new(
            Credentials {
                access_token: "t".to_owned(),
                user_id: "1".to_owned(),
            },
            15,
            "ua",
            "not a url",
        )
        .unwrap_err();
        assert!(matches!(err, FeedError::InvalidUrl { .. }), "got: {err:?}");
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", test_client("https://graph.instagram.com"));
        assert!(!rendered.contains("IGQVJ-secret"), "leaked: {rendered}");
    }

    #[test]
    fn api_error_reads_message_and_code() {
        let body = serde_json::json!({
            "error": { "message": "Error validating access token", "type": "OAuthException", "code": 190 }
        });
        let err = api_error(&body).unwrap();
        assert!(err.is_expired_token());
        assert_eq!(err.feed_message(), "Error validating access token");
        assert!(api_error(&serde_json::json!({ "data": [] })).is_none());
    }

    #[test]
    fn null_error_field_is_not_an_api_error() {
        assert!(api_error(&serde_json::json!({ "error": null, "data": [] })).is_none());
    }
}
