//! URL construction and redaction helpers for the fetcher.

use crate::error::FeedError;

const SECRET_QUERY_KEYS: [&str; 2] = ["access_token", "client_secret"];

/// Replaces secret query values (`access_token`, `client_secret`) with
/// `REDACTED`.
///
/// Unparseable input is returned unchanged; it cannot have been sent anyway.
#[must_use]
pub fn redact_url(url: &str) -> String {
    let Ok(mut parsed) = reqwest::Url::parse(url) else {
        return url.to_owned();
    };

    let has_secret = parsed
        .query_pairs()
        .any(|(k, _)| SECRET_QUERY_KEYS.contains(&k.as_ref()));
    if !has_secret {
        return url.to_owned();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let value = if SECRET_QUERY_KEYS.contains(&k.as_ref()) {
                "REDACTED".to_owned()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

/// Builds the public profile URL, e.g. `https://www.instagram.com/dough_beats/`.
///
/// # Errors
///
/// Returns [`FeedError::InvalidUrl`] if the username is empty or the result
/// does not parse as a URL.
pub fn profile_url(base_url: &str, username: &str) -> Result<String, FeedError> {
    let username = username.trim().trim_start_matches('@');
    if username.is_empty() || username.contains('/') {
        return Err(FeedError::InvalidUrl {
            url: base_url.to_owned(),
            reason: format!("invalid username \"{username}\""),
        });
    }

    let url = format!("{}/{username}/", base_url.trim_end_matches('/'));
    reqwest::Url::parse(&url).map_err(|e| FeedError::InvalidUrl {
        url: url.clone(),
        reason: e.to_string(),
    })?;
    Ok(url)
}
