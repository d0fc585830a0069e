//! Persistence of the feed document.

use std::path::Path;

use igfeed_core::Feed;

use crate::error::FeedError;

/// Serializes `feed` as 2-space-indented JSON and replaces the file at
/// `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`FeedError::Io`] if the directory or file cannot be written, or
/// [`FeedError::Parse`] if serialization fails.
pub async fn write_feed(path: &Path, feed: &Feed) -> Result<(), FeedError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| FeedError::io(parent, e))?;
    }

    let mut json = serde_json::to_string_pretty(feed).map_err(|e| FeedError::Parse {
        context: "feed serialization".to_owned(),
        source: e,
    })?;
    json.push('\n');

    tokio::fs::write(path, json)
        .await
        .map_err(|e| FeedError::io(path, e))?;

    tracing::info!(
        path = %path.display(),
        posts = feed.total_posts,
        "feed written"
    );
    Ok(())
}

/// Reads a feed document written by [`write_feed`].
///
/// # Errors
///
/// Returns [`FeedError::Io`] if the file cannot be read, or
/// [`FeedError::Parse`] if it is not a valid feed document.
pub async fn read_feed(path: &Path) -> Result<Feed, FeedError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FeedError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| FeedError::Parse {
        context: path.display().to_string(),
        source: e,
    })
}
