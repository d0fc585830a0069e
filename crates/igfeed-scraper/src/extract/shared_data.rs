//! Strategy 1: the `window._sharedData = {...};` global blob.

use crate::error::FeedError;

use super::json_scan::{extract_balanced, find_key, TIMELINE_MEDIA_KEY};
use super::{usable_nodes, ExtractStrategy, ScrapedPost};

const SHARED_DATA_MARKER: &str = "window._sharedData";

pub struct SharedDataStrategy;

impl ExtractStrategy for SharedDataStrategy {
    fn name(&self) -> &'static str {
        "shared_data"
    }

    fn extract(&self, html: &str, limit: usize) -> Result<Vec<ScrapedPost>, FeedError> {
        let Some(blob) = html
            .match_indices(SHARED_DATA_MARKER)
            .find_map(|(idx, _)| assigned_object(&html[idx + SHARED_DATA_MARKER.len()..]))
        else {
            return Ok(vec![]);
        };

        let value: serde_json::Value =
            serde_json::from_str(blob).map_err(|e| FeedError::Parse {
                context: "window._sharedData".to_owned(),
                source: e,
            })?;

        let edges = find_key(&value, TIMELINE_MEDIA_KEY)
            .and_then(|media| media.get("edges"))
            .and_then(serde_json::Value::as_array);

        Ok(edges.map(|e| usable_nodes(e, limit)).unwrap_or_default())
    }
}

/// The balanced object in `= {...}` at the start of `s`. Comparisons
/// (`==`) and bare reads of the global yield `None`.
fn assigned_object(s: &str) -> Option<&str> {
    let value = s.trim_start().strip_prefix('=')?;
    if value.starts_with('=') {
        return None;
    }
    extract_balanced(value.trim_start())
}
