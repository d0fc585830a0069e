//! Strategy 2: a bare `"edge_owner_to_timeline_media": {...}` fragment.
//!
//! Newer pages ship the GraphQL payload inside arbitrary script tags rather
//! than a named global. The object after the key is cut out by bracket
//! matching and parsed on its own; if the object is truncated, the `edges`
//! array inside it is tried instead.

use crate::error::FeedError;

use super::json_scan::{after_colon, extract_balanced, TIMELINE_MEDIA_KEY};
use super::{usable_nodes, ExtractStrategy, ScrapedPost};

pub struct TimelineFragmentStrategy;

impl ExtractStrategy for TimelineFragmentStrategy {
    fn name(&self) -> &'static str {
        "timeline_fragment"
    }

    fn extract(&self, html: &str, limit: usize) -> Result<Vec<ScrapedPost>, FeedError> {
        let quoted_key = format!("\"{TIMELINE_MEDIA_KEY}\"");
        let mut last_error = None;

        for (idx, _) in html.match_indices(&quoted_key) {
            let Some(value_start) = after_colon(&html[idx + quoted_key.len()..]) else {
                continue;
            };

            match edges_from_fragment(value_start) {
                Ok(Some(edges)) => {
                    let posts = usable_nodes(&edges, limit);
                    if !posts.is_empty() {
                        return Ok(posts);
                    }
                }
                Ok(None) => {}
                Err(e) => last_error = Some(e),
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(vec![]),
        }
    }
}

/// Pull the `edges` array out of the fragment beginning at `s` (which should
/// start with the `{` of the timeline-media object).
fn edges_from_fragment(s: &str) -> Result<Option<Vec<serde_json::Value>>, FeedError> {
    if let Some(object) = extract_balanced(s) {
        let value: serde_json::Value =
            serde_json::from_str(object).map_err(|e| FeedError::Parse {
                context: "timeline media fragment".to_owned(),
                source: e,
            })?;
        return Ok(value
            .get("edges")
            .and_then(serde_json::Value::as_array)
            .cloned());
    }

    // Object never closes within the page; look for the edges array directly.
    let Some(edges_at) = s.find("\"edges\"") else {
        return Ok(None);
    };
    let Some(array) = after_colon(&s[edges_at + "\"edges\"".len()..]).and_then(extract_balanced)
    else {
        return Ok(None);
    };
    let edges: Vec<serde_json::Value> =
        serde_json::from_str(array).map_err(|e| FeedError::Parse {
            context: "timeline media edges".to_owned(),
            source: e,
        })?;
    Ok(Some(edges))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fragment_inside_script() {
        let html = r#"<script>requireLazy(function(){ handle({"user":{"edge_owner_to_timeline_media": {"count": 1, "edges": [
            {"node": {"shortcode": "CCC", "display_url": "https://cdn.example.com/c.jpg", "edge_liked_by": {"count": 12}}}
        ], "page_info": {"has_next_page": true}}}}) });</script>"#;
        let posts = TimelineFragmentStrategy.extract(html, 9).unwrap();
        assert_eq!(posts.len(), 1);
        match &posts[0] {
            ScrapedPost::Timeline(node) => assert_eq!(node.like_count(), 12),
            other @ ScrapedPost::Fragment { .. } => panic!("expected timeline node, got {other:?}"),
        }
    }

    #[test]
    fn truncated_object_still_yields_edges() {
        let html = r#"{"edge_owner_to_timeline_media":{"edges":[{"node":{"shortcode":"DDD","display_url":"https://cdn.example.com/d.jpg"}}],"page_info":{"#;
        let posts = TimelineFragmentStrategy.extract(html, 9).unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn skips_empty_occurrence_and_uses_later_one() {
        let html = r#"{"edge_owner_to_timeline_media":{"edges":[]}} ... {"edge_owner_to_timeline_media":{"edges":[{"node":{"shortcode":"EEE","display_url":"https://cdn.example.com/e.jpg"}}]}}"#;
        let posts = TimelineFragmentStrategy.extract(html, 9).unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn key_without_object_is_empty() {
        let html = r#"<p>"edge_owner_to_timeline_media" is the key we want</p>"#;
        assert!(TimelineFragmentStrategy.extract(html, 9).unwrap().is_empty());
    }

    #[test]
    fn malformed_fragment_is_parse_error() {
        let html = r#"{"edge_owner_to_timeline_media":{"edges":[{"node":{shortcode:'x'}}]}}"#;
        let err = TimelineFragmentStrategy.extract(html, 9).unwrap_err();
        assert!(matches!(err, FeedError::Parse { .. }), "got: {err:?}");
    }
}
