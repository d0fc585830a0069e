//! Upstream shapes: Graph API media objects and scraped timeline nodes.
//!
//! ## Graph API (`/{user-id}/media`)
//! Fields are only present when requested via `fields=`. `thumbnail_url` is
//! only populated for videos; `media_url` may be missing for media flagged by
//! copyright detection. Everything except `id` is modelled as optional.
//!
//! ## Profile page timeline nodes
//! Nodes under `edge_owner_to_timeline_media.edges[].node`. The shape is
//! undocumented and has drifted over time, so every field is optional and
//! nested connections default to empty.

use serde::Deserialize;

/// Top-level response from `GET /{user-id}/media`.
///
/// Items are kept as raw values and parsed one by one, so a single odd item
/// does not sink the whole page.
#[derive(Debug, Deserialize)]
pub struct ApiMediaResponse {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

/// One media object from the Graph API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiMedia {
    pub id: String,

    /// `IMAGE`, `VIDEO`, or `CAROUSEL_ALBUM`.
    #[serde(default)]
    pub media_type: Option<String>,

    #[serde(default)]
    pub media_url: Option<String>,

    #[serde(default)]
    pub thumbnail_url: Option<String>,

    #[serde(default)]
    pub permalink: Option<String>,

    #[serde(default)]
    pub caption: Option<String>,

    /// e.g. `"2024-05-01T18:22:10+0000"`; passed through verbatim.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Response from `GET /me?fields=id,username`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiAccount {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEdge {
    pub node: TimelineNode,
}

/// One post node from the profile page's embedded GraphQL data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TimelineNode {
    #[serde(default)]
    pub shortcode: Option<String>,

    #[serde(default)]
    pub display_url: Option<String>,

    #[serde(default)]
    pub thumbnail_src: Option<String>,

    /// Unix epoch seconds.
    #[serde(default)]
    pub taken_at_timestamp: Option<i64>,

    #[serde(default)]
    pub edge_media_to_caption: Option<CaptionConnection>,

    #[serde(default)]
    pub edge_liked_by: Option<CountConnection>,

    /// Newer pages expose likes here instead of `edge_liked_by`.
    #[serde(default)]
    pub edge_media_preview_like: Option<CountConnection>,
}

impl TimelineNode {
    /// `true` when the node carries both fields a post cannot do without.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        let non_empty = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        non_empty(&self.shortcode) && non_empty(&self.display_url)
    }

    /// First caption text, if every link of the connection is present.
    #[must_use]
    pub fn caption_text(&self) -> Option<&str> {
        self.edge_media_to_caption
            .as_ref()?
            .edges
            .first()?
            .node
            .as_ref()?
            .text
            .as_deref()
    }

    #[must_use]
    pub fn like_count(&self) -> u64 {
        self.edge_liked_by
            .as_ref()
            .and_then(|c| c.count)
            .or_else(|| self.edge_media_preview_like.as_ref().and_then(|c| c.count))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CaptionConnection {
    #[serde(default)]
    pub edges: Vec<CaptionEdge>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CaptionEdge {
    #[serde(default)]
    pub node: Option<CaptionNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CaptionNode {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CountConnection {
    #[serde(default)]
    pub count: Option<u64>,
}
