//! Canonical post and feed records.
//!
//! ## Serialized shape
//!
//! The rendering layer reads `instagram.json` directly, so field names are the
//! snake_case names it expects. Optional fields are omitted rather than written
//! as `null`; readers treat a missing `thumbnail_url` as "same as `image_url`".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hard ceiling on the number of posts a feed may carry. The site grid is 3x3.
pub const MAX_POSTS_CEILING: usize = 9;

/// One canonical media item after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Upstream shortcode or numeric media id.
    pub id: String,

    /// Absolute http(s) URL, `data:` URI, or site-relative path.
    pub image_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    pub permalink: String,

    #[serde(default)]
    pub caption: String,

    /// ISO-8601 instant. API timestamps are passed through verbatim.
    pub timestamp: String,

    #[serde(default)]
    pub likes: u64,

    /// Site-relative path of a downloaded copy, e.g. `instagram/ABC123.jpg`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_image: Option<String>,

    /// Upstream media type (`IMAGE`, `CAROUSEL_ALBUM`). Only the Graph API
    /// exposes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

/// Where the posts of a feed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSource {
    GraphApi,
    ProfileScrape,
    Fallback,
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::GraphApi => write!(f, "graph_api"),
            FeedSource::ProfileScrape => write!(f, "profile_scrape"),
            FeedSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// The persisted feed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub username: String,
    pub updated_at: DateTime<Utc>,
    pub posts: Vec<Post>,
    /// Always `posts.len()`; kept as a field because consumers read it.
    pub total_posts: usize,

    /// Present when the feed was produced by the fallback generator because
    /// something upstream failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_configured: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<FeedSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Feed {
    /// Builds a feed from already-normalized posts.
    ///
    /// Posts beyond `max_posts` (itself clamped to [`MAX_POSTS_CEILING`]) are
    /// dropped so that `total_posts` and the length bound hold by construction.
    #[must_use]
    pub fn new(
        username: &str,
        updated_at: DateTime<Utc>,
        mut posts: Vec<Post>,
        max_posts: usize,
    ) -> Self {
        posts.truncate(max_posts.min(MAX_POSTS_CEILING));
        let total_posts = posts.len();
        Self {
            username: username.to_owned(),
            updated_at,
            posts,
            total_posts,
            error: None,
            api_configured: None,
            source: None,
            note: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: FeedSource) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_api_configured(mut self, configured: bool) -> Self {
        self.api_configured = Some(configured);
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// `true` when the feed carries synthetic placeholder posts.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == Some(FeedSource::Fallback)
    }
}
