//! How the rendering layer should interpret a feed document.
//!
//! A missing file, a document that fails to parse, a feed carrying `error`,
//! and a feed with no posts all mean "show the unavailable state".

use std::path::Path;

use crate::feed::{Feed, MAX_POSTS_CEILING};

/// The grid never shows more than this many posts.
pub const DISPLAY_POST_LIMIT: usize = MAX_POSTS_CEILING;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedAvailability {
    Available(Feed),
    Unavailable { reason: String },
}

impl FeedAvailability {
    /// Classify an already-parsed feed.
    #[must_use]
    pub fn from_feed(mut feed: Feed) -> Self {
        if let Some(error) = feed.error.as_deref() {
            return Self::Unavailable {
                reason: error.to_owned(),
            };
        }
        if feed.posts.is_empty() {
            return Self::Unavailable {
                reason: "feed has no posts".to_owned(),
            };
        }
        feed.posts.truncate(DISPLAY_POST_LIMIT);
        Self::Available(feed)
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Read and classify the feed document at `path`. Never fails.
#[must_use]
pub fn classify_feed_file(path: &Path) -> FeedAvailability {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return FeedAvailability::Unavailable {
                reason: format!("failed to read {}: {e}", path.display()),
            }
        }
    };

    match serde_json::from_str::<Feed>(&content) {
        Ok(feed) => FeedAvailability::from_feed(feed),
        Err(e) => FeedAvailability::Unavailable {
            reason: format!("failed to parse {}: {e}", path.display()),
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::feed::Post;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_owned(),
            image_url: "/images/pic01.jpg".to_owned(),
            thumbnail_url: None,
            permalink: format!("https://www.instagram.com/p/{id}/"),
            caption: String::new(),
            timestamp: "2024-01-01T12:00:00Z".to_owned(),
            likes: 0,
            local_image: None,
            media_type: None,
        }
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let got = classify_feed_file(&dir.path().join("instagram.json"));
        assert!(!got.is_available());
    }

    #[test]
    fn invalid_json_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instagram.json");
        std::fs::write(&path, "{ not json").unwrap();
        let got = classify_feed_file(&path);
        assert!(
            matches!(got, FeedAvailability::Unavailable { ref reason } if reason.contains("parse")),
            "got: {got:?}"
        );
    }

    #[test]
    fn error_field_is_unavailable() {
        let feed = Feed::new("dough_beats", Utc::now(), vec![post("a")], 9)
            .with_error("Request timeout");
        assert_eq!(
            FeedAvailability::from_feed(feed),
            FeedAvailability::Unavailable {
                reason: "Request timeout".to_owned()
            }
        );
    }

    #[test]
    fn empty_posts_is_unavailable() {
        let feed = Feed::new("dough_beats", Utc::now(), vec![], 9);
        assert!(!FeedAvailability::from_feed(feed).is_available());
    }

    #[test]
    fn valid_file_is_available() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("instagram.json");
        let feed = Feed::new("dough_beats", Utc::now(), vec![post("a"), post("b")], 9);
        std::fs::write(&path, serde_json::to_string_pretty(&feed).unwrap()).unwrap();

        match classify_feed_file(&path) {
            FeedAvailability::Available(got) => assert_eq!(got.posts.len(), 2),
            other @ FeedAvailability::Unavailable { .. } => panic!("expected available, got {other:?}"),
        }
    }

    #[test]
    fn oversized_hand_edited_feed_is_capped_for_display() {
        let mut feed = Feed::new("dough_beats", Utc::now(), vec![], 9);
        feed.posts = (0..12).map(|i| post(&format!("p{i}"))).collect();
        feed.total_posts = feed.posts.len();
        match FeedAvailability::from_feed(feed) {
            FeedAvailability::Available(got) => assert_eq!(got.posts.len(), DISPLAY_POST_LIMIT),
            other @ FeedAvailability::Unavailable { .. } => panic!("expected available, got {other:?}"),
        }
    }
}
