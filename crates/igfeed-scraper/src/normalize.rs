//! Mapping of upstream post shapes onto the canonical [`Post`].
//!
//! Discovery order is preserved throughout; nothing here sorts.

use chrono::{DateTime, SecondsFormat, Utc};
use igfeed_core::Post;

use crate::extract::ScrapedPost;
use crate::types::{ApiMedia, TimelineNode};

/// Media types the site grid can render. Videos are skipped.
const RENDERABLE_MEDIA_TYPES: [&str; 2] = ["IMAGE", "CAROUSEL_ALBUM"];

const POST_PERMALINK_BASE: &str = "https://www.instagram.com/p";

/// Formats an instant the way the feed stores timestamps it generates
/// itself: UTC, millisecond precision, `Z` suffix.
pub(crate) fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn post_permalink(id: &str) -> String {
    format!("{POST_PERMALINK_BASE}/{id}/")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Normalizes Graph API media objects.
///
/// Keeps `IMAGE` and `CAROUSEL_ALBUM` items that carry both an id and a
/// `media_url`, then takes the first `max_posts`. `likes` is always 0 since
/// the API does not expose it.
#[must_use]
pub fn normalize_api_media(media: Vec<ApiMedia>, max_posts: usize, now: DateTime<Utc>) -> Vec<Post> {
    media
        .into_iter()
        .filter(|m| {
            m.media_type
                .as_deref()
                .is_some_and(|t| RENDERABLE_MEDIA_TYPES.contains(&t))
        })
        .filter_map(|m| {
            let id = m.id.trim().to_owned();
            if id.is_empty() {
                tracing::debug!("dropping API media without id");
                return None;
            }
            let Some(media_url) = non_empty(m.media_url) else {
                tracing::debug!(post_id = %id, "dropping API media without media_url");
                return None;
            };
            Some(Post {
                thumbnail_url: Some(non_empty(m.thumbnail_url).unwrap_or_else(|| media_url.clone())),
                permalink: non_empty(m.permalink).unwrap_or_else(|| post_permalink(&id)),
                caption: m.caption.unwrap_or_default(),
                timestamp: non_empty(m.timestamp).unwrap_or_else(|| iso_timestamp(now)),
                likes: 0,
                local_image: None,
                media_type: m.media_type,
                image_url: media_url,
                id,
            })
        })
        .take(max_posts)
        .collect()
}

/// Normalizes posts recovered from the profile page.
///
/// Structured nodes keep their caption, likes, and timestamp. Regex
/// fragments carry only an id and image, so they get an empty caption, zero
/// likes, and `now` as their timestamp.
#[must_use]
pub fn normalize_scraped(posts: Vec<ScrapedPost>, max_posts: usize, now: DateTime<Utc>) -> Vec<Post> {
    posts
        .into_iter()
        .filter_map(|post| match post {
            ScrapedPost::Timeline(node) => from_timeline_node(node, now),
            ScrapedPost::Fragment {
                shortcode,
                display_url,
            } => from_fragment(shortcode, display_url, now),
        })
        .take(max_posts)
        .collect()
}

fn from_timeline_node(node: TimelineNode, now: DateTime<Utc>) -> Option<Post> {
    let caption = node.caption_text().unwrap_or_default().to_owned();
    let likes = node.like_count();
    let timestamp = node
        .taken_at_timestamp
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(now);

    let shortcode = non_empty(node.shortcode)?;
    let display_url = non_empty(node.display_url)?;
    let thumbnail = non_empty(node.thumbnail_src).unwrap_or_else(|| display_url.clone());

    Some(Post {
        permalink: post_permalink(&shortcode),
        id: shortcode,
        image_url: display_url,
        thumbnail_url: Some(thumbnail),
        caption,
        timestamp: iso_timestamp(timestamp),
        likes,
        local_image: None,
        media_type: None,
    })
}

fn from_fragment(shortcode: String, display_url: String, now: DateTime<Utc>) -> Option<Post> {
    if shortcode.is_empty() || display_url.is_empty() {
        return None;
    }
    Some(Post {
        permalink: post_permalink(&shortcode),
        id: shortcode,
        thumbnail_url: Some(display_url.clone()),
        image_url: display_url,
        caption: String::new(),
        timestamp: iso_timestamp(now),
        likes: 0,
        local_image: None,
        media_type: None,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
