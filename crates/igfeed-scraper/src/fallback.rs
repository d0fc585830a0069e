//! Synthetic feed used whenever no real posts can be obtained.
//!
//! Images are inline SVG tiles encoded as `data:` URIs, so the feed renders
//! without any network access or files on disk.

use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use igfeed_core::{Feed, FeedSource, Post, MAX_POSTS_CEILING};
use rand::Rng as _;

use crate::normalize::iso_timestamp;

/// Real shortcodes from the account, so sample permalinks look plausible.
const KNOWN_SHORTCODES: [&str; 9] = [
    "DKc5nEVNRmm",
    "DKXpQ2tNvBx",
    "DKSrM4vNlZq",
    "DKNwE8xNpKs",
    "DKI9R5yN3Mv",
    "DKE2L6zNwHt",
    "DJ_8P4xNjFg",
    "DJ68Q9vN2Kx",
    "DJ15M7yNqRz",
];

const CAPTIONS: [&str; 9] = [
    "Fresh neapolitan sandwiches (panuozzo) straight from our wood-fired oven! 🔥🥖 #DoughAndBeats #Panuozzo #Neapolitan",
    "Behind the scenes: Creating the perfect dough for our signature panuozzi 👨‍🍳✨ #BehindTheScenes #ArtisanBread",
    "Wood-fired perfection! Our oven reaching the perfect temperature for authentic Neapolitan flavors 🔥🍕 #WoodFired #Authentic",
    "Fresh ingredients make all the difference! Local produce for our gourmet panuozzi 🥬🍅 #LocalProduce #Fresh",
    "The moment of truth - perfectly golden panuozzo fresh from the oven! 🥖✨ #PerfectBake #GoldenCrust",
    "Our signature panuozzo with premium ingredients - taste the difference! 🤤 #Signature #Premium #Delicious",
    "Artisan craftsmanship meets modern flavors 🎨🍞 Every panuozzo is a work of art! #Artisan #Craftsmanship",
    "Weekend vibes with our gourmet panuozzi selection! What's your favorite? 🤔🥖 #Weekend #Gourmet #Selection",
    "Ready for another busy day of serving delicious panuozzi across London! 🚐🍕 #MobileFood #London",
];

const PALETTE: [&str; 9] = [
    "#FF6B35", "#F7931E", "#FFD23F", "#06FFA5", "#118AB2", "#073B4C", "#EF476F", "#FFD166",
    "#06D6A0",
];

const EMOJIS: [&str; 9] = ["🍕", "🥖", "🔥", "🥬", "🍅", "👨‍🍳", "🎨", "🍞", "🚐"];

pub const FALLBACK_NOTE: &str =
    "This is sample data. Real Instagram posts could not be fetched for this run.";

/// Builds a feed of `count` synthetic posts (clamped to the 9-post ceiling).
///
/// Post `n` (1-based) is dated `now - n days`, so timestamps strictly
/// decrease. `likes` is random and only meant for display.
#[must_use]
pub fn fallback_feed(username: &str, count: usize, now: DateTime<Utc>) -> Feed {
    let count = count.min(MAX_POSTS_CEILING);
    let mut rng = rand::rng();

    let posts: Vec<Post> = (1..=count)
        .map(|n| {
            let image = placeholder_image(n);
            Post {
                id: sample_id(n),
                thumbnail_url: Some(image.clone()),
                image_url: image,
                permalink: format!("https://www.instagram.com/{username}/"),
                caption: sample_caption(n, username),
                timestamp: iso_timestamp(now - Duration::days(i64::try_from(n).unwrap_or(i64::MAX))),
                likes: rng.random_range(20..120),
                local_image: None,
                media_type: None,
            }
        })
        .collect();

    Feed::new(username, now, posts, count)
        .with_source(FeedSource::Fallback)
        .with_note(FALLBACK_NOTE)
}

fn sample_id(n: usize) -> String {
    KNOWN_SHORTCODES
        .get(n - 1)
        .map_or_else(|| format!("sample-{n}"), |s| (*s).to_owned())
}

fn sample_caption(n: usize, username: &str) -> String {
    CAPTIONS.get(n - 1).map_or_else(
        || format!("Delicious panuozzo creation from @{username}! 🍕🎵 #DoughAndBeats"),
        |c| (*c).to_owned(),
    )
}

/// A 400x400 colored tile with an emoji and label, as a base64 SVG data URI.
fn placeholder_image(n: usize) -> String {
    let color = PALETTE[(n - 1) % PALETTE.len()];
    let emoji = EMOJIS[(n - 1) % EMOJIS.len()];
    let svg = format!(
        r##"<svg width="400" height="400" viewBox="0 0 400 400" fill="none" xmlns="http://www.w3.org/2000/svg"><rect width="400" height="400" fill="{color}"/><circle cx="200" cy="150" r="60" fill="white" opacity="0.2"/><text x="200" y="165" text-anchor="middle" font-size="48" fill="white">{emoji}</text><text x="200" y="250" text-anchor="middle" font-size="20" fill="white" font-family="Arial, sans-serif">Dough &amp; Beats</text><text x="200" y="280" text-anchor="middle" font-size="16" fill="white" opacity="0.8" font-family="Arial, sans-serif">Fresh Panuozzo #{n}</text></svg>"##
    );
    format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(svg)
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn nine_posts_with_known_ids_and_data_images() {
        let feed = fallback_feed("dough_beats", 9, now());
        assert_eq!(feed.posts.len(), 9);
        assert_eq!(feed.total_posts, 9);
        assert_eq!(feed.posts[0].id, "DKc5nEVNRmm");
        assert_eq!(feed.posts[8].id, "DJ15M7yNqRz");
        for post in &feed.posts {
            assert!(!post.id.is_empty());
            assert!(post.image_url.starts_with("data:image/svg+xml;base64,"));
            assert_eq!(post.thumbnail_url.as_deref(), Some(post.image_url.as_str()));
            assert_eq!(post.permalink, "https://www.instagram.com/dough_beats/");
            assert!((20..120).contains(&post.likes));
        }
    }

    #[test]
    fn timestamps_strictly_decrease_from_one_day_ago() {
        let feed = fallback_feed("dough_beats", 9, now());
        assert_eq!(feed.posts[0].timestamp, "2025-05-31T12:00:00.000Z");
        assert_eq!(feed.posts[8].timestamp, "2025-05-23T12:00:00.000Z");
        for pair in feed.posts.windows(2) {
            assert!(pair[0].timestamp > pair[1].timestamp);
        }
    }

    #[test]
    fn feed_is_marked_as_fallback() {
        let feed = fallback_feed("dough_beats", 9, now());
        assert!(feed.is_fallback());
        assert_eq!(feed.note.as_deref(), Some(FALLBACK_NOTE));
        assert_eq!(feed.updated_at, now());
        assert!(feed.error.is_none());
    }

    #[test]
    fn count_follows_max_posts_and_ceiling() {
        assert_eq!(fallback_feed("dough_beats", 4, now()).posts.len(), 4);
        assert_eq!(fallback_feed("dough_beats", 30, now()).posts.len(), 9);
    }

    #[test]
    fn svg_decodes_with_escaped_ampersand_and_label() {
        let feed = fallback_feed("dough_beats", 3, now());
        let encoded = feed.posts[2]
            .image_url
            .strip_prefix("data:image/svg+xml;base64,")
            .unwrap();
        let svg = String::from_utf8(
            base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .unwrap(),
        )
        .unwrap();
        assert!(svg.contains("Dough &amp; Beats"));
        assert!(svg.contains("Fresh Panuozzo #3"));
        assert!(svg.contains(r##"fill="#FFD23F""##));
        assert!(svg.contains('🔥'));
    }

    #[test]
    fn ids_and_captions_past_the_fixed_lists() {
        assert_eq!(sample_id(10), "sample-10");
        assert_eq!(
            sample_caption(10, "dough_beats"),
            "Delicious panuozzo creation from @dough_beats! 🍕🎵 #DoughAndBeats"
        );
        assert!(sample_caption(1, "dough_beats").starts_with("Fresh neapolitan sandwiches"));
    }
}
