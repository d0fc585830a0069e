use chrono::TimeZone;

use super::*;
use crate::types::{CaptionConnection, CaptionEdge, CaptionNode, CountConnection};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn api_media(id: &str, media_type: &str) -> ApiMedia {
    ApiMedia {
        id: id.to_owned(),
        media_type: Some(media_type.to_owned()),
        media_url: Some(format!("https://scontent.cdninstagram.com/{id}.jpg")),
        thumbnail_url: None,
        permalink: Some(format!("https://www.instagram.com/p/{id}/")),
        caption: Some(format!("caption {id}")),
        timestamp: Some("2025-05-30T18:22:10+0000".to_owned()),
    }
}

fn timeline_node(shortcode: &str) -> TimelineNode {
    TimelineNode {
        shortcode: Some(shortcode.to_owned()),
        display_url: Some(format!("https://cdn.example.com/{shortcode}.jpg")),
        ..TimelineNode::default()
    }
}

// ---------------------------------------------------------------------------
// Graph API media
// ---------------------------------------------------------------------------

#[test]
fn api_keeps_images_and_carousels_only() {
    let media = vec![
        api_media("1", "IMAGE"),
        api_media("2", "VIDEO"),
        api_media("3", "CAROUSEL_ALBUM"),
    ];
    let posts = normalize_api_media(media, 9, now());
    let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(posts[1].media_type.as_deref(), Some("CAROUSEL_ALBUM"));
}

#[test]
fn api_fields_map_onto_post() {
    let posts = normalize_api_media(vec![api_media("17900", "IMAGE")], 9, now());
    let post = &posts[0];
    assert_eq!(post.image_url, "https://scontent.cdninstagram.com/17900.jpg");
    assert_eq!(post.thumbnail_url.as_deref(), Some(post.image_url.as_str()));
    assert_eq!(post.caption, "caption 17900");
    assert_eq!(post.timestamp, "2025-05-30T18:22:10+0000");
    assert_eq!(post.likes, 0);
    assert!(post.local_image.is_none());
}

#[test]
fn api_missing_optionals_get_defaults() {
    let media = ApiMedia {
        permalink: None,
        caption: None,
        timestamp: None,
        ..api_media("42", "IMAGE")
    };
    let post = &normalize_api_media(vec![media], 9, now())[0];
    assert_eq!(post.permalink, "https://www.instagram.com/p/42/");
    assert_eq!(post.caption, "");
    assert_eq!(post.timestamp, "2025-06-01T12:00:00.000Z");
}

#[test]
fn api_items_without_media_url_or_id_are_dropped() {
    let no_url = ApiMedia {
        media_url: None,
        ..api_media("1", "IMAGE")
    };
    let blank_id = api_media("  ", "IMAGE");
    let posts = normalize_api_media(vec![no_url, blank_id, api_media("3", "IMAGE")], 9, now());
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, "3");
}

#[test]
fn api_cap_applies_after_filtering() {
    let mut media: Vec<ApiMedia> = (0..5).map(|i| api_media(&format!("v{i}"), "VIDEO")).collect();
    media.extend((0..12).map(|i| api_media(&format!("i{i}"), "IMAGE")));
    let posts = normalize_api_media(media, 6, now());
    assert_eq!(posts.len(), 6);
    assert_eq!(posts[0].id, "i0");
    assert_eq!(posts[5].id, "i5");
}

// ---------------------------------------------------------------------------
// Scraped timeline nodes
// ---------------------------------------------------------------------------

#[test]
fn timeline_node_maps_all_fields() {
    let node = TimelineNode {
        thumbnail_src: Some("https://cdn.example.com/thumb.jpg".to_owned()),
        taken_at_timestamp: Some(1_717_243_200),
        edge_media_to_caption: Some(CaptionConnection {
            edges: vec![CaptionEdge {
                node: Some(CaptionNode {
                    text: Some("Wood-fired perfection".to_owned()),
                }),
            }],
        }),
        edge_liked_by: Some(CountConnection { count: Some(87) }),
        ..timeline_node("DKc5nEVNRmm")
    };
    let posts = normalize_scraped(vec![ScrapedPost::Timeline(node)], 9, now());
    let post = &posts[0];
    assert_eq!(post.id, "DKc5nEVNRmm");
    assert_eq!(post.permalink, "https://www.instagram.com/p/DKc5nEVNRmm/");
    assert_eq!(post.image_url, "https://cdn.example.com/DKc5nEVNRmm.jpg");
    assert_eq!(post.thumbnail_url.as_deref(), Some("https://cdn.example.com/thumb.jpg"));
    assert_eq!(post.caption, "Wood-fired perfection");
    assert_eq!(post.timestamp, "2024-06-01T12:00:00.000Z");
    assert_eq!(post.likes, 87);
}

#[test]
fn timeline_node_defaults() {
    let posts = normalize_scraped(vec![ScrapedPost::Timeline(timeline_node("ABC"))], 9, now());
    let post = &posts[0];
    assert_eq!(post.caption, "");
    assert_eq!(post.likes, 0);
    assert_eq!(post.thumbnail_url.as_deref(), Some(post.image_url.as_str()));
    assert_eq!(post.timestamp, "2025-06-01T12:00:00.000Z");
}

#[test]
fn timeline_node_without_shortcode_is_dropped() {
    let node = TimelineNode {
        shortcode: None,
        ..timeline_node("X")
    };
    let posts = normalize_scraped(
        vec![ScrapedPost::Timeline(node), ScrapedPost::Timeline(timeline_node("Y"))],
        9,
        now(),
    );
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, "Y");
}

// ---------------------------------------------------------------------------
// Regex fragments
// ---------------------------------------------------------------------------

#[test]
fn fragment_gets_empty_caption_now_and_zero_likes() {
    let posts = normalize_scraped(
        vec![ScrapedPost::Fragment {
            shortcode: "FRAG1".to_owned(),
            display_url: "https://cdn.example.com/f.jpg".to_owned(),
        }],
        9,
        now(),
    );
    let post = &posts[0];
    assert_eq!(post.caption, "");
    assert_eq!(post.likes, 0);
    assert_eq!(post.timestamp, "2025-06-01T12:00:00.000Z");
    assert_eq!(post.permalink, "https://www.instagram.com/p/FRAG1/");
}

#[test]
fn scraped_order_is_preserved_and_capped() {
    let posts: Vec<ScrapedPost> = (0..12)
        .map(|i| ScrapedPost::Timeline(timeline_node(&format!("S{i:02}"))))
        .rev()
        .collect();
    let normalized = normalize_scraped(posts, 9, now());
    assert_eq!(normalized.len(), 9);
    assert_eq!(normalized[0].id, "S11");
    assert_eq!(normalized[8].id, "S03");
}
