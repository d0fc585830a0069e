//! `igfeed show`: read the feed the way the site does.

use std::path::Path;

use igfeed_core::{classify_feed_file, resolve_image_url, FeedAvailability};

pub(crate) fn run_show(path: &Path) {
    for line in render_lines(&classify_feed_file(path)) {
        println!("{line}");
    }
}

pub(crate) fn render_lines(availability: &FeedAvailability) -> Vec<String> {
    match availability {
        FeedAvailability::Unavailable { reason } => vec![format!("feed unavailable: {reason}")],
        FeedAvailability::Available(feed) => {
            let mut lines = vec![format!(
                "@{}: {} posts, updated {}",
                feed.username,
                feed.posts.len(),
                feed.updated_at.to_rfc3339()
            )];
            if let Some(note) = &feed.note {
                lines.push(format!("note: {note}"));
            }
            lines.extend(feed.posts.iter().enumerate().map(|(i, post)| {
                let image = resolve_image_url(post);
                let image = if image.starts_with("data:") {
                    "[inline svg]".to_owned()
                } else {
                    image
                };
                format!("{:>2}. {}  {}  {}", i + 1, post.id, image, post.permalink)
            }));
            lines
        }
    }
}
