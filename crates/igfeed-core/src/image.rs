//! Display-time image selection for a single post.

use crate::feed::Post;

/// Returned when a post carries no usable image reference at all.
pub const PLACEHOLDER_IMAGE_PATH: &str = "/images/placeholder.jpg";

/// Picks the one URI the site should render for `post`.
///
/// Precedence:
/// 1. a downloaded copy (`local_image`), made root-relative;
/// 2. a `data:` URI in `image_url`, untouched;
/// 3. an absolute `thumbnail_url`;
/// 4. an absolute `image_url`;
/// 5. a bare relative `image_url`, prefixed with `/`;
/// 6. whatever is non-empty, else [`PLACEHOLDER_IMAGE_PATH`].
#[must_use]
pub fn resolve_image_url(post: &Post) -> String {
    if let Some(local) = post
        .local_image
        .as_deref()
        .filter(|l| !l.trim().is_empty())
    {
        return format!("/{local}");
    }

    if post.image_url.starts_with("data:") {
        return post.image_url.clone();
    }

    let thumbnail = post.thumbnail_url.as_deref().unwrap_or_default();
    if is_absolute_http(thumbnail) {
        return thumbnail.to_owned();
    }
    if is_absolute_http(&post.image_url) {
        return post.image_url.clone();
    }

    if !post.image_url.is_empty() && !post.image_url.starts_with('/') {
        return format!("/{}", post.image_url);
    }

    if !post.image_url.is_empty() {
        post.image_url.clone()
    } else if !thumbnail.is_empty() {
        thumbnail.to_owned()
    } else {
        PLACEHOLDER_IMAGE_PATH.to_owned()
    }
}

fn is_absolute_http(url: &str) -> bool {
    url.starts_with("http")
}
