//! Local caching of post images.

use std::path::Path;

use igfeed_core::Post;

use crate::client::FeedClient;
use crate::error::FeedError;

/// Which of a post's URLs to download.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ImageChoice {
    /// The full-size `image_url` (Graph API posts).
    Full,
    /// `thumbnail_url`, falling back to `image_url` (scraped posts, whose
    /// thumbnails are the square crop the grid shows).
    Thumbnail,
}

/// Downloads each post's image to `<images_dir>/<id>.jpg`, one at a time in
/// feed order, and points `local_image` at `<public_prefix>/<id>.jpg`.
///
/// Posts whose download fails keep their remote URL. Only a failure to create
/// `images_dir` itself is returned.
pub(crate) async fn attach_local_images(
    client: &FeedClient,
    posts: &mut [Post],
    images_dir: &Path,
    public_prefix: &str,
    choice: ImageChoice,
) -> Result<(), FeedError> {
    tokio::fs::create_dir_all(images_dir)
        .await
        .map_err(|e| FeedError::io(images_dir, e))?;

    let mut downloaded = 0usize;
    for post in posts.iter_mut() {
        let source = match choice {
            ImageChoice::Full => post.image_url.as_str(),
            ImageChoice::Thumbnail => post.thumbnail_url.as_deref().unwrap_or(&post.image_url),
        };
        if !source.starts_with("http") {
            continue;
        }
        if !is_safe_file_stem(&post.id) {
            tracing::warn!(post_id = %post.id, "post id is not a safe file name; keeping remote URL");
            continue;
        }

        let filename = format!("{}.jpg", post.id);
        let target = images_dir.join(&filename);
        match client.download_to_file(source, &target).await {
            Ok(bytes) => {
                tracing::debug!(post_id = %post.id, bytes, "image cached");
                post.local_image = Some(public_path(public_prefix, &filename));
                downloaded += 1;
            }
            Err(e) => {
                tracing::warn!(post_id = %post.id, error = %e, "image download failed; keeping remote URL");
            }
        }
    }

    tracing::info!(downloaded, total = posts.len(), "image caching finished");
    Ok(())
}

fn public_path(prefix: &str, filename: &str) -> String {
    if prefix.is_empty() {
        filename.to_owned()
    } else {
        format!("{prefix}/{filename}")
    }
}

/// Shortcodes and numeric ids only use `[A-Za-z0-9_-]`; anything else is not
/// used as a file name.
fn is_safe_file_stem(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
