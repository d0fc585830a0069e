//! One feed acquisition run.
//!
//! The path is chosen once from configuration: Graph API when credentials
//! are present, public profile scrape otherwise. Any upstream failure,
//! including a run that finds no posts, is replaced by the fallback feed, so
//! the only error a caller ever sees is a failure to write the document.

use chrono::{DateTime, Utc};
use igfeed_core::{Credentials, Feed, FeedConfig, FeedSource};

use crate::client::{profile_url, FeedClient};
use crate::error::FeedError;
use crate::extract::Extractor;
use crate::fallback::fallback_feed;
use crate::graph_api::GraphApiClient;
use crate::images::{attach_local_images, ImageChoice};
use crate::normalize::{normalize_api_media, normalize_scraped};
use crate::output::write_feed;

/// Collects a feed and writes it to `config.output_path`.
///
/// # Errors
///
/// Returns [`FeedError::Io`] (or [`FeedError::Parse`] on serialization
/// failure) only when the output document cannot be written. Upstream
/// failures never surface here; they produce a fallback feed instead.
pub async fn run_feed_pipeline(config: &FeedConfig) -> Result<Feed, FeedError> {
    let feed = collect_feed(config).await;
    write_feed(&config.output_path, &feed).await?;
    Ok(feed)
}

/// Produces the feed for this run without writing it. Never fails.
pub async fn collect_feed(config: &FeedConfig) -> Feed {
    let now = Utc::now();
    let result = match &config.credentials {
        Some(credentials) => {
            tracing::info!(username = %config.username, "fetching posts via Graph API");
            from_graph_api(config, credentials, now).await
        }
        None => {
            tracing::info!(
                username = %config.username,
                "Graph API not configured; scraping public profile"
            );
            from_profile_page(config, now).await
        }
    };

    match result {
        Ok(feed) => feed,
        Err(e) => {
            tracing::warn!(
                username = %config.username,
                error = %e,
                "feed acquisition failed; writing fallback feed"
            );
            fallback_feed(&config.username, config.max_posts, now)
                .with_error(e.feed_message())
                .with_api_configured(config.api_configured())
        }
    }
}

async fn from_graph_api(
    config: &FeedConfig,
    credentials: &Credentials,
    now: DateTime<Utc>,
) -> Result<Feed, FeedError> {
    let api = GraphApiClient::new(
        credentials.clone(),
        config.api_timeout_secs,
        &config.api_user_agent,
        &config.graph_api_base_url,
    )?;

    let media = api.fetch_media(config.max_posts).await?;
    let fetched = media.len();
    let mut posts = normalize_api_media(media, config.max_posts, now);
    if posts.is_empty() {
        return Err(FeedError::EmptyResult {
            context: format!("Graph API returned {fetched} media items, none of them images"),
        });
    }
    tracing::info!(fetched, kept = posts.len(), "normalized Graph API media");

    if config.download_images {
        cache_images(config, api.http(), &mut posts, ImageChoice::Full).await;
    }

    Ok(Feed::new(&config.username, now, posts, config.max_posts)
        .with_source(FeedSource::GraphApi)
        .with_api_configured(true))
}

async fn from_profile_page(config: &FeedConfig, now: DateTime<Utc>) -> Result<Feed, FeedError> {
    let url = profile_url(&config.profile_base_url, &config.username)?;
    let client = FeedClient::browser(config.scrape_timeout_secs)?;
    let html = client.get_text(&url).await?;

    let scraped = Extractor::new(config.max_posts).extract(&html);
    let mut posts = normalize_scraped(scraped, config.max_posts, now);
    if posts.is_empty() {
        return Err(FeedError::EmptyResult {
            context: format!("no posts could be extracted from {url}"),
        });
    }

    if config.download_images {
        cache_images(config, &client, &mut posts, ImageChoice::Thumbnail).await;
    }

    Ok(Feed::new(&config.username, now, posts, config.max_posts)
        .with_source(FeedSource::ProfileScrape))
}

async fn cache_images(
    config: &FeedConfig,
    client: &FeedClient,
    posts: &mut [igfeed_core::Post],
    choice: ImageChoice,
) {
    if let Err(e) = attach_local_images(
        client,
        posts,
        &config.images_dir,
        &config.image_public_prefix,
        choice,
    )
    .await
    {
        tracing::warn!(error = %e, "image cache unavailable; keeping remote URLs");
    }
}
