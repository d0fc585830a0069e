//! `igfeed fetch`: one pipeline run with optional command-line overrides.

use std::path::PathBuf;

use anyhow::Context as _;
use igfeed_core::{Feed, FeedConfig};

/// Command-line values that take precedence over the environment.
#[derive(Debug, Default)]
pub(crate) struct FetchOverrides {
    pub username: Option<String>,
    pub output: Option<PathBuf>,
    pub max_posts: Option<usize>,
    pub no_images: bool,
}

pub(crate) fn apply_overrides(mut config: FeedConfig, overrides: FetchOverrides) -> FeedConfig {
    if let Some(username) = overrides.username {
        config.username = username.trim_start_matches('@').to_owned();
    }
    if let Some(output) = overrides.output {
        config.output_path = output;
    }
    if let Some(max_posts) = overrides.max_posts {
        config.max_posts = max_posts;
    }
    if overrides.no_images {
        config.download_images = false;
    }
    config
}

/// Run the pipeline once and print a one-line summary.
///
/// # Errors
///
/// Returns an error only if the feed document cannot be written.
pub(crate) async fn run_fetch(config: FeedConfig, overrides: FetchOverrides) -> anyhow::Result<()> {
    let config = apply_overrides(config, overrides);
    tracing::debug!(?config, "starting feed run");

    let feed = igfeed_scraper::run_feed_pipeline(&config)
        .await
        .with_context(|| format!("failed to write feed to {}", config.output_path.display()))?;

    println!("{}", summary_line(&feed, &config));
    Ok(())
}

pub(crate) fn summary_line(feed: &Feed, config: &FeedConfig) -> String {
    let source = feed
        .source
        .map_or_else(|| "unknown".to_owned(), |s| s.to_string());
    let mut line = format!(
        "wrote {} posts for @{} to {} (source: {source})",
        feed.total_posts,
        feed.username,
        config.output_path.display(),
    );
    if let Some(error) = &feed.error {
        line.push_str(&format!("; upstream error: {error}"));
    }
    line
}
