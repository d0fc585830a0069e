//! Shared types and configuration for the Instagram feed pipeline.
//!
//! The [`Feed`] document written here is the only contract between the
//! scraper and the site's rendering layer.

pub mod app_config;
pub mod config;
pub mod display;
pub mod feed;
pub mod image;

use thiserror::Error;

pub use app_config::{Credentials, FeedConfig};
pub use config::{load_feed_config, load_feed_config_from_env};
pub use display::{classify_feed_file, FeedAvailability, DISPLAY_POST_LIMIT};
pub use feed::{Feed, FeedSource, Post, MAX_POSTS_CEILING};
pub use image::{resolve_image_url, PLACEHOLDER_IMAGE_PATH};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
