//! Instagram feed acquisition: fetch, extract, normalize, fall back, write.
//!
//! [`run_feed_pipeline`] is the single entry point. It picks the Graph API
//! path when credentials are configured and the public profile scrape
//! otherwise, and always leaves a feed document behind.

pub mod client;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod graph_api;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod types;

mod images;

pub use client::{FeedClient, BROWSER_USER_AGENT};
pub use error::FeedError;
pub use extract::{ExtractStrategy, Extractor, ScrapedPost};
pub use fallback::fallback_feed;
pub use graph_api::GraphApiClient;
pub use normalize::{normalize_api_media, normalize_scraped};
pub use output::{read_feed, write_feed};
pub use pipeline::{collect_feed, run_feed_pipeline};
pub use types::{ApiAccount, ApiMedia, TimelineNode};
