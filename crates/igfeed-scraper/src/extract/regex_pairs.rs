//! Strategy 3: independent regex scans for shortcodes and display URLs.
//!
//! The i-th shortcode is paired with the i-th display URL. Nothing ties the
//! two lists together beyond their order on the page, so a pairing can be
//! wrong when the page lists them differently. The correct key is not
//! recoverable from the page text, so the approximation is kept as-is.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FeedError;

use super::{ExtractStrategy, ScrapedPost};

static SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""shortcode"\s*:\s*"([^"]+)""#).expect("valid regex"));
static DISPLAY_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""display_url"\s*:\s*"([^"]+)""#).expect("valid regex"));

pub struct RegexPairStrategy;

impl ExtractStrategy for RegexPairStrategy {
    fn name(&self) -> &'static str {
        "regex_pairs"
    }

    fn extract(&self, html: &str, limit: usize) -> Result<Vec<ScrapedPost>, FeedError> {
        let shortcodes: Vec<&str> = SHORTCODE_RE
            .captures_iter(html)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        let display_urls: Vec<String> = DISPLAY_URL_RE
            .captures_iter(html)
            .filter_map(|c| c.get(1).map(|m| unescape_url(m.as_str())))
            .collect();

        let count = shortcodes.len().min(display_urls.len()).min(limit);
        if shortcodes.len() != display_urls.len() {
            tracing::debug!(
                shortcodes = shortcodes.len(),
                display_urls = display_urls.len(),
                "unequal regex match counts; pairing by position"
            );
        }

        Ok(shortcodes
            .into_iter()
            .zip(display_urls)
            .take(count)
            .map(|(shortcode, display_url)| ScrapedPost::Fragment {
                shortcode: shortcode.to_owned(),
                display_url,
            })
            .collect())
    }
}

/// Undo the JSON escapes Instagram leaves in CDN URLs.
fn unescape_url(raw: &str) -> String {
    raw.replace("\\u0026", "&").replace("\\/", "/")
}
