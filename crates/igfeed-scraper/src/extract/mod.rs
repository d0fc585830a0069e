//! Post extraction from raw profile-page HTML.
//!
//! Tries extraction strategies in priority order (embedded `_sharedData`
//! blob, timeline-media fragment, positional regex pairing) and returns the
//! first non-empty result. Returns an empty list when nothing matches; the
//! pipeline decides what an empty result means.

mod json_scan;
mod regex_pairs;
mod shared_data;
mod timeline_fragment;

pub use regex_pairs::RegexPairStrategy;
pub use shared_data::SharedDataStrategy;
pub use timeline_fragment::TimelineFragmentStrategy;

use crate::error::FeedError;
use crate::types::TimelineNode;

/// A post descriptor recovered from a profile page, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapedPost {
    /// A structured GraphQL timeline node.
    Timeline(TimelineNode),
    /// A shortcode and display URL paired by position only.
    Fragment {
        shortcode: String,
        display_url: String,
    },
}

/// One way of recovering posts from profile-page HTML.
///
/// Return `Ok(vec![])` when the markers the strategy looks for are absent,
/// and `Err` when they are present but unparseable. Both make the
/// [`Extractor`] move on to the next strategy.
pub trait ExtractStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Extract at most `limit` posts from `html`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Parse`] when an embedded payload is malformed.
    fn extract(&self, html: &str, limit: usize) -> Result<Vec<ScrapedPost>, FeedError>;
}

/// Runs a fixed, ordered list of [`ExtractStrategy`]s.
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractStrategy>>,
    limit: usize,
}

impl Extractor {
    /// The default strategy chain, strongest first.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self::with_strategies(
            vec![
                Box::new(SharedDataStrategy),
                Box::new(TimelineFragmentStrategy),
                Box::new(RegexPairStrategy),
            ],
            limit,
        )
    }

    #[must_use]
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractStrategy>>, limit: usize) -> Self {
        Self { strategies, limit }
    }

    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Returns the posts of the first strategy that yields any, capped at the
    /// extractor's limit.
    #[must_use]
    pub fn extract(&self, html: &str) -> Vec<ScrapedPost> {
        for strategy in &self.strategies {
            match strategy.extract(html, self.limit) {
                Ok(mut posts) if !posts.is_empty() => {
                    posts.truncate(self.limit);
                    tracing::info!(
                        strategy = strategy.name(),
                        count = posts.len(),
                        "extracted posts from profile page"
                    );
                    return posts;
                }
                Ok(_) => {
                    tracing::debug!(strategy = strategy.name(), "strategy found no posts");
                }
                Err(e) => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        error = %e,
                        "strategy failed; trying next"
                    );
                }
            }
        }

        tracing::warn!("no extraction strategy produced posts");
        Vec::new()
    }
}

/// Parses a JSON array of `{ "node": {...} }` edges, keeping usable nodes.
///
/// Edges that do not deserialize are skipped individually.
pub(crate) fn usable_nodes(edges: &[serde_json::Value], limit: usize) -> Vec<ScrapedPost> {
    edges
        .iter()
        .filter_map(|edge| serde_json::from_value::<crate::types::TimelineEdge>(edge.clone()).ok())
        .map(|edge| edge.node)
        .filter(TimelineNode::is_usable)
        .take(limit)
        .map(ScrapedPost::Timeline)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, Result<usize, ()>);

    impl ExtractStrategy for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn extract(&self, _html: &str, _limit: usize) -> Result<Vec<ScrapedPost>, FeedError> {
            match self.1 {
                Ok(n) => Ok((0..n)
                    .map(|i| ScrapedPost::Fragment {
                        shortcode: format!("{}-{i}", self.0),
                        display_url: format!("https://cdn.example.com/{i}.jpg"),
                    })
                    .collect()),
                Err(()) => Err(FeedError::Parse {
                    context: self.0.to_owned(),
                    source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
                }),
            }
        }
    }

    #[test]
    fn default_chain_order() {
        assert_eq!(
            Extractor::new(9).strategy_names(),
            vec!["shared_data", "timeline_fragment", "regex_pairs"]
        );
    }

    #[test]
    fn first_non_empty_strategy_wins() {
        let extractor = Extractor::with_strategies(
            vec![
                Box::new(Fixed("empty", Ok(0))),
                Box::new(Fixed("second", Ok(2))),
                Box::new(Fixed("third", Ok(5))),
            ],
            9,
        );
        let posts = extractor.extract("");
        assert_eq!(posts.len(), 2);
        assert!(matches!(&posts[0], ScrapedPost::Fragment { shortcode, .. } if shortcode == "second-0"));
    }

    #[test]
    fn failing_strategy_falls_through() {
        let extractor = Extractor::with_strategies(
            vec![Box::new(Fixed("broken", Err(()))), Box::new(Fixed("ok", Ok(1)))],
            9,
        );
        assert_eq!(extractor.extract("").len(), 1);
    }

    #[test]
    fn no_strategy_yields_empty_list() {
        let extractor = Extractor::with_strategies(
            vec![Box::new(Fixed("broken", Err(()))), Box::new(Fixed("empty", Ok(0)))],
            9,
        );
        assert!(extractor.extract("").is_empty());
    }

    #[test]
    fn result_is_capped_at_limit() {
        let extractor = Extractor::with_strategies(vec![Box::new(Fixed("many", Ok(20)))], 9);
        assert_eq!(extractor.extract("").len(), 9);
    }

    #[test]
    fn plain_html_yields_nothing() {
        let html = "<html><head><title>Login • Instagram</title></head><body></body></html>";
        assert!(Extractor::new(9).extract(html).is_empty());
    }
}
