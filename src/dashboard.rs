//! The published article set behind the headline view.
//!
//! Holds the last successful refresh, the active search term and the derived
//! filtered view. A failed refresh keeps the previous articles and records a
//! generic user-facing error; [`Dashboard::retry`] re-runs the whole cycle.

use crate::aggregator::{self, FeedEndpoint};
use crate::models::TaggedArticle;
use tracing::{error, info, instrument};

/// The only error text ever shown to the user.
pub const GENERIC_ERROR: &str = "Failed to load news. Please try again later.";

#[derive(Debug)]
pub struct Dashboard<F> {
    feed: F,
    articles: Vec<TaggedArticle>,
    search: String,
    filtered: Vec<TaggedArticle>,
    error: Option<&'static str>,
}

impl<F: FeedEndpoint> Dashboard<F> {
    pub fn new(feed: F) -> Self {
        Self {
            feed,
            articles: Vec::new(),
            search: String::new(),
            filtered: Vec::new(),
            error: None,
        }
    }

    /// Run a refresh cycle. Returns `true` when new articles were published.
    #[instrument(level = "info", skip_all)]
    pub async fn refresh(&mut self) -> bool {
        match aggregator::refresh(&self.feed).await {
            Ok(articles) => {
                info!(count = articles.len(), "Published refreshed articles");
                self.articles = articles;
                self.error = None;
                self.apply_filter();
                true
            }
            Err(e) => {
                error!(error = %e, kept = self.articles.len(), "Refresh failed; keeping previous articles");
                self.error = Some(GENERIC_ERROR);
                false
            }
        }
    }

    /// Manual retry: the full cycle from the fan-out step.
    pub async fn retry(&mut self) -> bool {
        self.refresh().await
    }

    pub fn set_search(&mut self, term: &str) {
        if self.search != term {
            self.search = term.to_string();
            self.apply_filter();
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Every article of the last successful refresh.
    pub fn articles(&self) -> &[TaggedArticle] {
        &self.articles
    }

    /// The articles matching the current search term.
    pub fn visible(&self) -> &[TaggedArticle] {
        &self.filtered
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    fn apply_filter(&mut self) {
        self.filtered = aggregator::filter_articles(&self.articles, &self.search);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::tests::FakeFeed;
    use crate::models::{ApiOrigin, article};
    use crate::sources::Source;
    use reqwest::StatusCode;

    fn healthy_feed() -> FakeFeed {
        FakeFeed::default()
            .with(
                Source::NewsApi,
                vec![article("Climate bill advances", "Senate vote"), article("Markets rally", "Stocks up")],
            )
            .with(Source::Mediastack, vec![article("Markets rally", "Stocks up")])
            .with(Source::NyTimes, vec![article("Retail slows", "Spending dips")])
    }

    #[tokio::test]
    async fn test_refresh_publishes_deduplicated_articles() {
        let mut dashboard = Dashboard::new(healthy_feed());

        assert!(dashboard.refresh().await);
        assert_eq!(dashboard.articles().len(), 3);
        assert_eq!(dashboard.visible().len(), 3);
        assert_eq!(dashboard.error(), None);
        assert_eq!(dashboard.articles()[2].api_origin, ApiOrigin::NyTimes);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let mut dashboard = Dashboard::new(healthy_feed());
        dashboard.refresh().await;

        dashboard.set_search("climate");
        assert_eq!(dashboard.visible().len(), 1);
        assert_eq!(dashboard.visible()[0].article.title, "Climate bill advances");

        dashboard.set_search("");
        assert_eq!(dashboard.visible().len(), 3);
    }

    #[tokio::test]
    async fn test_search_survives_refresh() {
        let mut dashboard = Dashboard::new(healthy_feed());
        dashboard.set_search("MARKETS");
        dashboard.refresh().await;

        assert_eq!(dashboard.search(), "MARKETS");
        assert_eq!(dashboard.visible().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_shows_error_without_partial_list() {
        let feed = FakeFeed::default()
            .with(Source::NewsApi, vec![article("A", "a")])
            .failing(Source::NyTimes, StatusCode::INTERNAL_SERVER_ERROR);
        let mut dashboard = Dashboard::new(feed);

        assert!(!dashboard.refresh().await);
        assert_eq!(dashboard.error(), Some(GENERIC_ERROR));
        assert!(dashboard.articles().is_empty());
        assert!(dashboard.visible().is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_articles() {
        let mut dashboard = Dashboard::new(healthy_feed());
        dashboard.refresh().await;
        let before = dashboard.articles().to_vec();

        dashboard.feed = healthy_feed().failing(Source::Mediastack, StatusCode::BAD_GATEWAY);
        assert!(!dashboard.retry().await);

        assert_eq!(dashboard.error(), Some(GENERIC_ERROR));
        assert_eq!(dashboard.articles(), before.as_slice());
    }

    #[tokio::test]
    async fn test_retry_clears_error_after_recovery() {
        let mut dashboard =
            Dashboard::new(FakeFeed::default().failing(Source::NewsApi, StatusCode::SERVICE_UNAVAILABLE));
        dashboard.refresh().await;
        assert!(dashboard.error().is_some());

        dashboard.feed = healthy_feed();
        assert!(dashboard.retry().await);
        assert_eq!(dashboard.error(), None);
        assert_eq!(dashboard.articles().len(), 3);
    }
}
