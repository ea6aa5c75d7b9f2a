//! Client-side aggregation over the three `/api/news` sources.
//!
//! A refresh cycle:
//! 1. **Fan-out**: request every [`Source`] from the endpoint concurrently
//! 2. **Fan-in**: wait for all three responses, success or not
//! 3. **All-or-nothing**: any failed response fails the whole refresh
//! 4. **Merge**: tag each article with its [`ApiOrigin`](crate::models::ApiOrigin) and concatenate in
//!    the fixed order NewsAPI, Mediastack, NYTimes (never arrival order)
//! 5. **Dedupe**: keep the first article of each `(title, description)` pair

use crate::models::{NormalizedArticle, TaggedArticle};
use crate::sources::Source;
use crate::utils::contains_ignore_case;
use itertools::Itertools;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info, instrument};
use url::Url;

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("request for {feed} failed: {error}")]
    Http {
        feed: Source,
        #[source]
        error: reqwest::Error,
    },

    #[error("endpoint answered {status} for {feed}")]
    Status { feed: Source, status: StatusCode },

    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

/// One call to the aggregation endpoint for a single source.
#[allow(async_fn_in_trait)]
pub trait FeedEndpoint {
    async fn fetch(&self, source: Source) -> Result<Vec<NormalizedArticle>, RefreshError>;
}

/// [`FeedEndpoint`] backed by a running `headline_hub serve` instance.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: Client,
    news_url: Url,
}

impl HttpFeed {
    pub fn new(client: Client, endpoint: &Url) -> Result<Self, RefreshError> {
        Ok(Self {
            client,
            news_url: endpoint.join("api/news")?,
        })
    }
}

impl FeedEndpoint for HttpFeed {
    #[instrument(level = "info", skip_all, fields(%source))]
    async fn fetch(&self, source: Source) -> Result<Vec<NormalizedArticle>, RefreshError> {
        let http = |error: reqwest::Error| RefreshError::Http { feed: source, error };

        let response = self
            .client
            .get(self.news_url.clone())
            .query(&[("source", source.query_value())])
            .send()
            .await
            .map_err(http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RefreshError::Status { feed: source, status });
        }
        let articles: Vec<NormalizedArticle> = response.json().await.map_err(http)?;
        debug!(count = articles.len(), "Received articles");
        Ok(articles)
    }
}

/// Run one full refresh cycle and return the merged, deduplicated feed.
#[instrument(level = "info", skip_all)]
pub async fn refresh<F: FeedEndpoint>(feed: &F) -> Result<Vec<TaggedArticle>, RefreshError> {
    let [a, b, c] = Source::ALL;
    let (a_res, b_res, c_res) = futures::join!(feed.fetch(a), feed.fetch(b), feed.fetch(c));

    let batches = vec![(a, a_res?), (b, b_res?), (c, c_res?)];
    let merged = merge(batches);
    let merged_count = merged.len();
    let unique = dedupe(merged);

    info!(
        merged = merged_count,
        unique = unique.len(),
        duplicates = merged_count - unique.len(),
        "Refreshed headlines"
    );
    Ok(unique)
}

/// Tag every article with its source's origin and concatenate the batches in
/// the order given.
pub fn merge(batches: Vec<(Source, Vec<NormalizedArticle>)>) -> Vec<TaggedArticle> {
    batches
        .into_iter()
        .flat_map(|(source, articles)| {
            articles
                .into_iter()
                .map(move |article| TaggedArticle::new(article, source.origin()))
        })
        .collect()
}

/// Drop every article whose `(title, description)` pair was already seen,
/// keeping the first occurrence and the original order.
pub fn dedupe(articles: Vec<TaggedArticle>) -> Vec<TaggedArticle> {
    articles
        .into_iter()
        .unique_by(|t| (t.article.title.clone(), t.article.description.clone()))
        .collect()
}

/// Articles whose title or description contains `term`, ignoring case.
/// A blank term matches everything.
pub fn filter_articles(articles: &[TaggedArticle], term: &str) -> Vec<TaggedArticle> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return articles.to_vec();
    }
    articles
        .iter()
        .filter(|t| {
            contains_ignore_case(&t.article.title, &needle)
                || contains_ignore_case(&t.article.description, &needle)
        })
        .cloned()
        .collect()
}
