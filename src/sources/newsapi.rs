//! NewsAPI top-headlines adapter.
//!
//! Queries [NewsAPI](https://newsapi.org/docs/endpoints/top-headlines) for US
//! top headlines in one category. The publisher is a nested `source` object
//! and the lead image a flat `urlToImage` field.

use super::{
    Source, SourceContext, SourceError, get_json, normalize_timestamp, or_empty, or_sentinel,
};
use crate::models::{DEFAULT_IMAGE, NO_DESCRIPTION, NO_TITLE, NormalizedArticle, UNKNOWN_SOURCE};
use serde::Deserialize;
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
struct TopHeadlines {
    articles: Option<Vec<RawArticle>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub source: Option<RawSource>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Map one NewsAPI article into the shared schema.
pub fn normalize(raw: RawArticle) -> NormalizedArticle {
    NormalizedArticle {
        title: or_sentinel(raw.title, NO_TITLE),
        description: or_sentinel(raw.description, NO_DESCRIPTION),
        url: raw.url.unwrap_or_default(),
        image_url: or_sentinel(raw.url_to_image, DEFAULT_IMAGE),
        published_at: normalize_timestamp(raw.published_at.as_deref()),
        source_name: or_sentinel(raw.source.and_then(|s| s.name), UNKNOWN_SOURCE),
    }
}

/// Fetch US top headlines for `category`. Returns an empty list on any failure.
#[instrument(level = "info", skip_all, fields(%category))]
pub async fn fetch_headlines(ctx: &SourceContext, category: &str) -> Vec<NormalizedArticle> {
    let articles = or_empty(Source::NewsApi, fetch(ctx, category).await);
    info!(count = articles.len(), "Fetched NewsAPI headlines");
    articles
}

async fn fetch(ctx: &SourceContext, category: &str) -> Result<Vec<NormalizedArticle>, SourceError> {
    let key = ctx
        .credentials
        .key_for(Source::NewsApi)
        .ok_or(SourceError::MissingKey)?;

    let mut url = ctx.endpoints.newsapi.join("v2/top-headlines")?;
    url.query_pairs_mut()
        .append_pair("country", "us")
        .append_pair("category", category)
        .append_pair("apiKey", key);

    let payload: TopHeadlines = get_json(&ctx.client, url).await?;
    let raw = payload
        .articles
        .ok_or(SourceError::MissingResults("articles"))?;
    Ok(raw.into_iter().map(normalize).collect())
}
