//! Mediastack live news adapter.
//!
//! Queries [Mediastack](https://mediastack.com/documentation) for English
//! articles in one category. Unlike NewsAPI the publisher is a flat string and
//! the image lives in `image`.

use super::{
    Source, SourceContext, SourceError, get_json, normalize_timestamp, or_empty, or_sentinel,
};
use crate::models::{DEFAULT_IMAGE, NO_DESCRIPTION, NO_TITLE, NormalizedArticle, UNKNOWN_SOURCE};
use serde::Deserialize;
use tracing::{info, instrument};

/// Articles requested per call.
const PAGE_LIMIT: u32 = 20;

#[derive(Debug, Deserialize)]
struct NewsPage {
    data: Option<Vec<RawArticle>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub published_at: Option<String>,
    pub source: Option<String>,
}

pub fn normalize(raw: RawArticle) -> NormalizedArticle {
    NormalizedArticle {
        title: or_sentinel(raw.title, NO_TITLE),
        description: or_sentinel(raw.description, NO_DESCRIPTION),
        url: raw.url.unwrap_or_default(),
        image_url: or_sentinel(raw.image, DEFAULT_IMAGE),
        published_at: normalize_timestamp(raw.published_at.as_deref()),
        source_name: or_sentinel(raw.source, UNKNOWN_SOURCE),
    }
}

/// Fetch the latest English articles for `category`. Returns an empty list on any failure.
#[instrument(level = "info", skip_all, fields(%category))]
pub async fn fetch_headlines(ctx: &SourceContext, category: &str) -> Vec<NormalizedArticle> {
    let articles = or_empty(Source::Mediastack, fetch(ctx, category).await);
    info!(count = articles.len(), "Fetched Mediastack headlines");
    articles
}

async fn fetch(ctx: &SourceContext, category: &str) -> Result<Vec<NormalizedArticle>, SourceError> {
    let key = ctx
        .credentials
        .key_for(Source::Mediastack)
        .ok_or(SourceError::MissingKey)?;

    let mut url = ctx.endpoints.mediastack.join("v1/news")?;
    url.query_pairs_mut()
        .append_pair("access_key", key)
        .append_pair("categories", category)
        .append_pair("languages", "en")
        .append_pair("limit", &PAGE_LIMIT.to_string());

    let payload: NewsPage = get_json(&ctx.client, url).await?;
    let raw = payload.data.ok_or(SourceError::MissingResults("data"))?;
    Ok(raw.into_iter().map(normalize).collect())
}
