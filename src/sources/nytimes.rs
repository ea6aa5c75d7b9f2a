//! New York Times Top Stories adapter.
//!
//! Queries the [Top Stories API](https://developer.nytimes.com/docs/top-stories-product/1/overview)
//! for one section. The summary is called `abstract` and the image is the
//! first entry of a nested `multimedia` array, which the API sometimes sends
//! as `null` or an empty string instead of an array.

use super::{
    Source, SourceContext, SourceError, get_json, normalize_timestamp, or_empty, or_sentinel,
};
use crate::models::{DEFAULT_IMAGE, NO_DESCRIPTION, NO_TITLE, NormalizedArticle};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

/// Only the first few stories of a section are kept.
pub const MAX_STORIES: usize = 5;

/// Publisher used when a story carries no `source`.
pub const NYTIMES_SOURCE: &str = "The New York Times";

#[derive(Debug, Deserialize)]
struct TopStories {
    results: Option<Vec<RawStory>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawStory {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub url: Option<String>,
    pub multimedia: Option<Value>,
    pub published_date: Option<String>,
    pub source: Option<String>,
}

impl RawStory {
    fn lead_image(&self) -> Option<String> {
        self.multimedia
            .as_ref()?
            .get(0)?
            .get("url")?
            .as_str()
            .map(str::to_string)
    }
}

pub fn normalize(raw: RawStory) -> NormalizedArticle {
    let image = raw.lead_image();
    NormalizedArticle {
        title: or_sentinel(raw.title, NO_TITLE),
        description: or_sentinel(raw.summary, NO_DESCRIPTION),
        url: raw.url.unwrap_or_default(),
        image_url: or_sentinel(image, DEFAULT_IMAGE),
        published_at: normalize_timestamp(raw.published_date.as_deref()),
        source_name: or_sentinel(raw.source, NYTIMES_SOURCE),
    }
}

/// Fetch the top stories of `section`, capped at [`MAX_STORIES`]. Returns an
/// empty list on any failure.
#[instrument(level = "info", skip_all, fields(%section))]
pub async fn fetch_headlines(ctx: &SourceContext, section: &str) -> Vec<NormalizedArticle> {
    let articles = or_empty(Source::NyTimes, fetch(ctx, section).await);
    info!(count = articles.len(), "Fetched NYTimes top stories");
    articles
}

async fn fetch(ctx: &SourceContext, section: &str) -> Result<Vec<NormalizedArticle>, SourceError> {
    let key = ctx
        .credentials
        .key_for(Source::NyTimes)
        .ok_or(SourceError::MissingKey)?;

    let path = format!("svc/topstories/v2/{}.json", urlencoding::encode(section));
    let mut url = ctx.endpoints.nytimes.join(&path)?;
    url.query_pairs_mut().append_pair("api-key", key);

    let payload: TopStories = get_json(&ctx.client, url).await?;
    let raw = payload.results.ok_or(SourceError::MissingResults("results"))?;
    Ok(raw.into_iter().take(MAX_STORIES).map(normalize).collect())
}
