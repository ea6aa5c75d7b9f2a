//! Upstream news API adapters.
//!
//! Each submodule wraps one third-party headline API and maps its bespoke JSON
//! shape into a [`NormalizedArticle`].
//!
//! # Supported Sources
//!
//! | Source | Module | Query value | Result array | Notes |
//! |--------|--------|-------------|--------------|-------|
//! | NewsAPI | [`newsapi`] | `newsapi` | `articles` | US top headlines by category |
//! | Mediastack | [`mediastack`] | `mediastack` | `data` | English news, 20 per call |
//! | New York Times | [`nytimes`] | `nytimes` | `results` | Top Stories by section, first 5 only |
//!
//! # Common Patterns
//!
//! Each adapter module exports:
//! - `normalize(raw)`: Pure field mapping applying the sentinel fallbacks
//! - `fetch_headlines(ctx, category)`: One outbound GET, never fails
//!
//! Adapters degrade to an empty list on every failure (missing key, network
//! error, non-success status, malformed payload) and log a warning instead,
//! so one upstream outage never hides the other two sources.

pub mod mediastack;
pub mod newsapi;
pub mod nytimes;

use crate::models::{ApiOrigin, DATE_UNAVAILABLE, NormalizedArticle};
use crate::utils::truncate_for_log;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// The closed set of upstream APIs, in fixed merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    NewsApi,
    Mediastack,
    NyTimes,
}

impl Source {
    /// Every source, in the order their articles are merged.
    pub const ALL: [Source; 3] = [Source::NewsApi, Source::Mediastack, Source::NyTimes];

    /// Parse the `source` query parameter of `GET /api/news`.
    pub fn from_query(value: &str) -> Option<Source> {
        match value {
            "newsapi" => Some(Source::NewsApi),
            "mediastack" => Some(Source::Mediastack),
            "nytimes" => Some(Source::NyTimes),
            _ => None,
        }
    }

    /// The value sent as the `source` query parameter.
    pub fn query_value(self) -> &'static str {
        match self {
            Source::NewsApi => "newsapi",
            Source::Mediastack => "mediastack",
            Source::NyTimes => "nytimes",
        }
    }

    pub fn origin(self) -> ApiOrigin {
        match self {
            Source::NewsApi => ApiOrigin::NewsApi,
            Source::Mediastack => ApiOrigin::Mediastack,
            Source::NyTimes => ApiOrigin::NyTimes,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_value())
    }
}

/// API keys for the three upstreams. Any of them may be absent.
#[derive(Clone, Default)]
pub struct Credentials {
    pub newsapi: Option<String>,
    pub mediastack: Option<String>,
    pub nytimes: Option<String>,
}

impl Credentials {
    pub fn key_for(&self, source: Source) -> Option<&str> {
        let key = match source {
            Source::NewsApi => &self.newsapi,
            Source::Mediastack => &self.mediastack,
            Source::NyTimes => &self.nytimes,
        };
        key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

// Keys never reach the logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("newsapi", &self.newsapi.is_some())
            .field("mediastack", &self.mediastack.is_some())
            .field("nytimes", &self.nytimes.is_some())
            .finish()
    }
}

/// Origins of the upstream APIs. Overridable so tests can point at a mock server.
#[derive(Debug, Clone)]
pub struct UpstreamEndpoints {
    pub newsapi: Url,
    pub mediastack: Url,
    pub nytimes: Url,
}

pub const NEWSAPI_BASE_URL: &str = "https://newsapi.org";
pub const MEDIASTACK_BASE_URL: &str = "http://api.mediastack.com";
pub const NYTIMES_BASE_URL: &str = "https://api.nytimes.com";

impl UpstreamEndpoints {
    pub fn parse(newsapi: &str, mediastack: &str, nytimes: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            newsapi: Url::parse(newsapi)?,
            mediastack: Url::parse(mediastack)?,
            nytimes: Url::parse(nytimes)?,
        })
    }
}

/// Everything an adapter needs for one outbound call, injected by the caller.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub client: Client,
    pub credentials: Credentials,
    pub endpoints: UpstreamEndpoints,
}

impl SourceContext {
    pub fn new(client: Client, credentials: Credentials, endpoints: UpstreamEndpoints) -> Self {
        Self {
            client,
            credentials,
            endpoints,
        }
    }
}

/// Why an adapter produced no articles. Only ever logged.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no API key configured")]
    MissingKey,

    #[error("request failed: {0}")]
    Http(reqwest::Error),

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("payload has no `{0}` array")]
    MissingResults(&'static str),

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        // The request URL carries the API key.
        SourceError::Http(e.without_url())
    }
}

/// Run the adapter matching `source`.
pub async fn fetch_source(
    ctx: &SourceContext,
    source: Source,
    category: &str,
) -> Vec<NormalizedArticle> {
    match source {
        Source::NewsApi => newsapi::fetch_headlines(ctx, category).await,
        Source::Mediastack => mediastack::fetch_headlines(ctx, category).await,
        Source::NyTimes => nytimes::fetch_headlines(ctx, category).await,
    }
}

/// Turn an adapter result into the best-effort article list, logging failures.
pub(crate) fn or_empty(
    source: Source,
    result: Result<Vec<NormalizedArticle>, SourceError>,
) -> Vec<NormalizedArticle> {
    match result {
        Ok(articles) => {
            debug!(%source, count = articles.len(), "Normalized upstream articles");
            articles
        }
        Err(e) => {
            warn!(%source, error = %e, "Upstream fetch failed; returning no articles");
            Vec::new()
        }
    }
}

/// Issue one GET and decode the JSON body, rejecting non-success statuses.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
) -> Result<T, SourceError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(SourceError::Status {
            status,
            body: truncate_for_log(&body, 200),
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Use `value` unless it is absent or blank, otherwise `fallback`.
pub(crate) fn or_sentinel(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Normalize an upstream timestamp to RFC 3339 UTC with millisecond precision.
///
/// Accepts RFC 3339, offsets without a colon (`+0000`), naive date-times
/// (taken as UTC) and bare dates. Anything else becomes [`DATE_UNAVAILABLE`].
pub(crate) fn normalize_timestamp(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return DATE_UNAVAILABLE.to_string();
    };

    let parsed = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|n| n.and_utc()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|n| n.and_utc()))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|n| n.and_utc())
        });

    match parsed {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => DATE_UNAVAILABLE.to_string(),
    }
}

#[cfg(test)]
pub(crate) fn test_context(base: &str, credentials: Credentials) -> SourceContext {
    SourceContext::new(
        Client::new(),
        credentials,
        UpstreamEndpoints::parse(base, base, base).unwrap(),
    )
}

#[cfg(test)]
pub(crate) fn all_keys() -> Credentials {
    Credentials {
        newsapi: Some("newsapi-key".to_string()),
        mediastack: Some("mediastack-key".to_string()),
        nytimes: Some("nytimes-key".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_from_query() {
        assert_eq!(Source::from_query("newsapi"), Some(Source::NewsApi));
        assert_eq!(Source::from_query("mediastack"), Some(Source::Mediastack));
        assert_eq!(Source::from_query("nytimes"), Some(Source::NyTimes));
        assert_eq!(Source::from_query("NewsAPI"), None);
        assert_eq!(Source::from_query(""), None);
        assert_eq!(Source::from_query("guardian"), None);
    }

    #[test]
    fn test_source_order_and_origins() {
        let origins: Vec<ApiOrigin> = Source::ALL.iter().map(|s| s.origin()).collect();
        assert_eq!(
            origins,
            vec![ApiOrigin::NewsApi, ApiOrigin::Mediastack, ApiOrigin::NyTimes]
        );
        for source in Source::ALL {
            assert_eq!(Source::from_query(source.query_value()), Some(source));
        }
    }

    #[test]
    fn test_credentials_blank_key_is_missing() {
        let creds = Credentials {
            newsapi: Some("  ".to_string()),
            mediastack: None,
            nytimes: Some("abc".to_string()),
        };
        assert_eq!(creds.key_for(Source::NewsApi), None);
        assert_eq!(creds.key_for(Source::Mediastack), None);
        assert_eq!(creds.key_for(Source::NyTimes), Some("abc"));
    }

    #[test]
    fn test_credentials_debug_hides_keys() {
        let rendered = format!("{:?}", all_keys());
        assert!(!rendered.contains("newsapi-key"));
        assert!(rendered.contains("newsapi: true"));
    }

    #[test]
    fn test_or_sentinel() {
        assert_eq!(or_sentinel(Some("Title".to_string()), "fallback"), "Title");
        assert_eq!(or_sentinel(Some(String::new()), "fallback"), "fallback");
        assert_eq!(or_sentinel(None, "fallback"), "fallback");
    }

    #[test]
    fn test_normalize_timestamp_formats() {
        assert_eq!(
            normalize_timestamp(Some("2025-05-06T14:30:00Z")),
            "2025-05-06T14:30:00.000Z"
        );
        assert_eq!(
            normalize_timestamp(Some("2025-05-06T10:30:00-04:00")),
            "2025-05-06T14:30:00.000Z"
        );
        assert_eq!(
            normalize_timestamp(Some("2025-05-06T14:30:00+0000")),
            "2025-05-06T14:30:00.000Z"
        );
        assert_eq!(
            normalize_timestamp(Some("2025-05-06")),
            "2025-05-06T00:00:00.000Z"
        );
    }

    #[test]
    fn test_normalize_timestamp_unavailable() {
        assert_eq!(normalize_timestamp(None), DATE_UNAVAILABLE);
        assert_eq!(normalize_timestamp(Some("")), DATE_UNAVAILABLE);
        assert_eq!(normalize_timestamp(Some("yesterday")), DATE_UNAVAILABLE);
    }

    #[test]
    fn test_upstream_endpoints_parse_rejects_garbage() {
        assert!(UpstreamEndpoints::parse("not a url", MEDIASTACK_BASE_URL, NYTIMES_BASE_URL).is_err());
        let endpoints =
            UpstreamEndpoints::parse(NEWSAPI_BASE_URL, MEDIASTACK_BASE_URL, NYTIMES_BASE_URL).unwrap();
        assert_eq!(endpoints.nytimes.host_str(), Some("api.nytimes.com"));
    }
}
