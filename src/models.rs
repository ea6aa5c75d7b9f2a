//! Data models shared by the source adapters, the aggregation endpoint and the
//! client aggregator.
//!
//! This module defines the core data structures used throughout the application:
//! - [`NormalizedArticle`]: The single article schema every adapter produces
//! - [`ApiOrigin`]: Which of the three integrated APIs an article came from
//! - [`TaggedArticle`]: A normalized article tagged with its [`ApiOrigin`]
//!
//! Field names serialize in camelCase to match the JSON served by
//! `GET /api/news`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Substituted when an upstream article has no title.
pub const NO_TITLE: &str = "No title available";
/// Substituted when an upstream article has no description.
pub const NO_DESCRIPTION: &str = "No description available";
/// Placeholder image path used when an upstream article carries no image.
pub const DEFAULT_IMAGE: &str = "/default-news.jpg";
/// Substituted when the publication date is absent or unparseable.
pub const DATE_UNAVAILABLE: &str = "Date not available";
/// Publisher fallback for adapters whose upstream names the outlet per article.
pub const UNKNOWN_SOURCE: &str = "Unknown source";

/// A news article normalized from one of the upstream API shapes.
///
/// Every field is always populated: adapters replace missing upstream data
/// with the sentinel constants of this module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedArticle {
    /// The article headline, or [`NO_TITLE`].
    pub title: String,
    /// The article summary, or [`NO_DESCRIPTION`].
    pub description: String,
    /// Canonical link to the original story.
    pub url: String,
    /// Lead image URL, or [`DEFAULT_IMAGE`].
    pub image_url: String,
    /// RFC 3339 UTC timestamp, or [`DATE_UNAVAILABLE`].
    pub published_at: String,
    /// The publishing outlet (distinct from [`ApiOrigin`]).
    pub source_name: String,
}

/// The integrated API an article was retrieved through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ApiOrigin {
    #[serde(rename = "NewsAPI")]
    NewsApi,
    #[serde(rename = "MediaStack API")]
    Mediastack,
    #[serde(rename = "NYTimes")]
    NyTimes,
}

impl ApiOrigin {
    /// Human-readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            ApiOrigin::NewsApi => "NewsAPI",
            ApiOrigin::Mediastack => "MediaStack API",
            ApiOrigin::NyTimes => "NYTimes",
        }
    }
}

impl fmt::Display for ApiOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A normalized article tagged with the API it was merged from.
///
/// Only the client aggregator builds these, once per article, at merge time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedArticle {
    #[serde(flatten)]
    pub article: NormalizedArticle,
    pub api_origin: ApiOrigin,
}

impl TaggedArticle {
    pub fn new(article: NormalizedArticle, api_origin: ApiOrigin) -> Self {
        Self {
            article,
            api_origin,
        }
    }
}

#[cfg(test)]
pub(crate) fn article(title: &str, description: &str) -> NormalizedArticle {
    NormalizedArticle {
        title: title.to_string(),
        description: description.to_string(),
        url: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
        image_url: DEFAULT_IMAGE.to_string(),
        published_at: DATE_UNAVAILABLE.to_string(),
        source_name: "Example Times".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_article_serializes_camel_case() {
        let json = serde_json::to_value(article("Markets rally", "Stocks up")).unwrap();

        assert_eq!(json["title"], "Markets rally");
        assert_eq!(json["imageUrl"], DEFAULT_IMAGE);
        assert_eq!(json["publishedAt"], DATE_UNAVAILABLE);
        assert_eq!(json["sourceName"], "Example Times");
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_normalized_article_deserialization() {
        let json = r#"{
            "title": "Fed holds rates",
            "description": "No change this quarter",
            "url": "https://example.com/fed",
            "imageUrl": "https://example.com/fed.jpg",
            "publishedAt": "2025-05-06T14:30:00.000Z",
            "sourceName": "Reuters"
        }"#;

        let article: NormalizedArticle = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Fed holds rates");
        assert_eq!(article.image_url, "https://example.com/fed.jpg");
        assert_eq!(article.source_name, "Reuters");
    }

    #[test]
    fn test_tagged_article_is_flat() {
        let tagged = TaggedArticle::new(article("X", "Y"), ApiOrigin::Mediastack);
        let json = serde_json::to_value(&tagged).unwrap();

        assert_eq!(json["title"], "X");
        assert_eq!(json["description"], "Y");
        assert_eq!(json["apiOrigin"], "MediaStack API");
        assert!(json.get("article").is_none());
    }

    #[test]
    fn test_api_origin_labels() {
        assert_eq!(ApiOrigin::NewsApi.to_string(), "NewsAPI");
        assert_eq!(ApiOrigin::Mediastack.to_string(), "MediaStack API");
        assert_eq!(ApiOrigin::NyTimes.to_string(), "NYTimes");
        assert_eq!(
            serde_json::to_string(&ApiOrigin::NyTimes).unwrap(),
            "\"NYTimes\""
        );
    }
}
