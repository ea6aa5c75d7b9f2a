//! # headline_hub
//!
//! A news aggregation service that fetches top business headlines from three
//! third-party APIs, normalizes their response shapes into one article schema
//! and merges them into a single deduplicated feed.
//!
//! ## Features
//!
//! - Proxies NewsAPI, Mediastack and the New York Times Top Stories API behind
//!   `GET /api/news?source=…`, so API keys never reach the client
//! - Maps each upstream shape into one article record, substituting fixed
//!   placeholders for missing titles, descriptions, images and dates
//! - Degrades a failing upstream to an empty list instead of an error
//! - Merges all three sources in fixed order and drops repeated
//!   `(title, description)` pairs
//!
//! ## Usage
//!
//! ```sh
//! headline_hub serve --bind 127.0.0.1:3000
//! headline_hub headlines --endpoint http://127.0.0.1:3000 --search climate
//! ```
//!
//! ## Architecture
//!
//! 1. **Adapters** (`sources`): one outbound GET per upstream, mapped to `NormalizedArticle`
//! 2. **Endpoint** (`server`): runs exactly one adapter per request
//! 3. **Aggregator** (`aggregator`): parallel fan-out to the endpoint, fan-in, merge, dedupe
//! 4. **Dashboard** (`dashboard`): the published feed plus the search view

pub mod aggregator;
pub mod cache;
pub mod cli;
pub mod dashboard;
pub mod models;
pub mod server;
pub mod sources;
pub mod utils;
