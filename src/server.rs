//! The aggregation endpoint: `GET /api/news?source=…`.
//!
//! Acts as a server-side proxy so upstream API keys never leave the process.
//! Each request runs exactly one source adapter and always answers `200 OK`
//! with a (possibly empty) JSON array.

use crate::cache::RevalidationCache;
use crate::models::NormalizedArticle;
use crate::sources::{self, Source, SourceContext};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::collections::HashMap;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, instrument};

/// Category (NewsAPI, Mediastack) or section (NYTimes) every request uses.
pub const CATEGORY: &str = "business";

#[derive(Clone)]
pub struct AppState {
    ctx: Arc<SourceContext>,
    cache: Option<Arc<RevalidationCache>>,
}

impl AppState {
    pub fn new(ctx: SourceContext, cache: Option<RevalidationCache>) -> Self {
        Self {
            ctx: Arc::new(ctx),
            cache: cache.map(Arc::new),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/news", get(news_handler))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
#[instrument(level = "info", skip_all, fields(%addr))]
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), Box<dyn Error>> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "headline_hub listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// The raw map never rejects, so unknown or repeated parameters still get a 200.
async fn news_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<NormalizedArticle>> {
    let Some(source) = params.get("source").and_then(|v| Source::from_query(v)) else {
        debug!(source = ?params.get("source"), "Unknown or missing source; returning empty list");
        return Json(Vec::new());
    };
    Json(articles_for(&state, source).await)
}

#[instrument(level = "info", skip_all, fields(%source))]
async fn articles_for(state: &AppState, source: Source) -> Vec<NormalizedArticle> {
    if let Some(cache) = &state.cache {
        if let Some(articles) = cache.get(source).await {
            return articles;
        }
    }

    let articles = sources::fetch_source(&state.ctx, source, CATEGORY).await;

    if let Some(cache) = &state.cache {
        cache.put(source, &articles).await;
    }
    articles
}
