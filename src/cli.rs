//! Command-line interface definitions for headline_hub.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! API keys and addresses can be provided via flags or environment variables.

use crate::sources::{
    Credentials, MEDIASTACK_BASE_URL, NEWSAPI_BASE_URL, NYTIMES_BASE_URL, UpstreamEndpoints,
};
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;

/// Command-line arguments for the headline_hub application.
///
/// # Examples
///
/// ```sh
/// # Run the aggregation endpoint
/// NEWS_API_KEY=... MEDIASTACK_API_KEY=... NYTIMES_API_KEY=... headline_hub serve
///
/// # Print the merged feed from a running endpoint
/// headline_hub headlines --search climate
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve `GET /api/news?source=…` for the three upstream APIs
    Serve(ServeArgs),
    /// Fetch all three sources from an endpoint and print the merged feed
    Headlines(HeadlinesArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to (host:port)
    #[arg(long, env = "HEADLINE_HUB_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,

    /// Mediastack access key
    #[arg(long, env = "MEDIASTACK_API_KEY", hide_env_values = true)]
    pub mediastack_api_key: Option<String>,

    /// New York Times API key
    #[arg(long, env = "NYTIMES_API_KEY", hide_env_values = true)]
    pub nytimes_api_key: Option<String>,

    /// Origin of the NewsAPI service
    #[arg(long, default_value = NEWSAPI_BASE_URL)]
    pub newsapi_base_url: String,

    /// Origin of the Mediastack service
    #[arg(long, default_value = MEDIASTACK_BASE_URL)]
    pub mediastack_base_url: String,

    /// Origin of the NYT developer API
    #[arg(long, default_value = NYTIMES_BASE_URL)]
    pub nytimes_base_url: String,

    /// Reuse a source's non-empty result for this many seconds (0 disables)
    #[arg(long, env = "HEADLINE_HUB_REVALIDATE_SECS", default_value_t = 0)]
    pub revalidate_secs: u64,
}

impl ServeArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            newsapi: self.news_api_key.clone(),
            mediastack: self.mediastack_api_key.clone(),
            nytimes: self.nytimes_api_key.clone(),
        }
    }

    pub fn endpoints(&self) -> Result<UpstreamEndpoints, url::ParseError> {
        UpstreamEndpoints::parse(
            &self.newsapi_base_url,
            &self.mediastack_base_url,
            &self.nytimes_base_url,
        )
    }
}

#[derive(Args, Debug)]
pub struct HeadlinesArgs {
    /// Base URL of a running `headline_hub serve`
    #[arg(long, env = "HEADLINE_HUB_ENDPOINT", default_value = "http://127.0.0.1:3000")]
    pub endpoint: String,

    /// Only show articles whose title or description contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Print the feed as a JSON array instead of text
    #[arg(long)]
    pub json: bool,
}
