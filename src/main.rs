//! `headline_hub` binary: `serve` runs the aggregation endpoint, `headlines`
//! prints the merged feed from a running endpoint.

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

use headline_hub::aggregator::HttpFeed;
use headline_hub::cache::RevalidationCache;
use headline_hub::cli::{Cli, Command, HeadlinesArgs, ServeArgs};
use headline_hub::dashboard::{Dashboard, GENERIC_ERROR};
use headline_hub::server::{self, AppState};
use headline_hub::sources::SourceContext;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args.command, "Parsed CLI arguments");

    let result = match args.command {
        Command::Serve(serve_args) => run_serve(serve_args).await,
        Command::Headlines(headlines_args) => run_headlines(headlines_args).await,
    };

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    result
}

async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn Error>> {
    let credentials = args.credentials();
    let endpoints = args.endpoints()?;
    info!(
        ?credentials,
        newsapi = %endpoints.newsapi,
        mediastack = %endpoints.mediastack,
        nytimes = %endpoints.nytimes,
        revalidate_secs = args.revalidate_secs,
        "Starting aggregation endpoint"
    );

    let ctx = SourceContext::new(Client::new(), credentials, endpoints);
    let cache = RevalidationCache::new(Duration::from_secs(args.revalidate_secs));
    server::serve(args.bind, AppState::new(ctx, cache)).await
}

async fn run_headlines(args: HeadlinesArgs) -> Result<(), Box<dyn Error>> {
    let endpoint = Url::parse(&args.endpoint)?;
    let feed = HttpFeed::new(Client::new(), &endpoint)?;
    let mut dashboard = Dashboard::new(feed);

    if !dashboard.refresh().await {
        let message = dashboard.error().unwrap_or(GENERIC_ERROR);
        error!(endpoint = %endpoint, "Could not load headlines");
        return Err(message.into());
    }
    if let Some(term) = &args.search {
        dashboard.set_search(term);
    }

    let visible = dashboard.visible();
    info!(
        total = dashboard.articles().len(),
        shown = visible.len(),
        search = %dashboard.search(),
        "Loaded headlines"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(visible)?);
    } else {
        for tagged in visible {
            let a = &tagged.article;
            println!("[{}] {} ({})", tagged.api_origin, a.title, a.source_name);
            println!("    {}", a.description);
            println!("    {} | {}", a.url, a.published_at);
        }
    }
    Ok(())
}
