//! Gated Search CLI - verification-gated search client.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use gated_search::{
    display, HttpBackend, SearchConfig, SearchView, StaticProvider, ViewParams,
};

/// Environment variable naming the verification token.
const ENV_TOKEN: &str = "GATED_SEARCH_TOKEN";

/// Gated Search - verification-gated search client CLI
#[derive(Parser)]
#[command(name = "gated-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Search query
    query: String,

    /// Verification token issued by the challenge provider
    /// (falls back to GATED_SEARCH_TOKEN)
    #[arg(short, long)]
    token: Option<String>,

    /// Base URL of the search endpoint
    /// (falls back to GATED_SEARCH_BASE_URL)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Page of ranked results to display
    #[arg(short, long, default_value = "1")]
    page: usize,

    /// Maximum number of results to display
    #[arg(short, long, default_value = "10")]
    limit: usize,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    let config = match cli.base_url {
        Some(ref base_url) => SearchConfig::new(base_url.clone()),
        None => SearchConfig::from_env(),
    };
    if config.base_url.is_empty() {
        anyhow::bail!("No search endpoint configured (use --base-url or GATED_SEARCH_BASE_URL)");
    }

    let token = cli
        .token
        .or_else(|| std::env::var(ENV_TOKEN).ok())
        .unwrap_or_default();

    let backend = Arc::new(HttpBackend::new(config));
    let provider = Arc::new(StaticProvider::new(token.clone()));

    let mut view = SearchView::new(ViewParams::new(&cli.query, token), backend, provider);
    view.mount_widget()?;

    if let Err(e) = view.load().await {
        anyhow::bail!("{}", e.user_message());
    }

    if cli.page > 1 && !view.change_page(cli.page) {
        eprintln!(
            "Warning: page {} is out of range, showing page {}",
            cli.page,
            view.current_page()
        );
    }

    // Output results
    match cli.format {
        OutputFormat::Text => {
            let stats = view.stats();
            let timing = stats
                .time_taken
                .total_request
                .map(|t| format!(" in {:.3}s", t))
                .unwrap_or_default();
            println!(
                "\nSearch results for \"{}\" (page {}/{}, about {} matches{}):\n",
                view.query(),
                view.current_page(),
                view.pagination().total_pages().max(1),
                stats.total_matches,
                timing
            );

            if view.page_results().is_empty() {
                println!("No results found.");
            }

            for (i, result) in view.page_results().iter().take(cli.limit).enumerate() {
                println!("{}. {}", i + 1, result.title);
                println!("   URL: {}", display::shorten_url(&result.url));
                if !result.description.is_empty() {
                    let description: String = if result.description.chars().count() > 150 {
                        let truncated: String = result.description.chars().take(150).collect();
                        format!("{}...", truncated)
                    } else {
                        result.description.clone()
                    };
                    println!("   {}", description);
                }
                println!("   Score: {:.2}", result.score);
                println!();
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = view.page_results().iter().take(cli.limit).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Compact => {
            for result in view.page_results().iter().take(cli.limit) {
                println!("{}\t{}", result.title, result.url);
            }
        }
    }

    Ok(())
}
