// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging and parse command-line arguments using clap
// 2. Build the page fetcher (headless browser or plain HTTP)
// 3. Crawl every shop and save the results to output.json
// 4. Print a summary and exit with a proper code
//    (0 = every shop loaded, 1 = some shop's root page failed, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - run configuration
mod crawl;    // src/crawl/ - per-shop crawling and the runner
mod extract;  // src/extract/ - candidate link extraction
mod fetch;    // src/fetch/ - getting page HTML
mod report;   // src/report.rs - output types and writers
mod verify;   // src/verify/ - product page checks

use clap::Parser;
use cli::Cli;
use config::{RendererConfig, RendererKind};
use crawl::Runner;
use fetch::{BrowserFetcher, HttpFetcher, PageFetcher};
use report::{DomainReport, FollowStatus};
use verify::RejectionReason;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use anyhow::Result;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr; RUST_LOG overrides the default level
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = all shops' root pages loaded
//   Ok(1) = at least one shop could not be loaded at all
//   Err = unexpected error (e.g. output file could not be written)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = cli.crawl_config();
    let fetcher = build_fetcher(&cli.renderer_config())?;

    tracing::info!(
        "crawling {} shop(s) with {} pattern(s)",
        config.domains.len(),
        config.patterns.len()
    );

    if config.patterns.is_empty() {
        tracing::warn!("no URL patterns configured, no candidates will be found");
    }

    let runner = Runner::new(config, fetcher);
    let reports = runner.run().await;
    runner.save(&reports).await?;

    print_table(&reports);

    if reports.iter().any(|r| r.root_error.is_some()) {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn build_fetcher(renderer: &RendererConfig) -> Result<Arc<dyn PageFetcher>> {
    let fetcher: Arc<dyn PageFetcher> = match renderer.kind {
        RendererKind::Chromium => Arc::new(BrowserFetcher::new(
            renderer.max_sessions,
            renderer.page_timeout,
        )),
        RendererKind::Http => Arc::new(HttpFetcher::new(renderer.page_timeout)?),
    };
    Ok(fetcher)
}

// Prints one line per shop as a human-readable table
fn print_table(reports: &[DomainReport]) {
    println!("{:<50} {:>10} {:>10} {:>10}", "DOMAIN", "CANDIDATES", "PRODUCTS", "REJECTED");
    println!("{}", "=".repeat(83));

    for report in reports {
        let domain = &report.result.domain;

        // Truncate domain if too long for display
        let domain_display = if domain.chars().count() > 47 {
            format!("{}...", domain.chars().take(47).collect::<String>())
        } else {
            domain.clone()
        };

        match &report.root_error {
            Some(error) => println!("{:<50} failed: {}", domain_display, error),
            None => println!(
                "{:<50} {:>10} {:>10} {:>10}",
                domain_display,
                report.candidates,
                report.result.product_urls.len(),
                report.rejected.len()
            ),
        }
    }

    println!();

    let products: usize = reports.iter().map(|r| r.result.product_urls.len()).sum();
    let failed = reports.iter().filter(|r| r.root_error.is_some()).count();
    let failed_follow_ups = reports
        .iter()
        .flat_map(|r| &r.follow_ups)
        .filter(|o| matches!(o.status, FollowStatus::Failed { .. }))
        .count();
    let unchecked = reports
        .iter()
        .flat_map(|r| &r.rejected)
        .filter(|r| matches!(r.reason, RejectionReason::Undetermined(_)))
        .count();

    println!("📊 Summary:");
    println!("   🛒 Product URLs: {}", products);
    println!("   ❌ Unreachable shops: {}", failed);
    println!("   🔗 Linked pages that failed to load: {}", failed_follow_ups);
    println!("   ⚠️  Candidates that could not be checked: {}", unchecked);
    println!("   📋 Shops: {}", reports.len());
}
