// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Every flag has a default, so running `product-scout` with no arguments
// crawls the built-in shop list and writes output.json.
// =============================================================================

use crate::config::{
    CrawlConfig, RendererConfig, RendererKind, DEFAULT_BATCH_SIZE, DEFAULT_DOMAINS,
    DEFAULT_FOLLOW_LIMIT, DEFAULT_OUTPUT,
};
use crate::extract::PatternSet;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "product-scout",
    version = "0.1.0",
    about = "Crawls e-commerce sites and collects verified product page URLs",
    long_about = "product-scout loads the home page of each shop, follows links that look like \
                  product pages one level deep, checks every candidate for product markup \
                  (buy buttons, prices, titles) and writes the confirmed URLs to a JSON file."
)]
pub struct Cli {
    /// Shop root URL to crawl (repeat for several shops)
    ///
    /// Example: --domain https://shop.example.com --domain https://other.example.com
    #[arg(long = "domain", value_name = "URL")]
    pub domains: Vec<String>,

    /// URL path fragment that marks a product link (repeat for several)
    ///
    /// Replaces the built-in list (/product/, /dp/, /itm/, ...) when given
    #[arg(long = "pattern", value_name = "FRAGMENT")]
    pub patterns: Vec<String>,

    /// Where to write the confirmed product URLs
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Also write the rejected URLs (with reasons) to this file
    #[arg(long, value_name = "PATH")]
    pub failed_output: Option<PathBuf>,

    /// How many candidate pages are verified at the same time per shop
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// How many first-level links are opened to look for more candidates
    #[arg(long, default_value_t = DEFAULT_FOLLOW_LIMIT)]
    pub follow_limit: usize,

    /// How pages are fetched
    #[arg(long, value_enum, default_value_t = RendererKind::Chromium)]
    pub renderer: RendererKind,

    /// Maximum browser tabs open at once (chromium renderer only)
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub max_sessions: usize,

    /// Seconds to wait for a single page before giving up
    #[arg(long, default_value_t = 30)]
    pub page_timeout: u64,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        let domains = if self.domains.is_empty() {
            DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect()
        } else {
            self.domains.clone()
        };

        let patterns = if self.patterns.is_empty() {
            PatternSet::default()
        } else {
            PatternSet::new(self.patterns.iter().cloned())
        };

        CrawlConfig {
            domains,
            patterns,
            output_path: self.output.clone(),
            failed_output: self.failed_output.clone(),
            batch_size: self.batch_size,
            follow_limit: self.follow_limit,
        }
    }

    pub fn renderer_config(&self) -> RendererConfig {
        RendererConfig {
            kind: self.renderer,
            max_sessions: self.max_sessions,
            page_timeout: Duration::from_secs(self.page_timeout),
        }
    }
}
