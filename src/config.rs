// src/config.rs
// =============================================================================
// Run configuration, built once from the command line and then passed down.
//
// Nothing in the crawler reads globals: the domains, the pattern set and the
// limits all arrive through `CrawlConfig`, so tests can point a Runner at
// any made-up shop.
// =============================================================================

use crate::extract::PatternSet;
use std::path::PathBuf;
use std::time::Duration;

// Shops crawled when no --domain flag is given
pub const DEFAULT_DOMAINS: &[&str] = &[
    "https://www.ecommerswebsite1.com",
    "https://www.ecommerswebsite2.com",
    "https://www.example3.com",
];

pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_FOLLOW_LIMIT: usize = 5;
pub const DEFAULT_OUTPUT: &str = "output.json";

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Root URLs, one crawl each, reported in this order
    pub domains: Vec<String>,
    pub patterns: PatternSet,
    pub output_path: PathBuf,
    /// Where to write rejected URLs; nothing is written when unset
    pub failed_output: Option<PathBuf>,
    /// Verifications in flight per domain
    pub batch_size: usize,
    /// How many first-level links get their own page scanned
    pub follow_limit: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            domains: DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect(),
            patterns: PatternSet::default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            failed_output: None,
            batch_size: DEFAULT_BATCH_SIZE,
            follow_limit: DEFAULT_FOLLOW_LIMIT,
        }
    }
}

// Which fetch backend to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RendererKind {
    /// Headless Chromium, runs the page's JavaScript
    Chromium,
    /// Plain HTTP GET, no JavaScript
    Http,
}

#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub kind: RendererKind,
    /// Browser tabs open at the same time
    pub max_sessions: usize,
    pub page_timeout: Duration,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            kind: RendererKind::Chromium,
            max_sessions: DEFAULT_BATCH_SIZE,
            page_timeout: Duration::from_secs(30),
        }
    }
}
