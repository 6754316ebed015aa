// src/crawl/mod.rs
// =============================================================================
// This module handles crawling shops.
//
// Features:
// - One-level link following from each shop's root page
// - Batched product verification of every candidate found
// - All shops crawled concurrently, results kept in configuration order
//
// Rust concepts:
// - Async programming: For concurrent page loads
// - Collections: HashSet for de-duplicating candidate URLs
// =============================================================================

mod domain;
mod runner;

pub use domain::DomainCrawler;
pub use runner::Runner;
