// src/fetch/mod.rs
// =============================================================================
// This module turns a URL into the HTML of that page.
//
// Submodules:
// - browser: renders pages in a shared headless Chromium (the default)
// - http: plain GET requests, no JavaScript (useful for static shops)
//
// Everything else in the crate only talks to the `PageFetcher` trait, so the
// crawler and the verifier never know which backend is in use. Tests plug in
// an in-memory fetcher instead of a real browser.
//
// Rust concepts:
// - Traits: A shared interface that several types implement
// - async-trait: Lets a trait have async methods and still be used as `dyn`
// - thiserror: Derives std::error::Error for our own error enum
// =============================================================================

mod browser;
mod http;

#[cfg(test)]
pub mod testing;

pub use browser::BrowserFetcher;
pub use http::HttpFetcher;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

// Everything that can go wrong while getting a page
//
// The crawler turns these into "no data" for the page, it never retries.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The browser process could not be started or connected to
    #[error("failed to launch browser: {0}")]
    Launch(String),

    /// Opening the tab, navigating, or reading the DOM failed
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// The page did not finish loading in time
    #[error("{url} did not load within {after:?}")]
    Timeout { url: String, after: Duration },

    /// The server answered, but not with a 2xx status
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// Transport-level failure from the HTTP client
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Something that can fetch the HTML of a page.
///
/// Implementations must never panic on a bad page; every failure comes back
/// as a `FetchError`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the serialized document for `url`.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    /// Short backend name for log lines.
    fn name(&self) -> &'static str;
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait instead of calling the browser directly?
//    - The crawler can hold an `Arc<dyn PageFetcher>` and not care what is
//      behind it
//    - Tests swap in a fake that serves HTML from a HashMap
//
// 2. Why `Send + Sync` on the trait?
//    - Many verification futures share the same fetcher at the same time
//    - `Sync` means &PageFetcher can be used from several places at once
//
// 3. What does #[error(transparent)] do?
//    - It forwards Display and source() to the wrapped reqwest::Error
//    - #[from] also gives us `?` conversion from reqwest::Error
// -----------------------------------------------------------------------------
