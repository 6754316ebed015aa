// src/verify/mod.rs
// =============================================================================
// This module decides whether a candidate URL is really a product page.
//
// Submodules:
// - signals: the ordered list of markup checks
// - batch: runs the verifier over many URLs, a fixed number at a time
//
// The verdict is a heuristic. Category pages with a price block will pass and
// unusual product pages will fail; nothing here tries to correct that.
//
// Rust concepts:
// - Result<Verdict, VerifyError>: "not a product" and "could not tell" are
//   different outcomes, so they get different types
// - Arc<dyn Trait>: shared ownership of the fetcher across many futures
// =============================================================================

mod batch;
mod signals;

pub use batch::{filter_products, Rejection, RejectionReason};

use crate::fetch::{FetchError, PageFetcher};
use scraper::Html;
use std::sync::Arc;
use thiserror::Error;

// What we concluded about a page we managed to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The page matched `signal`
    Product { signal: &'static str },
    /// The page loaded but none of the checks matched
    NotProduct,
}

impl Verdict {
    pub fn is_product(&self) -> bool {
        matches!(self, Verdict::Product { .. })
    }
}

// Why a page could not be judged at all
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("could not load page: {0}")]
    Fetch(#[from] FetchError),
}

pub struct ProductVerifier {
    fetcher: Arc<dyn PageFetcher>,
}

impl ProductVerifier {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    // Loads the page and runs the markup checks on it
    //
    // A failed fetch is reported as an error, the HTML is never inspected.
    pub async fn verify(&self, url: &str) -> Result<Verdict, VerifyError> {
        let html = self.fetcher.fetch(url).await?;
        let verdict = classify_html(&html);

        match &verdict {
            Verdict::Product { signal } => tracing::debug!("{} is a product page ({})", url, signal),
            Verdict::NotProduct => tracing::debug!("{} is not a product page", url),
        }

        Ok(verdict)
    }
}

/// Runs the ordered checks over `html`; the first match wins.
pub fn classify_html(html: &str) -> Verdict {
    let document = Html::parse_document(html);

    if let Some(signal) = signals::PRODUCT_CHECKS
        .iter()
        .find(|signal| signal.is_present(&document))
    {
        return Verdict::Product {
            signal: signal.label,
        };
    }

    if signals::fallback_present(&document) {
        return Verdict::Product {
            signal: signals::FALLBACK_SIGNAL,
        };
    }

    Verdict::NotProduct
}
