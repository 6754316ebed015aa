// src/extract/html.rs
// =============================================================================
// This module extracts candidate product links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to:
// - Parse and validate URLs
// - Resolve relative URLs to absolute URLs
//
// A link becomes a candidate when its href contains one of the configured
// patterns and the path it resolves to does too. Links that cannot be turned into an http(s) URL are
// skipped with a warning.
// =============================================================================

use super::PatternSet;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

// The links we kept from one page, plus the hrefs we had to throw away
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateLinks {
    /// Absolute, deduplicated, in the order they first appear on the page
    pub links: Vec<String>,
    /// Raw href values that were not valid web URLs
    pub skipped: Vec<String>,
}

// Extracts all product-looking links from HTML content
//
// Parameters:
//   base_url: the URL of the page (for resolving relative links)
//   html: the HTML content to parse
//   patterns: path fragments a link must contain to be kept
//
// Example:
//   base_url = "https://shop.example.com"
//   html = "<a href='/product/1'>Mug</a><a href='/about'>About</a>"
//   result.links = ["https://shop.example.com/product/1"]
pub fn extract_candidate_links(base_url: &str, html: &str, patterns: &PatternSet) -> CandidateLinks {
    let mut candidates = CandidateLinks::default();

    // Parse the base URL once
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("invalid base URL {}: {}", base_url, e);
            return candidates;
        }
    };

    let document = Html::parse_document(html);
    let mut seen = HashSet::new();

    for element in document.select(&ANCHOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(url) = resolve_url(&base, href) else {
            tracing::warn!("invalid URL skipped: {}", href);
            candidates.skipped.push(href.to_string());
            continue;
        };

        // The href as written and the path it resolves to must both
        // carry a pattern
        if !patterns.matches(href) || !patterns.matches(url.path()) {
            continue;
        }

        let absolute = url.to_string();
        if seen.insert(absolute.clone()) {
            candidates.links.push(absolute);
        }
    }

    candidates
}

// Resolves a possibly-relative href to an absolute web URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "../other" -> Some("https://example.com/other")
//   href = "https://other.com" -> Some("https://other.com/")
//   href = "javascript:void(0)" -> None (not HTTP)
//   href = "http://[::1" -> None (does not parse)
fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    // join() handles both absolute and relative hrefs
    let url = base.join(href.trim()).ok()?;

    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is LazyLock?
//    - A static that is built the first time it is read
//    - The "a[href]" selector is parsed once, not once per page
//
// 2. What does let-else do?
//    - `let Some(x) = expr else { continue; };` binds x or leaves the loop body
//    - It keeps the happy path unindented
//
// 3. Why test both the href and url.path()?
//    - The href is what the page author wrote
//    - url.path() is where the link really goes after resolution
//    - Requiring both keeps links like "product/rel" from slipping in just
//      because the page they sit on has a matching path
//
// 4. Why HashSet::insert for dedup?
//    - insert() returns false when the value was already there
//    - The Vec keeps page order, the set only remembers what we saw
// -----------------------------------------------------------------------------
