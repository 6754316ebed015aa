// src/extract/patterns.rs
// =============================================================================
// The set of path fragments that mark a link as a product candidate.
//
// Shops rarely agree on URL layout, but most product pages live under one of
// a handful of prefixes: Amazon uses /dp/ and /gp/, eBay /itm/, Walmart /ip/,
// Shopify stores /products/ and so on.
// =============================================================================

// Fragments used when nothing else is configured
pub const DEFAULT_PATTERNS: &[&str] = &[
    "/product/",
    "/item/",
    "/itm/",
    "/p/",
    "/ip/",
    "/pl/",
    "/p-",
    "/dp/",
    "/gp/",
    "/products/",
    "/buy/",
];

/// Ordered list of substrings; a link is kept when its href and its
/// resolved path each contain one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet(Vec<String>);

impl PatternSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(patterns.into_iter().map(Into::into).collect())
    }

    /// True if `text` contains at least one of the fragments.
    pub fn matches(&self, text: &str) -> bool {
        self.0.iter().any(|pattern| text.contains(pattern.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERNS.iter().copied())
    }
}
