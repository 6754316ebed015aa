// src/extract/mod.rs
// =============================================================================
// This module finds candidate product links on a page.
//
// Submodules:
// - patterns: the list of URL-path fragments that product pages tend to use
// - html: walks the anchors of an HTML document and keeps matching links
// =============================================================================

mod html;
mod patterns;

pub use html::extract_candidate_links;
pub use patterns::PatternSet;
