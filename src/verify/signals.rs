// src/verify/signals.rs
// =============================================================================
// Markup checks that suggest a page sells a single item.
//
// The list is tried top to bottom and the first hit wins, so cheap and
// specific checks (buy buttons, Amazon's title span) come before the very
// generic ones (price containers, meta tags).
//
// Update this file when a shop's markup stops being recognised: capture the
// HTML, add or adjust a signal, and add a test below.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

// One presence check against a parsed document
pub enum Signal {
    /// At least one element matches the CSS selector
    Css(&'static str),
    /// At least one <button> has this text somewhere inside it (case-sensitive)
    ButtonText(&'static str),
}

// In priority order
pub const PRODUCT_SIGNALS: &[Signal] = &[
    Signal::Css(r#"button[title*="Buy Now"]"#),
    Signal::Css("span#title"),
    Signal::Css("span#productTitle"),
    Signal::ButtonText("Add to Basket"),
    Signal::ButtonText("NOTIFY ME"),
    Signal::ButtonText("Buy It Now"),
    Signal::ButtonText("Add to Cart"),
    Signal::ButtonText("Buy Now"),
    Signal::Css(r#"button[aria-label*="Add to Cart"]"#),
    Signal::Css(r#"button[aria-label*="Buy Now"]"#),
    Signal::Css(r#"span[class*="price"]"#),
    Signal::Css(r#"div[id*="price"]"#),
    Signal::Css(r#"meta[name="description"]"#),
    Signal::Css(r#"meta[name="keywords"]"#),
];

/// Label used in logs when neither list entry matched but the fallback did.
pub const FALLBACK_SIGNAL: &str = "img#product-image + h1.product-title";

static BUTTON: LazyLock<Selector> = LazyLock::new(|| Selector::parse("button").unwrap());

static PRODUCT_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"img[id*="product-image"]"#).unwrap());
static PRODUCT_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"h1[class*="product-title"]"#).unwrap());

// A signal with its selector parsed, ready to run against documents
pub struct CompiledSignal {
    pub label: &'static str,
    check: Check,
}

enum Check {
    Css(Selector),
    ButtonText(&'static str),
}

// Parsed once on first use, in priority order
pub static PRODUCT_CHECKS: LazyLock<Vec<CompiledSignal>> =
    LazyLock::new(|| PRODUCT_SIGNALS.iter().filter_map(Signal::compile).collect());

impl Signal {
    // A selector that does not parse is left out with a warning
    pub fn compile(&self) -> Option<CompiledSignal> {
        let check = match self {
            Signal::Css(css) => match Selector::parse(css) {
                Ok(selector) => Check::Css(selector),
                Err(e) => {
                    tracing::warn!("unusable product selector {}: {:?}", css, e);
                    return None;
                }
            },
            Signal::ButtonText(text) => Check::ButtonText(*text),
        };

        Some(CompiledSignal {
            label: self.label(),
            check,
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Signal::Css(selector) => *selector,
            Signal::ButtonText(text) => *text,
        }
    }
}

impl CompiledSignal {
    pub fn is_present(&self, document: &Html) -> bool {
        match &self.check {
            Check::Css(selector) => document.select(selector).next().is_some(),
            Check::ButtonText(needle) => document
                .select(&BUTTON)
                .any(|button| element_text(button).contains(*needle)),
        }
    }
}

// Both a product image and a product title heading must be present
pub fn fallback_present(document: &Html) -> bool {
    document.select(&PRODUCT_IMAGE).next().is_some()
        && document.select(&PRODUCT_TITLE).next().is_some()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
