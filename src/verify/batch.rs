// src/verify/batch.rs
// =============================================================================
// Verifies a list of candidate URLs, a fixed number at a time.
//
// How it works:
// 1. Drop duplicate URLs, keeping the first occurrence
// 2. Split the list into chunks of `batch_size`
// 3. Verify every URL of a chunk concurrently and wait for all of them
// 4. Only then start the next chunk
//
// Every rendering session holds a browser tab, so the chunk size is also the
// ceiling on open tabs caused by verification.
// =============================================================================

use super::ProductVerifier;
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashSet;

// A URL that did not make it into the product list, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub url: String,
    #[serde(flatten)]
    pub reason: RejectionReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum RejectionReason {
    /// The page loaded and none of the product checks matched
    NotProduct,
    /// The page could not be loaded, so nothing was checked
    Undetermined(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Verified product URLs, in input order
    pub confirmed: Vec<String>,
    /// Everything else, in input order
    pub rejected: Vec<Rejection>,
}

// Splits `urls` into confirmed product pages and rejections
//
// Parameters:
//   verifier: does the per-URL check
//   domain: only used for log lines
//   urls: candidate URLs, may contain duplicates
//   batch_size: maximum verifications in flight (0 is treated as 1)
pub async fn filter_products(
    verifier: &ProductVerifier,
    domain: &str,
    urls: &[String],
    batch_size: usize,
) -> FilterOutcome {
    let mut seen = HashSet::new();
    let unique: Vec<&String> = urls.iter().filter(|url| seen.insert(url.as_str())).collect();

    let mut outcome = FilterOutcome::default();

    for (index, chunk) in unique.chunks(batch_size.max(1)).enumerate() {
        tracing::debug!("{}: verifying batch {} ({} URLs)", domain, index + 1, chunk.len());

        // join_all keeps the order of its input
        let verdicts = join_all(chunk.iter().map(|url| verifier.verify(url))).await;

        for (url, verdict) in chunk.iter().zip(verdicts) {
            match verdict {
                Ok(verdict) if verdict.is_product() => outcome.confirmed.push(url.to_string()),
                Ok(_) => outcome.rejected.push(Rejection {
                    url: url.to_string(),
                    reason: RejectionReason::NotProduct,
                }),
                Err(e) => {
                    tracing::warn!("error verifying product page {}: {}", url, e);
                    outcome.rejected.push(Rejection {
                        url: url.to_string(),
                        reason: RejectionReason::Undetermined(e.to_string()),
                    });
                }
            }
        }
    }

    outcome
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does chunks() do?
//    - Splits a slice into sub-slices of at most N items
//    - chunks(0) panics, which is why batch_size is clamped with max(1)
//
// 2. What is join_all?
//    - Takes many futures and waits for every one of them
//    - The results come back in the same order as the futures went in
//    - Nothing is spawned: the futures run interleaved on the current task
//
// 3. What do the serde attributes on RejectionReason do?
//    - tag/content write the variant as {"reason": ..., "detail": ...}
//    - #[serde(flatten)] on Rejection puts those keys next to "url"
// -----------------------------------------------------------------------------
