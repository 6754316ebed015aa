// src/report.rs
// =============================================================================
// The data we hand back to the user, and the code that writes it to disk.
//
// output.json is an array with one entry per domain, in the order the
// domains were configured:
//
//   [
//     {
//       "domain": "https://shop.example.com",
//       "productUrls": ["https://shop.example.com/product/1"]
//     }
//   ]
//
// The optional failed report uses the same layout with a `failedUrls` list.
// =============================================================================

use crate::verify::Rejection;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainResult {
    pub domain: String,
    pub product_urls: Vec<String>,
}

impl DomainResult {
    pub fn empty(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            product_urls: Vec::new(),
        }
    }
}

// What happened to one first-level link we followed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkOutcome {
    pub url: String,
    #[serde(flatten)]
    pub status: FollowStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FollowStatus {
    /// The page loaded and `discovered` candidates were found on it
    Fetched { discovered: usize },
    /// The page could not be loaded
    Failed { reason: String },
}

// Everything the crawler learned about one domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainReport {
    pub result: DomainResult,
    /// Set when the root page itself could not be loaded
    pub root_error: Option<String>,
    /// Unique candidates that went into verification
    pub candidates: usize,
    pub follow_ups: Vec<LinkOutcome>,
    pub rejected: Vec<Rejection>,
}

impl DomainReport {
    pub fn root_failed(domain: &str, error: String) -> Self {
        Self {
            result: DomainResult::empty(domain),
            root_error: Some(error),
            candidates: 0,
            follow_ups: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FailedUrls<'a> {
    domain: &'a str,
    failed_urls: &'a [Rejection],
}

// Writes output.json (pretty-printed, two-space indent)
pub async fn write_results(path: &Path, reports: &[DomainReport]) -> Result<()> {
    let results: Vec<&DomainResult> = reports.iter().map(|r| &r.result).collect();
    write_json(path, &results).await
}

// Writes the rejected URLs of every domain
pub async fn write_failed(path: &Path, reports: &[DomainReport]) -> Result<()> {
    let failed: Vec<FailedUrls<'_>> = reports
        .iter()
        .map(|r| FailedUrls {
            domain: &r.result.domain,
            failed_urls: &r.rejected,
        })
        .collect();
    write_json(path, &failed).await
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
