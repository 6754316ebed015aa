// src/crawl/domain.rs
// =============================================================================
// Crawls a single shop and returns its verified product URLs.
//
// How it works:
// 1. Fetch the shop's root page (give up on this shop if that fails)
// 2. Extract first-level candidate links from it
// 3. Open the first `follow_limit` of those links and extract candidates
//    from each of them too (a failing page is recorded and skipped)
// 4. Merge both levels, dropping duplicates
// 5. Verify the merged list in batches
//
// There is no deeper crawling and no retrying: one level of link-following
// is enough to reach product pages from a category or landing page.
// =============================================================================

use crate::config::CrawlConfig;
use crate::extract::{extract_candidate_links, PatternSet};
use crate::fetch::PageFetcher;
use crate::report::{DomainReport, DomainResult, FollowStatus, LinkOutcome};
use crate::verify::{filter_products, ProductVerifier};
use std::collections::HashSet;
use std::sync::Arc;

pub struct DomainCrawler {
    fetcher: Arc<dyn PageFetcher>,
    verifier: ProductVerifier,
    patterns: PatternSet,
    follow_limit: usize,
    batch_size: usize,
}

impl DomainCrawler {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &CrawlConfig) -> Self {
        Self {
            verifier: ProductVerifier::new(fetcher.clone()),
            fetcher,
            patterns: config.patterns.clone(),
            follow_limit: config.follow_limit,
            batch_size: config.batch_size,
        }
    }

    pub async fn crawl(&self, domain: &str) -> DomainReport {
        tracing::info!("starting crawler for {} ({})", domain, self.fetcher.name());

        let html = match self.fetcher.fetch(domain).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("failed to fetch HTML for {}", domain);
                return DomainReport::root_failed(domain, e.to_string());
            }
        };

        let extracted = extract_candidate_links(domain, &html, &self.patterns);
        tracing::info!(
            "extracted {} URLs from {} ({} unusable links skipped)",
            extracted.links.len(),
            domain,
            extracted.skipped.len()
        );
        let first_level = extracted.links;

        let (second_level, follow_ups) = self.follow_links(&first_level).await;

        let all_urls = merge_unique(first_level, second_level);
        tracing::info!("{} unique candidate URLs for {}", all_urls.len(), domain);

        let outcome = filter_products(&self.verifier, domain, &all_urls, self.batch_size).await;
        tracing::info!(
            "{} of {} candidates for {} are product pages",
            outcome.confirmed.len(),
            all_urls.len(),
            domain
        );

        DomainReport {
            result: DomainResult {
                domain: domain.to_string(),
                product_urls: outcome.confirmed,
            },
            root_error: None,
            candidates: all_urls.len(),
            follow_ups,
            rejected: outcome.rejected,
        }
    }

    // Opens the first few candidates one after another and collects the
    // candidates found on them
    async fn follow_links(&self, links: &[String]) -> (Vec<String>, Vec<LinkOutcome>) {
        let mut found = Vec::new();
        let mut outcomes = Vec::new();

        for link in links.iter().take(self.follow_limit) {
            let status = match self.fetcher.fetch(link).await {
                Ok(html) => {
                    let extracted = extract_candidate_links(link, &html, &self.patterns).links;
                    tracing::info!("additional extracted {} URLs from {}", extracted.len(), link);

                    let discovered = extracted.len();
                    found.extend(extracted);
                    FollowStatus::Fetched { discovered }
                }
                Err(e) => FollowStatus::Failed {
                    reason: e.to_string(),
                },
            };

            outcomes.push(LinkOutcome {
                url: link.clone(),
                status,
            });
        }

        (found, outcomes)
    }
}

// First level first, then anything new from the second level
fn merge_unique(first: Vec<String>, second: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Arc<dyn PageFetcher>?
//    - The crawler and the verifier both need the same fetcher
//    - Arc::clone only bumps a reference count, the browser is shared
//
// 2. Why does crawl() return a DomainReport and not a Result?
//    - A failed root page is an expected outcome, not a program error
//    - The report carries root_error so the caller can still write `[]`
//
// 3. What does take() do in follow_links?
//    - It stops the iterator after N items
//    - Asking for more than the list holds is fine, it just ends early
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;

    const ROOT: &str = "https://shop.example.com";
    const PRODUCT: &str = r#"<html><body><span id="productTitle">Item</span></body></html>"#;

    fn crawler(fetcher: StaticFetcher, follow_limit: usize) -> (DomainCrawler, Arc<StaticFetcher>) {
        let fetcher = Arc::new(fetcher);
        let config = CrawlConfig {
            domains: vec![ROOT.to_string()],
            patterns: PatternSet::new(["/product/"]),
            follow_limit,
            ..CrawlConfig::default()
        };
        (DomainCrawler::new(fetcher.clone(), &config), fetcher)
    }

    #[tokio::test]
    async fn test_three_products_on_root() {
        let root = r#"
            <a href="/product/1">1</a>
            <a href="/product/2">2</a>
            <a href="/product/3">3</a>
            <a href="/about">About</a>
        "#;
        let fetcher = StaticFetcher::new()
            .with_page(ROOT, root)
            .with_page("https://shop.example.com/product/1", PRODUCT)
            .with_page("https://shop.example.com/product/2", PRODUCT)
            .with_page("https://shop.example.com/product/3", PRODUCT);
        let (crawler, _) = crawler(fetcher, 5);

        let report = crawler.crawl(ROOT).await;

        assert_eq!(report.result.domain, ROOT);
        assert_eq!(report.result.product_urls.len(), 3);
        assert_eq!(report.candidates, 3);
        assert!(report.root_error.is_none());
        assert!(report.rejected.is_empty());
    }

    #[tokio::test]
    async fn test_root_failure_gives_empty_result() {
        let (crawler, fetcher) = crawler(StaticFetcher::new(), 5);

        let report = crawler.crawl(ROOT).await;

        assert!(report.result.product_urls.is_empty());
        assert!(report.root_error.is_some());
        // nothing else was attempted
        assert_eq!(fetcher.requested(), vec![ROOT.to_string()]);
    }

    #[tokio::test]
    async fn test_second_level_links_are_merged() {
        let root = r#"<a href="/product/list">All</a>"#;
        let list = r#"
            <a href="/product/a">A</a>
            <a href="/product/list">All again</a>
        "#;
        let fetcher = StaticFetcher::new()
            .with_page(ROOT, root)
            .with_page("https://shop.example.com/product/list", list)
            .with_page("https://shop.example.com/product/a", PRODUCT);
        let (crawler, _) = crawler(fetcher, 5);

        let report = crawler.crawl(ROOT).await;

        assert_eq!(report.candidates, 2);
        assert_eq!(report.result.product_urls, vec!["https://shop.example.com/product/a"]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].url, "https://shop.example.com/product/list");
        assert_eq!(
            report.follow_ups,
            vec![LinkOutcome {
                url: "https://shop.example.com/product/list".to_string(),
                status: FollowStatus::Fetched { discovered: 2 },
            }]
        );
    }

    #[tokio::test]
    async fn test_failed_follow_up_is_recorded_not_fatal() {
        let root = r#"<a href="/product/gone">Gone</a><a href="/product/ok">Ok</a>"#;
        let fetcher = StaticFetcher::new()
            .with_page(ROOT, root)
            .with_page("https://shop.example.com/product/ok", PRODUCT);
        let (crawler, _) = crawler(fetcher, 5);

        let report = crawler.crawl(ROOT).await;

        assert_eq!(report.result.product_urls, vec!["https://shop.example.com/product/ok"]);
        assert!(matches!(report.follow_ups[0].status, FollowStatus::Failed { .. }));
        assert_eq!(report.follow_ups[1].status, FollowStatus::Fetched { discovered: 0 });
    }

    #[tokio::test]
    async fn test_only_first_links_are_followed() {
        let root: String = (1..=8)
            .map(|n| format!(r#"<a href="/product/{n}">{n}</a>"#))
            .collect();
        let mut fetcher = StaticFetcher::new().with_page(ROOT, &root);
        for n in 1..=8 {
            fetcher = fetcher.with_page(&format!("{ROOT}/product/{n}"), PRODUCT);
        }
        let (crawler, _) = crawler(fetcher, 5);

        let report = crawler.crawl(ROOT).await;

        let followed: Vec<_> = report.follow_ups.iter().map(|o| o.url.clone()).collect();
        let expected: Vec<_> = (1..=5).map(|n| format!("{ROOT}/product/{n}")).collect();
        assert_eq!(followed, expected);
        assert_eq!(report.result.product_urls.len(), 8);
    }

    #[test]
    fn test_merge_unique_keeps_first_level_order() {
        let merged = merge_unique(
            vec!["b".to_string(), "a".to_string()],
            vec!["a".to_string(), "c".to_string(), "c".to_string()],
        );
        assert_eq!(merged, vec!["b", "a", "c"]);
    }
}
