// src/crawl/runner.rs
// =============================================================================
// Crawls every configured shop at once and saves the results.
//
// All domain crawls start together with no cap on how many run at the same
// time; the per-domain batch size is what keeps the number of open pages in
// check. Results come back in the same order as the configured domains.
// =============================================================================

use super::DomainCrawler;
use crate::config::CrawlConfig;
use crate::fetch::PageFetcher;
use crate::report::{self, DomainReport};
use anyhow::Result;
use futures::future::join_all;
use std::sync::Arc;

pub struct Runner {
    config: CrawlConfig,
    crawler: DomainCrawler,
}

impl Runner {
    pub fn new(config: CrawlConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        let crawler = DomainCrawler::new(fetcher, &config);
        Self { config, crawler }
    }

    // Crawls all domains concurrently; one report per domain, input order
    pub async fn run(&self) -> Vec<DomainReport> {
        let crawls = self.config.domains.iter().map(|domain| self.crawler.crawl(domain));
        join_all(crawls).await
    }

    // Writes output.json and, when configured, the failed report
    pub async fn save(&self, reports: &[DomainReport]) -> Result<()> {
        report::write_results(&self.config.output_path, reports).await?;
        tracing::info!(
            "crawling complete, results saved to {}",
            self.config.output_path.display()
        );

        if let Some(path) = &self.config.failed_output {
            report::write_failed(path, reports).await?;
            tracing::info!("rejected URLs saved to {}", path.display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PatternSet;
    use crate::fetch::testing::StaticFetcher;
    use crate::report::DomainResult;
    use std::path::PathBuf;

    const PRODUCT: &str = r#"<span id="productTitle">Item</span>"#;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("product-scout-runner-{}-{}", std::process::id(), name))
    }

    fn config(domains: &[&str], output: PathBuf) -> CrawlConfig {
        CrawlConfig {
            domains: domains.iter().map(|d| d.to_string()).collect(),
            patterns: PatternSet::new(["/product/"]),
            output_path: output,
            ..CrawlConfig::default()
        }
    }

    #[tokio::test]
    async fn test_single_shop_end_to_end() {
        let root = r#"
            <a href="/product/1">1</a>
            <a href="/product/2">2</a>
            <a href="/product/3">3</a>
        "#;
        let fetcher = StaticFetcher::new()
            .with_page("https://shop.example.com", root)
            .with_page("https://shop.example.com/product/1", PRODUCT)
            .with_page("https://shop.example.com/product/2", PRODUCT)
            .with_page("https://shop.example.com/product/3", PRODUCT);
        let output = temp_path("single.json");
        let runner = Runner::new(config(&["https://shop.example.com"], output.clone()), Arc::new(fetcher));

        let reports = runner.run().await;
        runner.save(&reports).await.unwrap();

        let written = tokio::fs::read_to_string(&output).await.unwrap();
        let _ = tokio::fs::remove_file(&output).await;
        let results: Vec<DomainResult> = serde_json::from_str(&written).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].domain, "https://shop.example.com");
        assert_eq!(results[0].product_urls.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_root_is_written_as_empty() {
        let output = temp_path("failed-root.json");
        let runner = Runner::new(
            config(&["https://down.example.com"], output.clone()),
            Arc::new(StaticFetcher::new()),
        );

        let reports = runner.run().await;
        runner.save(&reports).await.unwrap();

        let written = tokio::fs::read_to_string(&output).await.unwrap();
        let _ = tokio::fs::remove_file(&output).await;
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();

        assert_eq!(json[0]["domain"], "https://down.example.com");
        assert_eq!(json[0]["productUrls"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_reports_follow_domain_order() {
        // The slow shop is listed first and must still come out first
        let fetcher = StaticFetcher::new()
            .with_delay(std::time::Duration::from_millis(5))
            .with_page("https://b.example.com", r#"<a href="/product/1">1</a>"#)
            .with_page("https://b.example.com/product/1", PRODUCT);
        let runner = Runner::new(
            config(
                &["https://b.example.com", "https://a.example.com", "https://c.example.com"],
                temp_path("unused.json"),
            ),
            Arc::new(fetcher),
        );

        let reports = runner.run().await;

        let domains: Vec<_> = reports.iter().map(|r| r.result.domain.as_str()).collect();
        assert_eq!(
            domains,
            vec!["https://b.example.com", "https://a.example.com", "https://c.example.com"]
        );
        assert_eq!(reports[0].result.product_urls.len(), 1);
        assert!(reports[1].root_error.is_some());
    }

    #[tokio::test]
    async fn test_failed_output_is_optional() {
        let fetcher = StaticFetcher::new()
            .with_page("https://shop.example.com", r#"<a href="/product/x">x</a>"#)
            .with_page("https://shop.example.com/product/x", "<p>no signals</p>");
        let output = temp_path("with-failed.json");
        let failed = temp_path("failed-list.json");
        let mut config = config(&["https://shop.example.com"], output.clone());
        config.failed_output = Some(failed.clone());
        let runner = Runner::new(config, Arc::new(fetcher));

        let reports = runner.run().await;
        runner.save(&reports).await.unwrap();

        let written = tokio::fs::read_to_string(&failed).await.unwrap();
        let _ = tokio::fs::remove_file(&output).await;
        let _ = tokio::fs::remove_file(&failed).await;
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();

        assert_eq!(json[0]["failedUrls"][0]["url"], "https://shop.example.com/product/x");
    }
}
