// src/fetch/browser.rs
// =============================================================================
// Fetches fully rendered pages through a headless Chromium.
//
// How it works:
// 1. The first fetch launches Chromium once; later fetches reuse it
// 2. Each fetch takes a permit from a semaphore, so at most `max_sessions`
//    tabs are open at the same time
// 3. A new tab navigates to the URL and we read back the serialized DOM
// 4. The tab is closed whether the navigation worked or not
//
// The permit is released when it goes out of scope, so even an early
// return or a timeout frees the session slot.
// =============================================================================

use super::{FetchError, PageFetcher};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::{OnceCell, Semaphore};

pub struct BrowserFetcher {
    browser: OnceCell<Browser>,
    sessions: Semaphore,
    page_timeout: Duration,
}

impl BrowserFetcher {
    // Creates the fetcher without starting Chromium yet
    //
    // Parameters:
    //   max_sessions: how many tabs may be open at once (at least 1)
    //   page_timeout: upper bound for navigating + reading one page
    pub fn new(max_sessions: usize, page_timeout: Duration) -> Self {
        Self {
            browser: OnceCell::new(),
            sessions: Semaphore::new(max_sessions.max(1)),
            page_timeout,
        }
    }

    // Returns the shared browser, launching it on first use
    async fn browser(&self) -> Result<&Browser, FetchError> {
        self.browser
            .get_or_try_init(|| async {
                let config = BrowserConfig::builder()
                    .no_sandbox()
                    .request_timeout(self.page_timeout)
                    .arg("--disable-gpu")
                    .arg("--disable-dev-shm-usage")
                    .build()
                    .map_err(FetchError::Launch)?;

                let (browser, mut handler) = Browser::launch(config)
                    .await
                    .map_err(|e| FetchError::Launch(e.to_string()))?;

                // The handler drives the DevTools connection; it has to be
                // polled for the whole lifetime of the browser
                tokio::spawn(async move {
                    while let Some(event) = handler.next().await {
                        if event.is_err() {
                            break;
                        }
                    }
                });

                tracing::info!("headless browser launched");
                Ok::<_, FetchError>(browser)
            })
            .await
    }

    async fn render(&self, browser: &Browser, url: &str) -> Result<String, FetchError> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| navigation_error(url, e))?;

        let content = tokio::time::timeout(self.page_timeout, load_content(&page, url)).await;

        // Always give the tab back, even when navigation failed
        if let Err(e) = page.close().await {
            tracing::debug!("closing tab for {} failed: {}", url, e);
        }

        match content {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
                after: self.page_timeout,
            }),
        }
    }
}

// Navigates an open tab and reads the serialized document
async fn load_content(page: &Page, url: &str) -> Result<String, FetchError> {
    page.goto(url).await.map_err(|e| navigation_error(url, e))?;
    page.content().await.map_err(|e| navigation_error(url, e))
}

fn navigation_error(url: &str, error: impl std::fmt::Display) -> FetchError {
    FetchError::Navigation {
        url: url.to_string(),
        reason: error.to_string(),
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        // acquire() only fails once the semaphore is closed, which we never do
        let _permit = self
            .sessions
            .acquire()
            .await
            .map_err(|e| FetchError::Launch(e.to_string()))?;

        tracing::debug!("rendering {}", url);

        let result = match self.browser().await {
            Ok(browser) => self.render(browser, url).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::warn!("error fetching HTML from {}: {}", url, e);
        }
        result
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}
