// src/fetch/http.rs
// =============================================================================
// Fetches pages with a plain HTTP GET.
//
// No JavaScript runs here, so shops that build their markup in the browser
// will look empty. It is still handy for static sites and it is a lot
// lighter than starting Chromium.
// =============================================================================

use super::{FetchError, PageFetcher};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the client once; reqwest pools connections behind it
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let html = response.text().await?;
        Ok(html)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!("GET {}", url);

        let result = self.get(url).await;
        if let Err(e) = &result {
            tracing::warn!("error fetching HTML from {}: {}", url, e);
        }
        result
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
