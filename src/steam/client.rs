//! HTTP client for the Steam storefront.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info};
use wreq::redirect::Policy;
use wreq::Client;

/// Redirect hops followed before a request is given up.
const MAX_REDIRECTS: usize = 10;

/// Trait for storefront fetching - enables mocking for tests.
#[async_trait]
pub trait StoreFetch: Send + Sync {
    /// Fetches the storefront listing page.
    async fn listing(&self) -> Result<String>;

    /// Fetches an arbitrary store page, such as a game's detail page.
    async fn page(&self, url: &str) -> Result<String>;

    /// Returns the storefront base URL used to resolve relative links.
    fn base_url(&self) -> &str;
}

/// Plain blocking-style client: one GET at a time, no retries, no timeouts.
pub struct SteamClient {
    client: Client,
    base_url: String,
}

impl SteamClient {
    /// Creates a new client for the configured storefront.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None)
    }

    /// Creates a new client with an optional custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url: base_url.unwrap_or_else(|| config.store_url.clone()) })
    }

    async fn get(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response =
            self.client.get(url).send().await.with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request to {} failed with status: {}", url, status);
        }

        response.text().await.context("Failed to read response body")
    }
}

#[async_trait]
impl StoreFetch for SteamClient {
    async fn listing(&self) -> Result<String> {
        info!("Fetching storefront: {}", self.base_url);
        self.get(&self.base_url).await
    }

    async fn page(&self, url: &str) -> Result<String> {
        self.get(url).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
