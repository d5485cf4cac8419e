//! Single-attempt HTTP fetching of reference links.
//!
//! One GET per call, browser-like User-Agent, bounded timeout. Transport
//! failures and non-2xx statuses come back as [`ProfileError::Network`];
//! nothing is retried.

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use researchprofile_shared::{FetchConfig, ProfileError, Result};

/// HTTP client shared by the web and PDF paths.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    /// Build a fetcher from the `[fetch]` config section.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProfileError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch a web page and return its body as text.
    pub async fn fetch_page(&self, link: &str) -> Result<String> {
        let response = self.get(link).await?;
        response
            .text()
            .await
            .map_err(|e| ProfileError::Network(format!("{link}: body read failed: {e}")))
    }

    /// Download a document and return the raw body bytes.
    pub async fn fetch_bytes(&self, link: &str) -> Result<Vec<u8>> {
        let response = self.get(link).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProfileError::Network(format!("{link}: body read failed: {e}")))?;
        debug!(link, len = bytes.len(), "downloaded document");
        Ok(bytes.to_vec())
    }

    async fn get(&self, link: &str) -> Result<Response> {
        let url = Url::parse(link)
            .map_err(|e| ProfileError::Network(format!("invalid URL '{link}': {e}")))?;

        debug!(%url, "fetching source");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| ProfileError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProfileError::Network(format!("{url}: HTTP {status}")));
        }

        Ok(response)
    }
}
