//! Profile page fetcher — the only place that goes over the network for profile HTML.
//!
//! Failures never escape: they are logged and reported as `None`, and the
//! caller falls back to URL-derived signals.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::profile::ProfileSignals;
use crate::profile::extractor::extract_profile;
use crate::profile::slug::extract_name_from_url;

const FETCH_TIMEOUT_SECS: u64 = 15;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("profile page returned status {0}")]
    Status(u16),
}

/// Retrieves the HTML of a profile page. `None` means "not available", for any reason.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// Fetches profile pages over HTTP with browser-like request headers.
#[derive(Clone)]
pub struct HttpProfileFetcher {
    client: Client,
}

impl HttpProfileFetcher {
    pub fn new() -> anyhow::Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-US,en;q=0.9,pt;q=0.8"),
        );
        headers.insert(header::DNT, header::HeaderValue::from_static("1"));
        headers.insert(
            header::UPGRADE_INSECURE_REQUESTS,
            header::HeaderValue::from_static("1"),
        );
        headers.insert("sec-fetch-dest", header::HeaderValue::from_static("document"));
        headers.insert("sec-fetch-mode", header::HeaderValue::from_static("navigate"));
        headers.insert("sec-fetch-site", header::HeaderValue::from_static("none"));
        headers.insert(
            header::CACHE_CONTROL,
            header::HeaderValue::from_static("max-age=0"),
        );

        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }

    async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ProfileFetcher for HttpProfileFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.try_fetch(url).await {
            Ok(html) => {
                debug!("Fetched profile page ({} bytes)", html.len());
                Some(html)
            }
            Err(e) => {
                warn!("Profile fetch failed for {url}: {e}");
                None
            }
        }
    }
}

/// Fetches and extracts profile signals, falling back to the URL slug when
/// the page is unavailable.
pub async fn load_profile(fetcher: &dyn ProfileFetcher, url: &str) -> ProfileSignals {
    match fetcher.fetch(url).await {
        Some(html) => extract_profile(&html, url),
        None => ProfileSignals::name_only(extract_name_from_url(url)),
    }
}
