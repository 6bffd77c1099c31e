//! HTTP client for the Bright Data datasets API.
//!
//! Only the synchronous scrape endpoint is used: one product URL in, the
//! dataset's JSON records out.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::ExtractError;

const DEFAULT_BASE_URL: &str = "https://api.brightdata.com";

/// Amazon product page dataset.
pub const DEFAULT_DATASET_ID: &str = "gd_l7q7dkf244hwjntr0";

const SCRAPE_PATH: &str = "datasets/v3/scrape";

/// Longest upstream error body kept in [`ExtractError::Upstream`].
const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    input: [ScrapeInput<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ScrapeInput<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    zipcode: Option<&'a str>,
}

/// Client for the Bright Data datasets API.
///
/// Use [`BrightDataClient::new`] for production or
/// [`BrightDataClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct BrightDataClient {
    client: Client,
    api_key: String,
    dataset_id: String,
    base_url: Url,
}

impl BrightDataClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, dataset_id: &str, timeout_secs: u64) -> Result<Self, ExtractError> {
        Self::with_base_url(api_key, dataset_id, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ExtractError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        dataset_id: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("prodlens/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Trailing slash so `join` appends instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ExtractError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            dataset_id: dataset_id.to_owned(),
            base_url,
        })
    }

    /// Scrapes one Amazon product page and returns the raw dataset records.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Http`] on network failure or timeout.
    /// - [`ExtractError::Upstream`] on a non-2xx status.
    /// - [`ExtractError::Deserialize`] if the body is not JSON.
    pub async fn collect_product(
        &self,
        url: &str,
        zipcode: Option<&str>,
    ) -> Result<serde_json::Value, ExtractError> {
        let endpoint = self.scrape_url()?;
        let body = ScrapeRequest {
            input: [ScrapeInput { url, zipcode }],
        };

        tracing::debug!(product_url = %url, dataset = %self.dataset_id, "requesting bright data scrape");

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ExtractError::Upstream {
                service: "bright data",
                status: status.as_u16(),
                message: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        serde_json::from_str(&text).map_err(|e| ExtractError::Deserialize {
            context: format!("bright data scrape of {url}"),
            source: e,
        })
    }

    fn scrape_url(&self) -> Result<Url, ExtractError> {
        let mut url = self
            .base_url
            .join(SCRAPE_PATH)
            .map_err(|e| ExtractError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("dataset_id", &self.dataset_id)
            .append_pair("format", "json");
        Ok(url)
    }
}
