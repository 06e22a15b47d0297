//! HTTP client for the gourmet search API.
//!
//! Wraps `reqwest` with API-key handling, the fixed `format`/`count`
//! parameters, and envelope checks. Every endpoint inspects `results.error`
//! in the decoded body and surfaces it as [`ApiError::Upstream`], so a 200
//! carrying an error never reaches callers as data.

use std::time::Duration;

use gourmet_core::{AppConfig, BudgetMaster, GenreMaster, PAGE_SIZE};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::envelope::{listing, BudgetResults, Envelope, GenreResults, ShopResults};
use crate::error::ApiError;
use crate::normalize::{to_result_set, upstream_error, ResultSet};
use crate::query::ShopQuery;

const DEFAULT_BASE_URL: &str = "https://webservice.recruit.co.jp/hotpepper/";
const DEFAULT_USER_AGENT: &str = "gourmet/0.1 (restaurant-search)";

const SHOP_ENDPOINT: &str = "gourmet/v1/";
const GENRE_ENDPOINT: &str = "genre/v1/";
const BUDGET_ENDPOINT: &str = "budget/v1/";

/// Client for the gourmet search API.
///
/// The API key is optional at construction time: a missing key is reported
/// as [`ApiError::MissingApiKey`] by the first request instead of preventing
/// startup.
pub struct GourmetClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl GourmetClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: Option<&str>, timeout_secs: u64) -> Result<Self, ApiError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_USER_AGENT, DEFAULT_BASE_URL)
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`GourmetClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::with_base_url(
            config.api_key.as_deref(),
            config.request_timeout_secs,
            &config.user_agent,
            &config.api_base_url,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock
    /// or a same-origin proxy).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so endpoint paths join under the base
        // path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            base_url: parsed,
        })
    }

    /// Fetches one page of shops.
    ///
    /// `start` is the 1-based offset of the first shop requested; see
    /// [`gourmet_core::start_offset`].
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingApiKey`] if no key is configured (no request is sent).
    /// - [`ApiError::Upstream`] if the body carries `results.error`.
    /// - [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] on network failure
    ///   or non-2xx HTTP status.
    /// - [`ApiError::Deserialize`] if the body is not the expected JSON shape.
    pub async fn fetch_shops(&self, query: &ShopQuery, start: u32) -> Result<ResultSet, ApiError> {
        let count = PAGE_SIZE.to_string();
        let start_param = start.to_string();
        let params: Vec<(&str, &str)> = query
            .pairs()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let url = self.build_url(
            SHOP_ENDPOINT,
            &params,
            &[("count", count.as_str()), ("start", start_param.as_str())],
        )?;
        let envelope: Envelope<ShopResults> = self.get_envelope(&url, "gourmet/v1").await?;
        let result = to_result_set(envelope.results);

        tracing::debug!(
            start,
            shops = result.shops.len(),
            total = result.total_available,
            "fetched shop page"
        );
        Ok(result)
    }

    /// Lists genre master data (code → name).
    ///
    /// # Errors
    ///
    /// Same classes as [`GourmetClient::fetch_shops`].
    pub async fn list_genres(&self) -> Result<Vec<GenreMaster>, ApiError> {
        let url = self.build_master_url(GENRE_ENDPOINT)?;
        let envelope: Envelope<GenreResults> = self.get_envelope(&url, "genre/v1").await?;
        Ok(listing(envelope.results.and_then(|r| r.genre)))
    }

    /// Lists budget master data (code → name).
    ///
    /// # Errors
    ///
    /// Same classes as [`GourmetClient::fetch_shops`].
    pub async fn list_budgets(&self) -> Result<Vec<BudgetMaster>, ApiError> {
        let url = self.build_master_url(BUDGET_ENDPOINT)?;
        let envelope: Envelope<BudgetResults> = self.get_envelope(&url, "budget/v1").await?;
        Ok(listing(envelope.results.and_then(|r| r.budget)))
    }

    fn api_key(&self) -> Result<&str, ApiError> {
        self.api_key.as_deref().ok_or(ApiError::MissingApiKey)
    }

    /// Builds an endpoint URL: caller parameters first, then `key` and
    /// `format=json`, then any trailing fixed parameters.
    fn build_url(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        trailing: &[(&str, &str)],
    ) -> Result<Url, ApiError> {
        let key = self.api_key()?;
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", key);
            pairs.append_pair("format", "json");
            for (k, v) in trailing {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    fn build_master_url(&self, endpoint: &str) -> Result<Url, ApiError> {
        self.build_url(endpoint, &[], &[])
    }

    /// Sends a GET, checks the status, decodes JSON, surfaces `results.error`,
    /// then decodes the typed envelope.
    async fn get_envelope<T>(&self, url: &Url, context: &str) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let body = self.request_json(url).await?;
        if let Some(message) = upstream_error(&body) {
            tracing::warn!(endpoint = context, message = %message, "gourmet API reported an error");
            return Err(ApiError::Upstream(message));
        }
        serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the response
    /// body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, ApiError> {
        let redacted_url = redact_key(url);
        tracing::debug!(url = %redacted_url, "GET");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: redacted_url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: redacted_url,
            source: e,
        })
    }
}

/// Renders `url` with the `key` parameter masked, for logs and error text.
pub(crate) fn redact_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "[redacted]".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
