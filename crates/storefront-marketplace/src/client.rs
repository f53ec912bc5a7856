// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the marketplace item-summary search.
//!
//! No retries: a failed call surfaces as
//! [`StorefrontError::UpstreamUnavailable`] and the feed carries on with
//! local results.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use storefront_config::model::MarketplaceConfig;
use storefront_core::types::{HealthStatus, MarketplacePage, MarketplaceQuery};
use storefront_core::{Adapter, MarketplaceSource, StorefrontError};

use crate::normalize::normalize_page;
use crate::query::{effective_page, search_params};
use crate::types::{ApiErrorResponse, SearchResponse};

/// Path of the search endpoint, relative to the configured base URL.
const SEARCH_PATH: &str = "/buy/browse/v1/item_summary/search";

/// Header naming the marketplace site a request targets.
const MARKETPLACE_ID_HEADER: &str = "x-ebay-c-marketplace-id";

const SERVICE: &str = "marketplace";

/// Marketplace search client.
#[derive(Clone)]
pub struct MarketplaceClient {
    client: reqwest::Client,
    search_url: reqwest::Url,
    api_token: Option<String>,
    max_page_size: u32,
}

impl std::fmt::Debug for MarketplaceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketplaceClient")
            .field("search_url", &self.search_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("max_page_size", &self.max_page_size)
            .finish()
    }
}

impl MarketplaceClient {
    /// Build a client from configuration. A missing token is not an error
    /// here; searches fail with `NotConfigured` instead.
    pub fn new(config: &MarketplaceConfig) -> Result<Self, StorefrontError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            MARKETPLACE_ID_HEADER,
            HeaderValue::from_str(&config.marketplace_id).map_err(|e| {
                StorefrontError::Config(format!("invalid marketplace_id header value: {e}"))
            })?,
        );
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StorefrontError::UpstreamUnavailable {
                service: SERVICE,
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let base = config.base_url.trim_end_matches('/');
        let search_url = reqwest::Url::parse(&format!("{base}{SEARCH_PATH}")).map_err(|e| {
            StorefrontError::Config(format!("invalid marketplace.base_url `{base}`: {e}"))
        })?;

        Ok(Self {
            client,
            search_url,
            api_token: config.api_token.clone().filter(|t| !t.trim().is_empty()),
            max_page_size: config.max_page_size,
        })
    }
}

#[async_trait]
impl Adapter for MarketplaceClient {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn health_check(&self) -> Result<HealthStatus, StorefrontError> {
        Ok(match self.api_token {
            Some(_) => HealthStatus::Healthy,
            None => HealthStatus::Degraded("api token not configured".into()),
        })
    }
}

#[async_trait]
impl MarketplaceSource for MarketplaceClient {
    async fn search(&self, query: &MarketplaceQuery) -> Result<MarketplacePage, StorefrontError> {
        let token = self
            .api_token
            .as_deref()
            .ok_or_else(|| StorefrontError::NotConfigured("marketplace.api_token".into()))?;

        let page = effective_page(query.page);
        if query.query.trim().is_empty() && query.category_id.is_none() {
            debug!("no keywords and no category; skipping marketplace search");
            return Ok(MarketplacePage {
                page_number: page,
                ..Default::default()
            });
        }

        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .extend_pairs(search_params(query, self.max_page_size));

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StorefrontError::UpstreamUnavailable {
                service: SERVICE,
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, page, "marketplace response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .ok()
                .and_then(|e| e.errors.into_iter().find_map(|e| e.message))
                .map(|m| format!("marketplace returned {status}: {m}"))
                .unwrap_or_else(|| format!("marketplace returned {status}"));
            warn!(status = %status, "marketplace search failed");
            return Err(StorefrontError::upstream(SERVICE, message));
        }

        let body: SearchResponse =
            response
                .json()
                .await
                .map_err(|e| StorefrontError::UpstreamUnavailable {
                    service: SERVICE,
                    message: format!("failed to parse search response: {e}"),
                    source: Some(Box::new(e)),
                })?;

        let page = normalize_page(body, page);
        debug!(
            items = page.items.len(),
            total = page.total_count,
            "marketplace search complete"
        );
        Ok(page)
    }
}
