// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock marketplace source.

use async_trait::async_trait;
use tokio::sync::Mutex;

use storefront_core::types::{HealthStatus, MarketplaceItem, MarketplacePage, MarketplaceQuery};
use storefront_core::{Adapter, MarketplaceSource, StorefrontError};

/// Returns the same items for every query, truncated to the page size.
///
/// `total_count` defaults to the number of items; override it to simulate
/// a large remote result set.
pub struct MockMarketplace {
    items: Vec<MarketplaceItem>,
    total_count: u64,
    failing: bool,
    queries: Mutex<Vec<MarketplaceQuery>>,
}

impl MockMarketplace {
    pub fn new(items: Vec<MarketplaceItem>) -> Self {
        Self {
            total_count: items.len() as u64,
            items,
            failing: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// A marketplace whose every search fails as unreachable.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_total_count(mut self, total: u64) -> Self {
        self.total_count = total;
        self
    }

    /// Every query received so far, oldest first.
    pub async fn queries(&self) -> Vec<MarketplaceQuery> {
        self.queries.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.queries.lock().await.len()
    }
}

impl Default for MockMarketplace {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl Adapter for MockMarketplace {
    fn name(&self) -> &str {
        "marketplace"
    }

    async fn health_check(&self) -> Result<HealthStatus, StorefrontError> {
        Ok(if self.failing {
            HealthStatus::Degraded("mock marketplace failing".into())
        } else {
            HealthStatus::Healthy
        })
    }
}

#[async_trait]
impl MarketplaceSource for MockMarketplace {
    async fn search(&self, query: &MarketplaceQuery) -> Result<MarketplacePage, StorefrontError> {
        self.queries.lock().await.push(query.clone());
        if self.failing {
            return Err(StorefrontError::upstream("marketplace", "connection refused"));
        }
        Ok(MarketplacePage {
            items: self
                .items
                .iter()
                .take(query.page_size as usize)
                .cloned()
                .collect(),
            total_count: self.total_count,
            page_number: query.page,
        })
    }
}
