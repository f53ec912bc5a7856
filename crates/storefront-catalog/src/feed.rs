// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fan-out/fan-in over the local catalog and the marketplace.

use std::sync::Arc;

use tracing::{debug, warn};

use storefront_config::model::CatalogConfig;
use storefront_core::types::{
    CatalogFilter, ListingPage, MarketplacePage, MarketplaceQuery, SortMode, UnifiedListing,
};
use storefront_core::{CatalogReader, MarketplaceSource, StorefrontError};

use crate::merge::merge;

/// A shopper's search, before category resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    /// Free-text keywords. Empty for category browsing.
    pub query: String,
    /// One-based page. Values below 1 become 1.
    pub page: u32,
    /// Falls back to the configured default page size.
    pub page_size: Option<u32>,
    /// Marketplace currency. Falls back to the store currency.
    pub currency: Option<String>,
    pub sort: SortMode,
    /// Storefront category slug.
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub conditions: Vec<String>,
    pub brands: Vec<String>,
}

/// Where a category slug points in each source.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedCategory {
    local: String,
    marketplace: Option<String>,
}

/// Merged catalog feed.
pub struct CatalogFeed {
    catalog: Arc<dyn CatalogReader>,
    marketplace: Arc<dyn MarketplaceSource>,
    config: CatalogConfig,
    max_page_size: u32,
}

impl CatalogFeed {
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        marketplace: Arc<dyn MarketplaceSource>,
        config: CatalogConfig,
        max_page_size: u32,
    ) -> Self {
        Self {
            catalog,
            marketplace,
            config,
            max_page_size: max_page_size.max(1),
        }
    }

    /// Store currency that local prices are in.
    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    /// Keyword search across both sources.
    pub async fn search(&self, request: &SearchRequest) -> Result<ListingPage, StorefrontError> {
        let page = request.page.max(1);
        let page_size = request
            .page_size
            .unwrap_or(self.config.default_page_size)
            .clamp(1, self.max_page_size);

        let category = request.category.as_deref().map(|slug| self.resolve(slug));
        if !request.brands.is_empty() && category.is_none() {
            debug!("brand filter ignored without a category");
        }

        let filter = CatalogFilter {
            category: category.as_ref().map(|c| c.local.clone()),
            name: Some(request.query.trim().to_string()).filter(|q| !q.is_empty()),
            min_price: request.min_price,
            max_price: request.max_price,
            statuses: self.config.listed_statuses.clone(),
            // Read past the page so the local count reflects more than the
            // visible slice; the merge caps what is returned.
            limit: self.max_page_size as usize,
            offset: (page as usize - 1) * page_size as usize,
        };

        // A category with no marketplace counterpart stays local-only.
        let market_query = match &category {
            Some(ResolvedCategory {
                marketplace: None, ..
            }) => None,
            _ => Some(MarketplaceQuery {
                query: request.query.trim().to_string(),
                page,
                page_size,
                currency: request
                    .currency
                    .clone()
                    .unwrap_or_else(|| self.config.currency.clone()),
                sort: request.sort,
                category_id: category.as_ref().and_then(|c| c.marketplace.clone()),
                min_price: request.min_price,
                max_price: request.max_price,
                conditions: request.conditions.clone(),
                brands: request.brands.clone(),
            }),
        };

        let (local, remote) = tokio::join!(
            self.catalog.find_products(&filter),
            self.search_marketplace(market_query.as_ref(), page)
        );

        let local: Vec<UnifiedListing> = local?
            .iter()
            .map(|p| UnifiedListing::from_product(p, &self.config.currency))
            .collect();
        debug!(
            local = local.len(),
            marketplace = remote.items.len(),
            page,
            page_size,
            "merging catalog sources"
        );
        Ok(merge(local, remote, page_size as usize))
    }

    /// Browse one storefront category.
    pub async fn browse_category(
        &self,
        slug: &str,
        request: &SearchRequest,
    ) -> Result<ListingPage, StorefrontError> {
        let request = SearchRequest {
            category: Some(slug.to_string()),
            ..request.clone()
        };
        self.search(&request).await
    }

    /// Marketplace results, or an empty page when the marketplace is skipped
    /// or fails.
    async fn search_marketplace(
        &self,
        query: Option<&MarketplaceQuery>,
        page: u32,
    ) -> MarketplacePage {
        let empty = MarketplacePage {
            page_number: page,
            ..Default::default()
        };
        let Some(query) = query else {
            return empty;
        };
        match self.marketplace.search(query).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "marketplace unavailable, serving local results only");
                empty
            }
        }
    }

    fn resolve(&self, slug: &str) -> ResolvedCategory {
        match self.config.category(slug) {
            Some(mapping) => ResolvedCategory {
                local: mapping.local_category.clone(),
                marketplace: mapping.marketplace_category_id.clone(),
            },
            None => {
                debug!(slug, "unmapped category; local catalog only");
                ResolvedCategory {
                    local: slug.to_string(),
                    marketplace: None,
                }
            }
        }
    }
}
