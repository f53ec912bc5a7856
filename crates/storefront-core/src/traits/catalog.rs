// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read access to the local catalog.

use async_trait::async_trait;

use crate::error::StorefrontError;
use crate::traits::adapter::Adapter;
use crate::types::{CatalogFilter, Product};

/// Read-only view of the merchant's own inventory.
#[async_trait]
pub trait CatalogReader: Adapter {
    /// Returns products matching every present filter, capped at `filter.limit`.
    async fn find_products(&self, filter: &CatalogFilter) -> Result<Vec<Product>, StorefrontError>;

    /// Fetches a single product by id.
    async fn get_product(&self, id: i64) -> Result<Option<Product>, StorefrontError>;
}
