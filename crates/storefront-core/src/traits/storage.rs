// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the relational store.

use async_trait::async_trait;

use crate::error::StorefrontError;
use crate::traits::catalog::CatalogReader;
use crate::types::{
    ArchivedSale, FulfillmentChange, FulfillmentStatus, NewProduct, NewSale, PaymentTransition,
    Product, ProductUpdate, Sale, SaleFilter,
};

/// Adapter for the storefront's persistent store.
///
/// Extends [`CatalogReader`] with inventory writes, sales, and the archive.
#[async_trait]
pub trait StorageAdapter: CatalogReader {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), StorefrontError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), StorefrontError>;

    // --- Inventory ---

    async fn create_product(&self, product: &NewProduct) -> Result<Product, StorefrontError>;

    /// Applies a partial edit. Returns `None` when the product does not exist.
    async fn update_product(
        &self,
        id: i64,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, StorefrontError>;

    /// Hard-deletes a product. Returns whether a row was removed.
    async fn delete_product(&self, id: i64) -> Result<bool, StorefrontError>;

    // --- Sales ---

    async fn create_sale(&self, sale: &NewSale) -> Result<Sale, StorefrontError>;

    async fn get_sale(&self, id: i64) -> Result<Option<Sale>, StorefrontError>;

    async fn list_sales(&self, filter: SaleFilter) -> Result<Vec<Sale>, StorefrontError>;

    /// Conditionally marks a sale's payment completed. Applying it twice is a no-op.
    /// Returns `None` when the sale does not exist in the live table.
    async fn mark_sale_paid(&self, id: i64) -> Result<Option<PaymentTransition>, StorefrontError>;

    /// Sets fulfillment status, archiving the sale when the status is terminal.
    async fn set_fulfillment(
        &self,
        id: i64,
        status: FulfillmentStatus,
    ) -> Result<Option<FulfillmentChange>, StorefrontError>;

    async fn list_archived_sales(&self) -> Result<Vec<ArchivedSale>, StorefrontError>;
}
