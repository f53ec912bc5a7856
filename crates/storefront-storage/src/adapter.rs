// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the catalog and storage traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use storefront_config::model::StorageConfig;
use storefront_core::types::{
    ArchivedSale, CatalogFilter, FulfillmentChange, FulfillmentStatus, NewProduct, NewSale,
    PaymentTransition, Product, ProductUpdate, Sale, SaleFilter,
};
use storefront_core::{Adapter, CatalogReader, HealthStatus, StorageAdapter, StorefrontError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage.
///
/// The database is opened by [`StorageAdapter::initialize`]; every other
/// call fails with a storage error until then.
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, StorefrontError> {
        self.db.get().ok_or_else(|| StorefrontError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl Adapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn health_check(&self) -> Result<HealthStatus, StorefrontError> {
        let Ok(db) = self.db() else {
            return Ok(HealthStatus::Unhealthy("not initialized".into()));
        };
        let probe = db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await;
        Ok(match probe {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        })
    }
}

#[async_trait]
impl CatalogReader for SqliteStorage {
    async fn find_products(&self, filter: &CatalogFilter) -> Result<Vec<Product>, StorefrontError> {
        let products = queries::products::find_products(self.db()?, filter).await?;
        debug!(count = products.len(), "local catalog query");
        Ok(products)
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, StorefrontError> {
        queries::products::get_product(self.db()?, id).await
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), StorefrontError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| StorefrontError::Storage {
            source: "storage already initialized".into(),
        })?;
        info!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), StorefrontError> {
        self.db()?.checkpoint().await
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, StorefrontError> {
        queries::products::create_product(self.db()?, product).await
    }

    async fn update_product(
        &self,
        id: i64,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, StorefrontError> {
        queries::products::update_product(self.db()?, id, update).await
    }

    async fn delete_product(&self, id: i64) -> Result<bool, StorefrontError> {
        queries::products::delete_product(self.db()?, id).await
    }

    async fn create_sale(&self, sale: &NewSale) -> Result<Sale, StorefrontError> {
        queries::sales::create_sale(self.db()?, sale).await
    }

    async fn get_sale(&self, id: i64) -> Result<Option<Sale>, StorefrontError> {
        queries::sales::get_sale(self.db()?, id).await
    }

    async fn list_sales(&self, filter: SaleFilter) -> Result<Vec<Sale>, StorefrontError> {
        queries::sales::list_sales(self.db()?, filter).await
    }

    async fn mark_sale_paid(&self, id: i64) -> Result<Option<PaymentTransition>, StorefrontError> {
        queries::sales::mark_sale_paid(self.db()?, id).await
    }

    async fn set_fulfillment(
        &self,
        id: i64,
        status: FulfillmentStatus,
    ) -> Result<Option<FulfillmentChange>, StorefrontError> {
        let change = queries::sales::set_fulfillment(self.db()?, id, status).await?;
        if change.as_ref().is_some_and(|c| c.archived) {
            info!(sale_id = id, status = %status, "sale archived");
        }
        Ok(change)
    }

    async fn list_archived_sales(&self) -> Result<Vec<ArchivedSale>, StorefrontError> {
        queries::sales::list_archived_sales(self.db()?).await
    }
}
