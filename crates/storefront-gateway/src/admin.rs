// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Back-office handlers for inventory and order management.
//!
//! Mounted under `/admin` behind [`crate::auth::admin_auth`].

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use storefront_core::StorefrontError;
use storefront_core::types::{
    ArchivedSale, CatalogFilter, FulfillmentStatus, NewProduct, PaymentStatus, Product,
    ProductStatus, ProductUpdate, Sale, SaleFilter,
};

use crate::error::ApiError;
use crate::server::AppState;

const DEFAULT_LIST_LIMIT: usize = 100;
const MAX_LIST_LIMIT: usize = 500;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleListParams {
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub fulfillment_status: Option<FulfillmentStatus>,
}

#[derive(Debug, Deserialize)]
pub struct FulfillmentUpdate {
    pub status: FulfillmentStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentResponse {
    #[serde(flatten)]
    pub sale: Sale,
    /// True when the sale left the live table.
    pub archived: bool,
}

// --- Products ---

/// GET /admin/products. Every status is listed unless `status` is given.
pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ProductListParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(params) = params?;
    let filter = CatalogFilter {
        category: params.category.filter(|c| !c.trim().is_empty()),
        name: params.q.filter(|q| !q.trim().is_empty()),
        statuses: params.status.into_iter().collect(),
        limit: params
            .limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .min(MAX_LIST_LIMIT),
        offset: params.offset.unwrap_or(0),
        ..Default::default()
    };
    Ok(Json(state.storage.find_products(&filter).await?))
}

/// GET /admin/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(id) = id?;
    let product = state
        .storage
        .get_product(id)
        .await?
        .ok_or_else(|| not_found("product", id))?;
    Ok(Json(product))
}

/// POST /admin/products
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(product) = payload?;
    validate_new_product(&product)?;
    let created = state.storage.create_product(&product).await?;
    info!(product_id = created.id, name = %created.name, "product created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /admin/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductUpdate>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(id) = id?;
    let Json(update) = payload?;
    validate_update(&update)?;
    let product = state
        .storage
        .update_product(id, &update)
        .await?
        .ok_or_else(|| not_found("product", id))?;
    info!(product_id = id, status = %product.status, stock = product.stock, "product updated");
    Ok(Json(product))
}

/// DELETE /admin/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if !state.storage.delete_product(id).await? {
        return Err(not_found("product", id).into());
    }
    info!(product_id = id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- Sales ---

/// GET /admin/sales
pub async fn list_sales(
    State(state): State<AppState>,
    params: Result<Query<SaleListParams>, QueryRejection>,
) -> Result<Json<Vec<Sale>>, ApiError> {
    let Query(params) = params?;
    let filter = SaleFilter {
        payment_status: params.payment_status,
        fulfillment_status: params.fulfillment_status,
    };
    Ok(Json(state.storage.list_sales(filter).await?))
}

/// GET /admin/sales/{id}
pub async fn get_sale(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Sale>, ApiError> {
    let Path(id) = id?;
    let sale = state
        .storage
        .get_sale(id)
        .await?
        .ok_or_else(|| not_found("sale", id))?;
    Ok(Json(sale))
}

/// PUT /admin/sales/{id}/fulfillment
pub async fn set_fulfillment(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<FulfillmentUpdate>, JsonRejection>,
) -> Result<Json<FulfillmentResponse>, ApiError> {
    let Path(id) = id?;
    let Json(update) = payload?;
    let change = state
        .storage
        .set_fulfillment(id, update.status)
        .await?
        .ok_or_else(|| not_found("sale", id))?;
    info!(order_id = id, status = %update.status, archived = change.archived, "fulfillment updated");
    Ok(Json(FulfillmentResponse {
        sale: change.sale,
        archived: change.archived,
    }))
}

/// GET /admin/sales/archived
pub async fn list_archived_sales(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArchivedSale>>, ApiError> {
    Ok(Json(state.storage.list_archived_sales().await?))
}

fn not_found(entity: &'static str, id: i64) -> StorefrontError {
    StorefrontError::NotFound {
        entity,
        id: id.to_string(),
    }
}

fn non_negative(field: &str, value: Option<f64>) -> Result<(), StorefrontError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(StorefrontError::Validation(format!(
            "{field} must be a non-negative number"
        ))),
        _ => Ok(()),
    }
}

fn validate_new_product(product: &NewProduct) -> Result<(), StorefrontError> {
    if product.name.trim().is_empty() {
        return Err(StorefrontError::Validation("name is required".into()));
    }
    if product.category.trim().is_empty() {
        return Err(StorefrontError::Validation("category is required".into()));
    }
    non_negative("price", Some(product.price))?;
    non_negative("originalPrice", product.original_price)?;
    if product.stock < 0 {
        return Err(StorefrontError::Validation("stock must not be negative".into()));
    }
    Ok(())
}

fn validate_update(update: &ProductUpdate) -> Result<(), StorefrontError> {
    non_negative("price", update.price)?;
    non_negative("originalPrice", update.original_price.flatten())?;
    if update.stock.is_some_and(|s| s < 0) {
        return Err(StorefrontError::Validation("stock must not be negative".into()));
    }
    Ok(())
}
