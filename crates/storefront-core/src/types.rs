// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across adapter traits and services.
//!
//! API-facing types serialize with camelCase keys because the storefront UI
//! consumes them directly.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but missing optional configuration or slow.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

// --- Local catalog ---

/// Availability status of a local product.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Available,
    PreOrder,
    SoldOut,
    Archived,
}

impl ProductStatus {
    /// Whether a product in this status may be placed in a cart.
    pub fn is_purchasable(self) -> bool {
        matches!(self, Self::Available | Self::PreOrder)
    }
}

/// A product from the merchant's own inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category: String,
    pub condition: String,
    pub image: Option<String>,
    pub stock: i64,
    pub status: ProductStatus,
    /// Free-form specification text entered by an admin.
    pub specs: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Admin input for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    pub category: String,
    #[serde(default = "default_condition")]
    pub condition: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default = "default_product_status")]
    pub status: ProductStatus,
    #[serde(default)]
    pub specs: Option<String>,
}

fn default_condition() -> String {
    "new".to_string()
}

fn default_product_status() -> ProductStatus {
    ProductStatus::Available
}

/// Partial admin edit of a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(default)]
    pub price: Option<f64>,
    /// `Some(None)` (an explicit JSON `null`) clears the compare-at price.
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Option<f64>>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub status: Option<ProductStatus>,
}

/// Keeps an explicit `null` apart from an absent key: absent stays `None`
/// through `#[serde(default)]`, `null` becomes `Some(None)`.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Filters for reading the local catalog. Absent filters impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Case-insensitive substring match on the product name.
    pub name: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
    /// Status whitelist. Empty means every status.
    pub statuses: Vec<ProductStatus>,
    pub limit: usize,
    pub offset: usize,
}

// --- Marketplace ---

/// Sort order requested from the marketplace.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    BestMatch,
    Newest,
    PriceAsc,
    PriceDesc,
}

/// A marketplace search request, already resolved to marketplace identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketplaceQuery {
    /// Free-text keywords. May be empty for category-only browsing.
    pub query: String,
    /// One-based page number.
    pub page: u32,
    pub page_size: u32,
    pub currency: String,
    pub sort: SortMode,
    pub category_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub conditions: Vec<String>,
    pub brands: Vec<String>,
}

/// A listing returned by the marketplace search API. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceItem {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub currency: String,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub shipping: Option<String>,
    pub seller: Option<String>,
    pub url: String,
    pub item_group_id: Option<String>,
    pub image: Option<String>,
}

/// One page of marketplace results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketplacePage {
    pub items: Vec<MarketplaceItem>,
    /// Total matches reported by the marketplace, across all pages.
    pub total_count: u64,
    pub page_number: u32,
}

// --- Unified feed ---

/// Display-ready listing shown to shoppers regardless of origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedListing {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub currency: String,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub image: Option<String>,
    pub stock: Option<i64>,
    pub status: Option<ProductStatus>,
    pub specs: Option<String>,
    pub shipping: Option<String>,
    pub seller: Option<String>,
    pub url: Option<String>,
    pub item_group_id: Option<String>,
    /// True for the merchant's own inventory, false for marketplace listings.
    pub is_local: bool,
}

impl UnifiedListing {
    /// Project a local product, priced in the store currency.
    pub fn from_product(product: &Product, currency: &str) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price,
            original_price: product.original_price,
            currency: currency.to_string(),
            category: Some(product.category.clone()),
            condition: Some(product.condition.clone()),
            image: product.image.clone(),
            stock: Some(product.stock),
            status: Some(product.status),
            specs: product.specs.clone(),
            shipping: None,
            seller: None,
            url: None,
            item_group_id: None,
            is_local: true,
        }
    }
}

impl From<MarketplaceItem> for UnifiedListing {
    fn from(item: MarketplaceItem) -> Self {
        Self {
            id: item.id,
            name: item.title,
            price: item.price,
            original_price: None,
            currency: item.currency,
            category: item.category,
            condition: item.condition,
            image: item.image,
            stock: None,
            status: None,
            specs: None,
            shipping: item.shipping,
            seller: item.seller,
            url: Some(item.url),
            item_group_id: item.item_group_id,
            is_local: false,
        }
    }
}

/// The merged feed returned to the storefront UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    pub items: Vec<UnifiedListing>,
    /// Sum of both source counts, not the length of `items`.
    pub total_count: u64,
    pub page_number: u32,
}

// --- Sales ---

/// Payment state of a sale. Only moves pending -> completed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
}

/// Fulfillment state of a sale. Delivered and cancelled are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    Pending,
    Delivered,
    Cancelled,
}

impl FulfillmentStatus {
    /// Terminal sales are moved to the archive.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

/// Buyer contact details captured at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Where and how a sale is delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A single priced line of a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl SaleLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    /// Payment reference shared with the gateway.
    pub reference: String,
    pub buyer: Buyer,
    pub delivery: Delivery,
    pub items: Vec<SaleLine>,
    pub total_amount: f64,
    pub currency: String,
    pub payment_status: PaymentStatus,
    pub fulfillment_status: FulfillmentStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for inserting a sale. New sales are always pending on both axes.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub reference: String,
    pub buyer: Buyer,
    pub delivery: Delivery,
    pub items: Vec<SaleLine>,
    pub total_amount: f64,
    pub currency: String,
}

/// A sale moved out of the live table after reaching a terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedSale {
    #[serde(flatten)]
    pub sale: Sale,
    pub archived_at: String,
}

/// Filters for listing live sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaleFilter {
    pub payment_status: Option<PaymentStatus>,
    pub fulfillment_status: Option<FulfillmentStatus>,
}

/// Result of applying a payment completion to a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentTransition {
    /// The sale moved from pending to completed.
    Completed,
    /// The sale was already completed; nothing changed.
    AlreadyCompleted,
}

/// Result of setting a sale's fulfillment status.
#[derive(Debug, Clone, PartialEq)]
pub struct FulfillmentChange {
    pub sale: Sale,
    /// True when the sale reached a terminal state and was archived.
    pub archived: bool,
}

// --- Payment gateway ---

/// Request to open a payment session with the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRequest {
    pub order_id: i64,
    pub reference: String,
    pub email: String,
    /// Amount in minor currency units.
    pub amount_minor: i64,
    pub currency: String,
}

/// The gateway's answer to a transaction initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInit {
    pub authorization_url: String,
    pub access_code: Option<String>,
    pub reference: String,
}
