// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the marketplace search response.
//!
//! Only the fields the storefront reads are modelled; everything else in
//! the response is ignored.

use serde::Deserialize;

/// Body of a successful search call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Total matches across all pages. Absent when nothing matched.
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub item_summaries: Vec<ItemSummary>,
}

/// One listing in a search response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub item_id: String,
    #[serde(default)]
    pub title: String,
    pub price: Option<Amount>,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub condition: Option<String>,
    #[serde(default)]
    pub shipping_options: Vec<ShippingOption>,
    pub seller: Option<Seller>,
    pub item_web_url: Option<String>,
    pub item_group_href: Option<String>,
    pub image: Option<Image>,
    #[serde(default)]
    pub thumbnail_images: Vec<Image>,
}

/// A monetary amount. The value is a decimal string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Amount {
    pub value: String,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    pub shipping_cost: Option<Amount>,
    pub shipping_cost_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seller {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub image_url: Option<String>,
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub error_id: Option<u32>,
    pub message: Option<String>,
}
