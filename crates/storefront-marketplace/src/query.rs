// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translate a [`MarketplaceQuery`] into search query parameters.

use storefront_core::types::{MarketplaceQuery, SortMode};

/// Page numbers below 1 are treated as 1.
pub fn effective_page(page: u32) -> u32 {
    page.max(1)
}

/// Page size clamped to `1..=max_page_size`.
pub fn effective_page_size(page_size: u32, max_page_size: u32) -> u32 {
    page_size.clamp(1, max_page_size.max(1))
}

/// Wire value for a sort mode. Best match is the API default and sends nothing.
pub fn sort_param(sort: SortMode) -> Option<&'static str> {
    match sort {
        SortMode::BestMatch => None,
        SortMode::Newest => Some("newlyListed"),
        SortMode::PriceAsc => Some("price"),
        SortMode::PriceDesc => Some("-price"),
    }
}

/// The comma-joined `filter` parameter, or `None` when no filter applies.
pub fn filter_param(query: &MarketplaceQuery) -> Option<String> {
    let mut parts = Vec::new();

    if query.min_price.is_some() || query.max_price.is_some() {
        let bound = |v: Option<f64>| v.map(|p| p.to_string()).unwrap_or_default();
        parts.push(format!(
            "price:[{}..{}]",
            bound(query.min_price),
            bound(query.max_price)
        ));
        parts.push(format!("priceCurrency:{}", query.currency));
    }

    let conditions: Vec<String> = query
        .conditions
        .iter()
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .collect();
    if !conditions.is_empty() {
        parts.push(format!("conditions:{{{}}}", conditions.join("|")));
    }

    (!parts.is_empty()).then(|| parts.join(","))
}

/// The `aspect_filter` parameter. Brand refinement needs a category.
pub fn aspect_filter_param(query: &MarketplaceQuery) -> Option<String> {
    let category = query.category_id.as_deref()?;
    let brands: Vec<&str> = query
        .brands
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .collect();
    if brands.is_empty() {
        return None;
    }
    Some(format!("categoryId:{category},Brand:{{{}}}", brands.join("|")))
}

/// Every query parameter for one search request, in a stable order.
pub fn search_params(query: &MarketplaceQuery, max_page_size: u32) -> Vec<(&'static str, String)> {
    let page = effective_page(query.page);
    let size = effective_page_size(query.page_size, max_page_size);
    let offset = u64::from(page - 1) * u64::from(size);

    let mut params = Vec::new();
    let q = query.query.trim();
    if !q.is_empty() {
        params.push(("q", q.to_string()));
    }
    if let Some(category) = &query.category_id {
        params.push(("category_ids", category.clone()));
    }
    params.push(("limit", size.to_string()));
    params.push(("offset", offset.to_string()));
    if let Some(sort) = sort_param(query.sort) {
        params.push(("sort", sort.to_string()));
    }
    if let Some(filter) = filter_param(query) {
        params.push(("filter", filter));
    }
    if let Some(aspects) = aspect_filter_param(query) {
        params.push(("aspect_filter", aspects));
    }
    params
}
