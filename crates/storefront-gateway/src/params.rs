// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query-string parameters accepted by the catalog endpoints.

use std::str::FromStr;

use serde::Deserialize;

use storefront_catalog::SearchRequest;
use storefront_core::StorefrontError;
use storefront_core::types::SortMode;

/// `GET /api/marketplace/search` and `/category/{category}` query string.
/// `condition` and `brand` are comma-separated lists.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
}

impl SearchParams {
    pub fn into_request(self) -> Result<SearchRequest, StorefrontError> {
        let sort = match self.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => SortMode::default(),
            Some(raw) => SortMode::from_str(raw).map_err(|_| {
                StorefrontError::Validation(format!(
                    "unknown sort `{raw}` (expected best_match, newest, price_asc or price_desc)"
                ))
            })?,
        };

        for (name, bound) in [("minPrice", self.min_price), ("maxPrice", self.max_price)] {
            if bound.is_some_and(|p| !p.is_finite() || p < 0.0) {
                return Err(StorefrontError::Validation(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(StorefrontError::Validation(
                    "minPrice must not exceed maxPrice".into(),
                ));
            }
        }

        let currency = match self.currency.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            None => None,
            Some(c) if c.len() == 3 && c.chars().all(|ch| ch.is_ascii_alphabetic()) => {
                Some(c.to_ascii_uppercase())
            }
            Some(c) => {
                return Err(StorefrontError::Validation(format!(
                    "currency `{c}` is not a three-letter code"
                )));
            }
        };

        Ok(SearchRequest {
            query: self.q.unwrap_or_default().trim().to_string(),
            page: self.page.unwrap_or(1),
            page_size: self.page_size.filter(|s| *s > 0),
            currency,
            sort,
            category: self
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            min_price: self.min_price,
            max_price: self.max_price,
            conditions: split_list(self.condition.as_deref()),
            brands: split_list(self.brand.as_deref()),
        })
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
