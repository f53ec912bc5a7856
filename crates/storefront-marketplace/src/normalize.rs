// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response normalization.

use storefront_core::types::{MarketplaceItem, MarketplacePage};
use tracing::debug;

use crate::types::{Amount, ItemSummary, SearchResponse, ShippingOption};

/// Convert a search response into a page, dropping items that lack a usable
/// price or link.
pub fn normalize_page(response: SearchResponse, page_number: u32) -> MarketplacePage {
    let items = response
        .item_summaries
        .into_iter()
        .filter_map(normalize_item)
        .collect();
    MarketplacePage {
        items,
        total_count: response.total,
        page_number,
    }
}

pub fn normalize_item(summary: ItemSummary) -> Option<MarketplaceItem> {
    let Some((price, currency)) = summary.price.as_ref().and_then(parse_amount) else {
        debug!(item_id = %summary.item_id, "dropping marketplace item without a usable price");
        return None;
    };
    let Some(url) = summary.item_web_url.clone() else {
        debug!(item_id = %summary.item_id, "dropping marketplace item without a link");
        return None;
    };

    Some(MarketplaceItem {
        category: summary
            .categories
            .iter()
            .find_map(|c| c.category_name.clone()),
        shipping: summary.shipping_options.first().and_then(shipping_note),
        seller: summary.seller.as_ref().and_then(|s| s.username.clone()),
        item_group_id: summary.item_group_href.as_deref().and_then(item_group_id),
        image: summary
            .image
            .as_ref()
            .or(summary.thumbnail_images.first())
            .and_then(|i| i.image_url.clone()),
        id: summary.item_id,
        title: summary.title,
        price,
        currency,
        condition: summary.condition,
        url,
    })
}

fn parse_amount(amount: &Amount) -> Option<(f64, String)> {
    let value = amount.value.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then(|| (value, amount.currency.clone()))
}

/// Human-readable shipping note for the first shipping option.
fn shipping_note(option: &ShippingOption) -> Option<String> {
    match option.shipping_cost.as_ref().and_then(parse_amount) {
        Some((cost, _)) if cost == 0.0 => Some("Free shipping".to_string()),
        Some((cost, currency)) => Some(format!("{currency} {cost:.2} shipping")),
        None => match option.shipping_cost_type.as_deref() {
            Some("CALCULATED") => Some("Calculated shipping".to_string()),
            _ => None,
        },
    }
}

/// The `item_group_id` query parameter of an item-group link.
fn item_group_id(href: &str) -> Option<String> {
    let url = reqwest::Url::parse(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "item_group_id")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}
