// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ready-made domain values for tests.

use serde_json::{Value, json};

use storefront_core::types::{MarketplaceItem, NewProduct, ProductStatus};
use storefront_payments::signature;

/// An available product with plenty of stock.
pub fn product(name: &str, category: &str, price: f64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price,
        original_price: None,
        category: category.to_string(),
        condition: "new".to_string(),
        image: None,
        stock: 10,
        status: ProductStatus::Available,
        specs: None,
    }
}

/// A marketplace listing with a stable id derived from `n`.
pub fn marketplace_item(n: u32, title: &str, price: f64) -> MarketplaceItem {
    MarketplaceItem {
        id: format!("v1|{}|0", 100_000 + n),
        title: title.to_string(),
        price,
        currency: "USD".to_string(),
        category: Some("Laptops".to_string()),
        condition: Some("Used".to_string()),
        shipping: Some("Free shipping".to_string()),
        seller: Some("gadgetbarn".to_string()),
        url: format!("https://market.test/itm/{}", 100_000 + n),
        item_group_id: None,
        image: None,
    }
}

/// A checkout body for `items` as `(product_id, quantity)` pairs.
pub fn checkout_body(items: &[(i64, u32)]) -> Value {
    json!({
        "buyer": {"name": "Ada Obi", "email": "ada@example.com", "phone": "+2348000000000"},
        "delivery": {"address": "12 Marina Rd", "city": "Lagos"},
        "items": items
            .iter()
            .map(|(id, qty)| json!({"productId": id, "quantity": qty}))
            .collect::<Vec<_>>(),
    })
}

/// A gateway event body referencing `order_id`.
pub fn payment_event(event: &str, order_id: i64) -> Vec<u8> {
    json!({
        "event": event,
        "data": {
            "reference": format!("SF-test-{order_id}"),
            "amount": 10000,
            "metadata": {"order_id": order_id}
        }
    })
    .to_string()
    .into_bytes()
}

/// Hex HMAC-SHA512 of `body` under `secret`.
pub fn sign(secret: &str, body: &[u8]) -> String {
    signature::sign(secret.as_bytes(), body).unwrap_or_default()
}
