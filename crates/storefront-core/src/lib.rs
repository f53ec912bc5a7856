// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Storefront back end.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the workspace. Every collaborator adapter
//! (storage, marketplace, payment gateway, notifier) implements a trait
//! defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::StorefrontError;
pub use types::{HealthStatus, ListingPage, UnifiedListing};

pub use traits::{
    Adapter, CatalogReader, MarketplaceSource, Notifier, PaymentGateway, StorageAdapter,
};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::types::*;

    fn sample_product() -> Product {
        Product {
            id: 7,
            name: "ThinkPad X1".into(),
            price: 1299.0,
            original_price: Some(1499.0),
            category: "laptops".into(),
            condition: "new".into(),
            image: Some("x1.jpg".into()),
            stock: 3,
            status: ProductStatus::Available,
            specs: Some("16GB / 512GB".into()),
            created_at: "2026-01-01T00:00:00.000Z".into(),
            updated_at: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn product_status_round_trips_through_strings() {
        for status in [
            ProductStatus::Available,
            ProductStatus::PreOrder,
            ProductStatus::SoldOut,
            ProductStatus::Archived,
        ] {
            let s = status.to_string();
            assert_eq!(ProductStatus::from_str(&s).unwrap(), status);
        }
        assert_eq!(ProductStatus::PreOrder.to_string(), "pre_order");
    }

    #[test]
    fn sort_mode_parses_wire_names() {
        assert_eq!(SortMode::from_str("price_asc").unwrap(), SortMode::PriceAsc);
        assert_eq!(SortMode::from_str("newest").unwrap(), SortMode::Newest);
        assert!(SortMode::from_str("cheapest").is_err());
        assert_eq!(SortMode::default(), SortMode::BestMatch);
    }

    #[test]
    fn terminal_fulfillment_states() {
        assert!(!FulfillmentStatus::Pending.is_terminal());
        assert!(FulfillmentStatus::Delivered.is_terminal());
        assert!(FulfillmentStatus::Cancelled.is_terminal());
    }

    #[test]
    fn local_listing_projection_keeps_inventory_fields() {
        let listing = UnifiedListing::from_product(&sample_product(), "NGN");
        assert!(listing.is_local);
        assert_eq!(listing.id, "7");
        assert_eq!(listing.currency, "NGN");
        assert_eq!(listing.stock, Some(3));
        assert_eq!(listing.status, Some(ProductStatus::Available));
        assert!(listing.url.is_none());
    }

    #[test]
    fn marketplace_listing_projection() {
        let item = MarketplaceItem {
            id: "v1|123|0".into(),
            title: "Used MacBook".into(),
            price: 450.0,
            currency: "USD".into(),
            category: Some("Laptops".into()),
            condition: Some("Used".into()),
            shipping: Some("Free shipping".into()),
            seller: Some("gadgetbarn".into()),
            url: "https://market.example/itm/123".into(),
            item_group_id: None,
            image: None,
        };
        let listing = UnifiedListing::from(item);
        assert!(!listing.is_local);
        assert_eq!(listing.name, "Used MacBook");
        assert_eq!(listing.url.as_deref(), Some("https://market.example/itm/123"));
        assert!(listing.stock.is_none());
    }

    #[test]
    fn listing_page_serializes_camel_case() {
        let page = ListingPage {
            items: vec![UnifiedListing::from_product(&sample_product(), "NGN")],
            total_count: 9,
            page_number: 1,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalCount"], 9);
        assert_eq!(json["pageNumber"], 1);
        assert_eq!(json["items"][0]["isLocal"], true);
        assert_eq!(json["items"][0]["originalPrice"], 1499.0);
    }

    #[test]
    fn degradable_errors() {
        assert!(StorefrontError::upstream("marketplace", "timeout").is_degradable());
        assert!(StorefrontError::NotConfigured("token".into()).is_degradable());
        assert!(!StorefrontError::InvalidSignature.is_degradable());
        assert!(!StorefrontError::Internal("x".into()).is_degradable());
    }

    #[test]
    fn sale_line_subtotal() {
        let line = SaleLine {
            product_id: 1,
            name: "Pixel 9".into(),
            quantity: 3,
            unit_price: 250.5,
        };
        assert_eq!(line.subtotal(), 751.5);
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_adapter<T: Adapter>() {}
        fn _assert_catalog<T: CatalogReader>() {}
        fn _assert_marketplace<T: MarketplaceSource>() {}
        fn _assert_storage<T: StorageAdapter>() {}
        fn _assert_payments<T: PaymentGateway>() {}
        fn _assert_notifier<T: Notifier>() {}
    }
}
