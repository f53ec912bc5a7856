// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local-first merge of catalog and marketplace listings.

use std::collections::HashSet;

use storefront_core::types::{ListingPage, MarketplacePage, UnifiedListing};

/// Merge local listings with a marketplace page.
///
/// Local listings come first, in their given order, followed by marketplace
/// listings. A listing whose id was already emitted is skipped, so a local
/// entry always wins. The result holds at most `limit` items and is not
/// re-sorted. `total_count` is the local count plus the marketplace's
/// reported total, independent of the cap.
pub fn merge(local: Vec<UnifiedListing>, marketplace: MarketplacePage, limit: usize) -> ListingPage {
    let total_count = local.len() as u64 + marketplace.total_count;

    let mut seen = HashSet::new();
    let items = local
        .into_iter()
        .chain(marketplace.items.into_iter().map(UnifiedListing::from))
        .filter(|listing| seen.insert(listing.id.clone()))
        .take(limit)
        .collect();

    ListingPage {
        items,
        total_count,
        page_number: marketplace.page_number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use storefront_core::types::{MarketplaceItem, Product, ProductStatus};

    fn local(id: i64, category: &str) -> UnifiedListing {
        let product = Product {
            id,
            name: format!("Local {id}"),
            price: 100.0 + id as f64,
            original_price: None,
            category: category.into(),
            condition: "new".into(),
            image: None,
            stock: 1,
            status: ProductStatus::Available,
            specs: None,
            created_at: String::new(),
            updated_at: String::new(),
        };
        UnifiedListing::from_product(&product, "USD")
    }

    fn remote(id: &str) -> MarketplaceItem {
        MarketplaceItem {
            id: id.into(),
            title: format!("Remote {id}"),
            price: 50.0,
            currency: "USD".into(),
            category: None,
            condition: None,
            shipping: None,
            seller: None,
            url: format!("https://market.example/itm/{id}"),
            item_group_id: None,
            image: None,
        }
    }

    fn page(items: Vec<MarketplaceItem>, total: u64) -> MarketplacePage {
        MarketplacePage {
            items,
            total_count: total,
            page_number: 1,
        }
    }

    #[test]
    fn local_laptops_fill_a_small_page() {
        let locals = vec![local(1, "laptops"), local(2, "laptops"), local(3, "laptops")];
        let remotes: Vec<_> = (0..5).map(|i| remote(&format!("m{i}"))).collect();

        let merged = merge(locals, page(remotes, 5), 2);
        assert_eq!(merged.items.len(), 2);
        assert!(merged.items.iter().all(|l| l.is_local));
        assert_eq!(merged.items[0].id, "1");
        assert_eq!(merged.items[1].id, "2");
        assert_eq!(merged.total_count, 3 + 5);
    }

    #[test]
    fn marketplace_fills_after_local() {
        let merged = merge(vec![local(9, "phones")], page(vec![remote("a"), remote("b")], 40), 10);
        let ids: Vec<&str> = merged.items.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["9", "a", "b"]);
        assert!(!merged.items[1].is_local);
        assert_eq!(merged.total_count, 41);
    }

    #[test]
    fn duplicate_ids_keep_the_local_entry() {
        let merged = merge(vec![local(7, "x")], page(vec![remote("7"), remote("8"), remote("8")], 3), 10);
        let ids: Vec<&str> = merged.items.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["7", "8"]);
        assert!(merged.items[0].is_local);
    }

    #[test]
    fn zero_limit_yields_nothing_but_counts() {
        let merged = merge(vec![local(1, "x")], page(vec![remote("a")], 12), 0);
        assert!(merged.items.is_empty());
        assert_eq!(merged.total_count, 13);
    }

    #[test]
    fn empty_inputs() {
        let merged = merge(Vec::new(), MarketplacePage::default(), 24);
        assert!(merged.items.is_empty());
        assert_eq!(merged.total_count, 0);
    }

    prop_compose! {
        fn inputs()(
            local_count in 0usize..15,
            remote_ids in proptest::collection::vec("[a-z]{1,6}", 0..15),
            extra_total in 0u64..1000,
            limit in 0usize..30,
        ) -> (Vec<UnifiedListing>, MarketplacePage, usize) {
            let locals = (0..local_count as i64).map(|i| local(i, "any")).collect();
            let total = remote_ids.len() as u64 + extra_total;
            let remotes = remote_ids.iter().map(|id| remote(id)).collect();
            (locals, page(remotes, total), limit)
        }
    }

    proptest! {
        #[test]
        fn never_exceeds_limit((locals, market, limit) in inputs()) {
            let merged = merge(locals, market, limit);
            prop_assert!(merged.items.len() <= limit);
        }

        #[test]
        fn local_prefix_is_preserved((locals, market, limit) in inputs()) {
            let merged = merge(locals.clone(), market, limit);
            let n = locals.len().min(limit);
            prop_assert_eq!(&merged.items[..n], &locals[..n]);
        }

        #[test]
        fn total_is_sum_of_sources((locals, market, limit) in inputs()) {
            let expected = locals.len() as u64 + market.total_count;
            let merged = merge(locals, market, limit);
            prop_assert_eq!(merged.total_count, expected);
        }

        #[test]
        fn ids_are_unique((locals, market, limit) in inputs()) {
            let merged = merge(locals, market, limit);
            let mut seen = HashSet::new();
            prop_assert!(merged.items.iter().all(|l| seen.insert(l.id.clone())));
        }

        #[test]
        fn merge_is_deterministic((locals, market, limit) in inputs()) {
            let a = merge(locals.clone(), market.clone(), limit);
            let b = merge(locals, market, limit);
            prop_assert_eq!(a, b);
        }
    }
}
