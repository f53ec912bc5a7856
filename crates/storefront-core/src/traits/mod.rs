// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the storefront's external collaborators.
//!
//! All adapters extend the [`Adapter`] base trait and use `#[async_trait]`
//! for dynamic dispatch compatibility.

pub mod adapter;
pub mod catalog;
pub mod marketplace;
pub mod notifier;
pub mod payments;
pub mod storage;

pub use adapter::Adapter;
pub use catalog::CatalogReader;
pub use marketplace::MarketplaceSource;
pub use notifier::Notifier;
pub use payments::PaymentGateway;
pub use storage::StorageAdapter;
