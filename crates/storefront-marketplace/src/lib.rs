// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marketplace search adapter.
//!
//! Calls the marketplace's item-summary search endpoint and normalizes its
//! response into [`storefront_core::types::MarketplaceItem`]s. Implements
//! [`storefront_core::MarketplaceSource`].

pub mod client;
pub mod normalize;
pub mod query;
pub mod types;

pub use client::MarketplaceClient;
