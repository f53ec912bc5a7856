// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Third-party marketplace search.

use async_trait::async_trait;

use crate::error::StorefrontError;
use crate::traits::adapter::Adapter;
use crate::types::{MarketplacePage, MarketplaceQuery};

/// A source of supplemental listings from an external marketplace.
///
/// Failures surface as [`StorefrontError::UpstreamUnavailable`] or
/// [`StorefrontError::NotConfigured`]; callers are expected to continue
/// with local results.
#[async_trait]
pub trait MarketplaceSource: Adapter {
    async fn search(&self, query: &MarketplaceQuery) -> Result<MarketplacePage, StorefrontError>;
}
