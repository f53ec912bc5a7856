// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound customer notifications.

use async_trait::async_trait;

use crate::error::StorefrontError;
use crate::types::Sale;

/// Sends order notifications. Callers log failures and carry on.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Tells the buyer (and the shop) that payment for `sale` went through.
    async fn payment_completed(&self, sale: &Sale) -> Result<(), StorefrontError>;
}
