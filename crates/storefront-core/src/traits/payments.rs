// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment gateway transaction initialization.

use async_trait::async_trait;

use crate::error::StorefrontError;
use crate::traits::adapter::Adapter;
use crate::types::{TransactionInit, TransactionRequest};

/// Outbound side of the payment gateway. Inbound webhooks are handled by
/// the webhook verifier, not this trait.
#[async_trait]
pub trait PaymentGateway: Adapter {
    /// Opens a payment session and returns where to send the buyer.
    async fn initialize_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionInit, StorefrontError>;
}
