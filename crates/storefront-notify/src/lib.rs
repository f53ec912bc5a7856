// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payment confirmation notifications.
//!
//! [`SmtpNotifier`] mails the buyer (blind-copying the shop inbox) once a
//! payment webhook completes a sale. [`NoopNotifier`] stands in when email
//! is disabled.

pub mod compose;
pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use storefront_config::model::EmailConfig;
use storefront_core::types::Sale;
use storefront_core::{Notifier, StorefrontError};

pub use smtp::SmtpNotifier;

/// Notifier used when `email.enabled` is false.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn payment_completed(&self, sale: &Sale) -> Result<(), StorefrontError> {
        debug!(order_id = sale.id, "email disabled, skipping confirmation");
        Ok(())
    }
}

/// Pick the notifier for the configured email settings.
pub fn build_notifier(config: &EmailConfig) -> Result<Arc<dyn Notifier>, StorefrontError> {
    if !config.enabled {
        return Ok(Arc::new(NoopNotifier));
    }
    Ok(Arc::new(SmtpNotifier::new(config)?))
}
