// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound payment webhooks.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use storefront_config::model::PaymentsConfig;
use storefront_core::types::PaymentTransition;
use storefront_core::{Notifier, StorageAdapter, StorefrontError};

use crate::event::WebhookEvent;
use crate::signature;

/// What a verified webhook did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WebhookOutcome {
    /// Not the success event; acknowledged without changes.
    Ignored { event: String },
    /// The sale moved from pending to completed.
    Completed { order_id: i64 },
    /// The sale was already completed; nothing changed.
    AlreadyCompleted { order_id: i64 },
    /// No live sale has this id.
    UnknownOrder { order_id: i64 },
}

/// Verifies gateway callbacks and applies payment completions.
pub struct WebhookProcessor {
    secret: Option<String>,
    success_event: String,
    storage: Arc<dyn StorageAdapter>,
    notifier: Arc<dyn Notifier>,
}

impl WebhookProcessor {
    pub fn new(
        config: &PaymentsConfig,
        storage: Arc<dyn StorageAdapter>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            secret: config.secret_key.clone().filter(|s| !s.is_empty()),
            success_event: config.success_event.clone(),
            storage,
            notifier,
        }
    }

    /// Verify and apply one callback.
    ///
    /// Nothing is read from the payload until the signature checks out.
    pub async fn handle(
        &self,
        body: &[u8],
        signature_header: Option<&str>,
    ) -> Result<WebhookOutcome, StorefrontError> {
        let secret = self
            .secret
            .as_deref()
            .ok_or_else(|| StorefrontError::NotConfigured("payments.secret_key".into()))?;

        let Some(sig) = signature_header else {
            warn!("payment webhook without signature header");
            return Err(StorefrontError::InvalidSignature);
        };
        if let Err(e) = signature::verify(secret.as_bytes(), body, sig) {
            warn!(body_len = body.len(), "payment webhook signature mismatch");
            return Err(e);
        }

        let event = WebhookEvent::parse(body)?;
        if event.event != self.success_event {
            debug!(event = %event.event, "ignoring payment webhook event");
            return Ok(WebhookOutcome::Ignored { event: event.event });
        }

        let order_id = event.order_id()?;
        match self.storage.mark_sale_paid(order_id).await? {
            Some(PaymentTransition::Completed) => {
                info!(
                    order_id,
                    reference = event.data.reference.as_deref().unwrap_or(""),
                    "payment completed"
                );
                self.notify(order_id).await;
                Ok(WebhookOutcome::Completed { order_id })
            }
            Some(PaymentTransition::AlreadyCompleted) => {
                debug!(order_id, "duplicate payment webhook");
                Ok(WebhookOutcome::AlreadyCompleted { order_id })
            }
            None => {
                warn!(order_id, "payment webhook for unknown order");
                Ok(WebhookOutcome::UnknownOrder { order_id })
            }
        }
    }

    /// Notification failures never fail the webhook.
    async fn notify(&self, order_id: i64) {
        let sale = match self.storage.get_sale(order_id).await {
            Ok(Some(sale)) => sale,
            Ok(None) => return,
            Err(e) => {
                warn!(order_id, error = %e, "could not load sale for notification");
                return;
            }
        };
        if let Err(e) = self.notifier.payment_completed(&sale).await {
            warn!(order_id, error = %e, "payment notification failed");
        }
    }
}
