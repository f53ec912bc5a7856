// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP delivery through lettre's async transport.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{debug, info};

use storefront_config::model::EmailConfig;
use storefront_core::types::Sale;
use storefront_core::{Adapter, HealthStatus, Notifier, StorefrontError};

use crate::compose;

/// Port that speaks TLS from the first byte; every other port upgrades
/// with STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    admin: Option<Mailbox>,
}

impl SmtpNotifier {
    pub fn new(config: &EmailConfig) -> Result<Self, StorefrontError> {
        let host = config
            .smtp_host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| StorefrontError::Config("email.smtp_host is required".into()))?;
        let from = parse_mailbox("email.from_address", config.from_address.as_deref())?
            .ok_or_else(|| StorefrontError::Config("email.from_address is required".into()))?;
        let admin = parse_mailbox("email.admin_address", config.admin_address.as_deref())?;

        let relay = if config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|e| StorefrontError::Config(format!("email.smtp_host: {e}")))?;

        let mut builder = relay.port(config.smtp_port);
        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        debug!(host, port = config.smtp_port, "smtp notifier configured");
        Ok(Self {
            transport: builder.build(),
            from,
            admin,
        })
    }
}

fn parse_mailbox(key: &str, raw: Option<&str>) -> Result<Option<Mailbox>, StorefrontError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| StorefrontError::Config(format!("{key}: {e}"))),
    }
}

#[async_trait]
impl Adapter for SmtpNotifier {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn health_check(&self) -> Result<HealthStatus, StorefrontError> {
        Ok(match self.transport.test_connection().await {
            Ok(true) => HealthStatus::Healthy,
            Ok(false) => HealthStatus::Degraded("smtp server refused NOOP".into()),
            Err(e) => HealthStatus::Degraded(e.to_string()),
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn payment_completed(&self, sale: &Sale) -> Result<(), StorefrontError> {
        let message = compose::confirmation_message(sale, &self.from, self.admin.as_ref())?;
        self.transport
            .send(message)
            .await
            .map_err(|e| StorefrontError::Notification {
                message: format!("smtp delivery failed for order {}", sale.id),
                source: Some(Box::new(e)),
            })?;
        info!(order_id = sale.id, "payment confirmation sent");
        Ok(())
    }
}
