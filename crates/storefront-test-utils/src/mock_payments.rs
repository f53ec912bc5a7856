// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock payment gateway and notifier.

use async_trait::async_trait;
use tokio::sync::Mutex;

use storefront_core::types::{HealthStatus, Sale, TransactionInit, TransactionRequest};
use storefront_core::{Adapter, Notifier, PaymentGateway, StorefrontError};

/// Answers every initialization with `https://pay.test/{reference}`.
#[derive(Default)]
pub struct MockPaymentGateway {
    failing: bool,
    requests: Mutex<Vec<TransactionRequest>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that rejects every initialization.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn requests(&self) -> Vec<TransactionRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Adapter for MockPaymentGateway {
    fn name(&self) -> &str {
        "payments"
    }

    async fn health_check(&self) -> Result<HealthStatus, StorefrontError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn initialize_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionInit, StorefrontError> {
        self.requests.lock().await.push(request.clone());
        if self.failing {
            return Err(StorefrontError::upstream(
                "payment gateway",
                "503 Service Unavailable",
            ));
        }
        Ok(TransactionInit {
            authorization_url: format!("https://pay.test/{}", request.reference),
            access_code: Some("mock-access".into()),
            reference: request.reference.clone(),
        })
    }
}

/// Captures every confirmation. Optionally fails after recording.
#[derive(Default)]
pub struct RecordingNotifier {
    failing: bool,
    sent: Mutex<Vec<Sale>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<Sale> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn payment_completed(&self, sale: &Sale) -> Result<(), StorefrontError> {
        self.sent.lock().await.push(sale.clone());
        if self.failing {
            return Err(StorefrontError::Notification {
                message: "mock smtp refused".into(),
                source: None,
            });
        }
        Ok(())
    }
}
