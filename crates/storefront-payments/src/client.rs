// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the gateway's transaction-initialize endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use storefront_config::model::PaymentsConfig;
use storefront_core::types::{HealthStatus, TransactionInit, TransactionRequest};
use storefront_core::{Adapter, PaymentGateway, StorefrontError};

const INITIALIZE_PATH: &str = "/transaction/initialize";

const SERVICE: &str = "payment gateway";

#[derive(Debug, Serialize)]
struct InitializeBody<'a> {
    email: &'a str,
    /// Minor units, sent as a string as the gateway documents.
    amount: String,
    currency: &'a str,
    reference: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_url: Option<&'a str>,
    metadata: Metadata,
}

#[derive(Debug, Serialize)]
struct Metadata {
    order_id: i64,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: bool,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct InitializeData {
    authorization_url: String,
    access_code: Option<String>,
    reference: String,
}

/// Gateway client. Only built when a secret key is configured.
#[derive(Clone)]
pub struct PaymentClient {
    client: reqwest::Client,
    initialize_url: String,
    callback_url: Option<String>,
}

impl std::fmt::Debug for PaymentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentClient")
            .field("initialize_url", &self.initialize_url)
            .field("callback_url", &self.callback_url)
            .finish_non_exhaustive()
    }
}

impl PaymentClient {
    /// Fails with `NotConfigured` when `payments.secret_key` is absent.
    pub fn new(config: &PaymentsConfig) -> Result<Self, StorefrontError> {
        let secret = config
            .secret_key
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| StorefrontError::NotConfigured("payments.secret_key".into()))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {secret}"))
            .map_err(|e| StorefrontError::Config(format!("invalid secret key header value: {e}")))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StorefrontError::UpstreamUnavailable {
                service: SERVICE,
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            initialize_url: format!(
                "{}{INITIALIZE_PATH}",
                config.base_url.trim_end_matches('/')
            ),
            callback_url: config.callback_url.clone(),
        })
    }
}

#[async_trait]
impl Adapter for PaymentClient {
    fn name(&self) -> &str {
        "payments"
    }

    async fn health_check(&self) -> Result<HealthStatus, StorefrontError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl PaymentGateway for PaymentClient {
    async fn initialize_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionInit, StorefrontError> {
        let body = InitializeBody {
            email: &request.email,
            amount: request.amount_minor.to_string(),
            currency: &request.currency,
            reference: &request.reference,
            callback_url: self.callback_url.as_deref(),
            metadata: Metadata {
                order_id: request.order_id,
            },
        };

        let response = self
            .client
            .post(&self.initialize_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| StorefrontError::UpstreamUnavailable {
                service: SERVICE,
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, reference = %request.reference, "initialize response received");

        let text = response.text().await.map_err(|e| StorefrontError::UpstreamUnavailable {
            service: SERVICE,
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let envelope = serde_json::from_str::<Envelope<InitializeData>>(&text).ok();

        match envelope {
            Some(Envelope {
                status: true,
                data: Some(data),
                ..
            }) if status.is_success() => Ok(TransactionInit {
                authorization_url: data.authorization_url,
                access_code: data.access_code,
                reference: data.reference,
            }),
            Some(envelope) => {
                warn!(status = %status, message = %envelope.message, "transaction initialize rejected");
                Err(StorefrontError::upstream(
                    SERVICE,
                    format!("gateway returned {status}: {}", envelope.message),
                ))
            }
            None => {
                warn!(status = %status, "transaction initialize returned an unreadable body");
                Err(StorefrontError::upstream(
                    SERVICE,
                    format!("gateway returned {status} with an unreadable body"),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> PaymentsConfig {
        PaymentsConfig {
            base_url: base_url.to_string(),
            secret_key: Some("sk_test_123".into()),
            callback_url: Some("https://shop.example/paid".into()),
            ..Default::default()
        }
    }

    fn request() -> TransactionRequest {
        TransactionRequest {
            order_id: 12,
            reference: "SF-abc".into(),
            email: "ada@example.com".into(),
            amount_minor: 90_000,
            currency: "NGN".into(),
        }
    }

    #[test]
    fn missing_secret_is_not_configured() {
        let err = PaymentClient::new(&PaymentsConfig::default()).unwrap_err();
        assert!(matches!(err, StorefrontError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn initialize_sends_amount_reference_and_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INITIALIZE_PATH))
            .and(header("authorization", "Bearer sk_test_123"))
            .and(body_partial_json(serde_json::json!({
                "email": "ada@example.com",
                "amount": "90000",
                "currency": "NGN",
                "reference": "SF-abc",
                "callback_url": "https://shop.example/paid",
                "metadata": {"order_id": 12}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": true,
                "message": "Authorization URL created",
                "data": {
                    "authorization_url": "https://checkout.example/xyz",
                    "access_code": "xyz",
                    "reference": "SF-abc"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = PaymentClient::new(&config(&server.uri())).unwrap();
        let init = client.initialize_transaction(&request()).await.unwrap();
        assert_eq!(init.authorization_url, "https://checkout.example/xyz");
        assert_eq!(init.access_code.as_deref(), Some("xyz"));
        assert_eq!(init.reference, "SF-abc");
    }

    #[tokio::test]
    async fn rejection_is_upstream_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INITIALIZE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "status": false,
                "message": "Duplicate Transaction Reference"
            })))
            .mount(&server)
            .await;

        let client = PaymentClient::new(&config(&server.uri())).unwrap();
        match client.initialize_transaction(&request()).await.unwrap_err() {
            StorefrontError::UpstreamUnavailable { message, .. } => {
                assert!(message.contains("Duplicate Transaction Reference"));
            }
            other => panic!("expected UpstreamUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreadable_body_is_upstream_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = PaymentClient::new(&config(&server.uri())).unwrap();
        let err = client.initialize_transaction(&request()).await.unwrap_err();
        assert!(matches!(err, StorefrontError::UpstreamUnavailable { .. }));
    }
}
