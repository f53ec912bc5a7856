// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end router tests.
//!
//! `TestHarness` assembles the complete HTTP stack with mock collaborators
//! and a temp SQLite database. Requests are driven through the router with
//! `tower::ServiceExt::oneshot`, no socket involved.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use tower::ServiceExt;

use storefront_catalog::CatalogFeed;
use storefront_config::model::{CategoryMapping, StorageConfig, StorefrontConfig};
use storefront_core::{
    Adapter, MarketplaceSource, Notifier, PaymentGateway, StorageAdapter, StorefrontError,
};
use storefront_gateway::{AdminAuth, AppState};
use storefront_payments::{CheckoutService, WebhookProcessor};
use storefront_storage::SqliteStorage;

use crate::mock_marketplace::MockMarketplace;
use crate::mock_payments::{MockPaymentGateway, RecordingNotifier};

pub const TEST_PAYMENT_SECRET: &str = "sk_test_storefront";
pub const TEST_ADMIN_TOKEN: &str = "admin-test-token";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: StorefrontConfig,
    /// Custom source, kept twice since trait objects do not upcast.
    marketplace: Option<(Arc<dyn MarketplaceSource>, Arc<dyn Adapter>)>,
    mock_marketplace: Arc<MockMarketplace>,
    gateway: Arc<MockPaymentGateway>,
    notifier: Arc<RecordingNotifier>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let mut config = StorefrontConfig::default();
        config.payments.secret_key = Some(TEST_PAYMENT_SECRET.to_string());
        config.admin.bearer_token = Some(TEST_ADMIN_TOKEN.to_string());
        config.catalog.currency = "NGN".to_string();
        config.catalog.categories = vec![
            CategoryMapping {
                slug: "laptops".into(),
                local_category: "laptops".into(),
                marketplace_category_id: Some("177".into()),
            },
            CategoryMapping {
                slug: "accessories".into(),
                local_category: "accessories".into(),
                marketplace_category_id: None,
            },
        ];
        Self {
            config,
            marketplace: None,
            mock_marketplace: Arc::new(MockMarketplace::default()),
            gateway: Arc::new(MockPaymentGateway::new()),
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    pub fn with_mock_marketplace(mut self, marketplace: MockMarketplace) -> Self {
        self.mock_marketplace = Arc::new(marketplace);
        self
    }

    /// Replace the mock with any marketplace source, e.g. a real client
    /// pointed at a wiremock server.
    pub fn with_marketplace<M: MarketplaceSource>(mut self, marketplace: Arc<M>) -> Self {
        let source: Arc<dyn MarketplaceSource> = marketplace.clone();
        let health: Arc<dyn Adapter> = marketplace;
        self.marketplace = Some((source, health));
        self
    }

    pub fn with_payment_gateway(mut self, gateway: MockPaymentGateway) -> Self {
        self.gateway = Arc::new(gateway);
        self
    }

    pub fn with_notifier(mut self, notifier: RecordingNotifier) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Adjust the configuration before wiring. Runs after the test defaults.
    pub fn with_config(mut self, edit: impl FnOnce(&mut StorefrontConfig)) -> Self {
        edit(&mut self.config);
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, StorefrontError> {
        let temp_dir = tempfile::TempDir::new().map_err(|e| StorefrontError::Storage {
            source: Box::new(e),
        })?;
        let mut config = self.config;
        config.storage = StorageConfig {
            database_path: temp_dir
                .path()
                .join("storefront-test.db")
                .to_string_lossy()
                .into_owned(),
            wal_mode: true,
        };

        let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
        storage.initialize().await?;

        let (marketplace, marketplace_health) = match self.marketplace {
            Some(pair) => pair,
            None => {
                let source: Arc<dyn MarketplaceSource> = self.mock_marketplace.clone();
                let health: Arc<dyn Adapter> = self.mock_marketplace.clone();
                (source, health)
            }
        };
        let gateway: Option<Arc<dyn PaymentGateway>> = config
            .payments
            .secret_key
            .as_ref()
            .map(|_| self.gateway.clone() as Arc<dyn PaymentGateway>);
        let notifier: Arc<dyn Notifier> = self.notifier.clone();

        let state = AppState {
            feed: Arc::new(CatalogFeed::new(
                storage.clone(),
                marketplace,
                config.catalog.clone(),
                config.marketplace.max_page_size,
            )),
            checkout: Arc::new(CheckoutService::new(
                storage.clone(),
                gateway,
                config.catalog.currency.clone(),
            )),
            webhooks: Arc::new(WebhookProcessor::new(
                &config.payments,
                storage.clone(),
                notifier,
            )),
            storage: storage.clone(),
            components: vec![
                storage.clone() as Arc<dyn Adapter>,
                marketplace_health,
            ],
            signature_header: config.payments.signature_header.to_ascii_lowercase(),
            admin: AdminAuth::from(&config.admin),
            start_time: Instant::now(),
        };

        Ok(TestHarness {
            router: storefront_gateway::router(state),
            storage,
            marketplace: self.mock_marketplace,
            gateway: self.gateway,
            notifier: self.notifier,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// Status and parsed JSON body of a routed request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// `Value::Null` for empty bodies.
    pub body: serde_json::Value,
}

/// A complete storefront with mock collaborators and temp storage.
pub struct TestHarness {
    pub router: Router,
    /// SQLite storage (temp DB, removed on drop).
    pub storage: Arc<SqliteStorage>,
    /// The mock marketplace. Unused when a custom source was supplied.
    pub marketplace: Arc<MockMarketplace>,
    pub gateway: Arc<MockPaymentGateway>,
    pub notifier: Arc<RecordingNotifier>,
    pub config: StorefrontConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, &[], Body::empty()).await
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> TestResponse {
        self.send(
            Method::POST,
            uri,
            &[(header::CONTENT_TYPE.as_str(), "application/json")],
            Body::from(body.to_string()),
        )
        .await
    }

    /// POST a raw webhook body with an optional signature header.
    pub async fn post_webhook(&self, body: &[u8], signature: Option<&str>) -> TestResponse {
        let header_name = self.config.payments.signature_header.clone();
        let mut headers = vec![(header::CONTENT_TYPE.as_str(), "application/json")];
        if let Some(sig) = signature {
            headers.push((header_name.as_str(), sig));
        }
        self.send(
            Method::POST,
            "/api/webhooks/payment",
            &headers,
            Body::from(body.to_vec()),
        )
        .await
    }

    /// Send an admin request carrying the test bearer token.
    pub async fn admin(
        &self,
        method: Method,
        uri: &str,
        body: Option<&serde_json::Value>,
    ) -> TestResponse {
        let auth = format!("Bearer {TEST_ADMIN_TOKEN}");
        let mut headers = vec![(header::AUTHORIZATION.as_str(), auth.as_str())];
        let body = match body {
            Some(json) => {
                headers.push((header::CONTENT_TYPE.as_str(), "application/json"));
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(method, uri, &headers, body).await
    }

    /// Route one request and collect its JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Body,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let request = request.body(body).unwrap_or_default();

        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        TestResponse { status, body }
    }
}
