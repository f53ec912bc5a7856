// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `storefront serve` and `storefront migrate`.
//!
//! Wires SQLite storage, the marketplace and payment clients and the
//! notifier into the HTTP gateway, then serves until a shutdown signal.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use storefront_catalog::CatalogFeed;
use storefront_config::StorefrontConfig;
use storefront_core::{Adapter, PaymentGateway, StorageAdapter, StorefrontError};
use storefront_gateway::{AdminAuth, AppState};
use storefront_marketplace::MarketplaceClient;
use storefront_payments::{CheckoutService, PaymentClient, WebhookProcessor};
use storefront_storage::{Database, SqliteStorage};

use crate::shutdown;

pub async fn run_serve(config: StorefrontConfig) -> Result<(), StorefrontError> {
    init_tracing(&config.server.log_level);
    info!("starting storefront serve");

    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;

    let marketplace = Arc::new(MarketplaceClient::new(&config.marketplace)?);
    if config.marketplace.api_token.is_none() {
        warn!("marketplace.api_token not set; feeds serve local inventory only");
    }

    let payments = match PaymentClient::new(&config.payments) {
        Ok(client) => Some(Arc::new(client)),
        Err(StorefrontError::NotConfigured(what)) => {
            warn!(missing = %what, "payments disabled; checkout and webhooks answer 503");
            None
        }
        Err(e) => return Err(e),
    };

    let notifier = storefront_notify::build_notifier(&config.email)?;

    let mut components: Vec<Arc<dyn Adapter>> = vec![
        storage.clone() as Arc<dyn Adapter>,
        marketplace.clone() as Arc<dyn Adapter>,
    ];
    if let Some(client) = &payments {
        components.push(client.clone());
    }

    let state = AppState {
        feed: Arc::new(CatalogFeed::new(
            storage.clone(),
            marketplace,
            config.catalog.clone(),
            config.marketplace.max_page_size,
        )),
        checkout: Arc::new(CheckoutService::new(
            storage.clone(),
            payments.map(|c| c as Arc<dyn PaymentGateway>),
            config.catalog.currency.clone(),
        )),
        webhooks: Arc::new(WebhookProcessor::new(
            &config.payments,
            storage.clone(),
            notifier,
        )),
        storage: storage.clone(),
        components,
        signature_header: config.payments.signature_header.to_ascii_lowercase(),
        admin: AdminAuth::from(&config.admin),
        start_time: Instant::now(),
    };

    let cancel = shutdown::install_signal_handler();
    let served = storefront_gateway::serve(&config.server, state, cancel).await;

    if let Err(e) = storage.close().await {
        warn!(error = %e, "storage close failed");
    }
    info!("storefront stopped");
    served
}

pub async fn run_migrate(config: &StorefrontConfig) -> Result<(), StorefrontError> {
    init_tracing(&config.server.log_level);
    let db = Database::open(&config.storage.database_path, config.storage.wal_mode).await?;
    db.close().await?;
    println!("database ready at {}", config.storage.database_path);
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
/// `RUST_LOG` overrides it when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("storefront={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
