// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router assembly and the HTTP server loop.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use storefront_catalog::CatalogFeed;
use storefront_config::model::ServerConfig;
use storefront_core::{Adapter, StorageAdapter, StorefrontError};
use storefront_payments::{CheckoutService, WebhookProcessor};

use crate::admin;
use crate::auth::{AdminAuth, admin_auth};
use crate::handlers;

/// Request bodies above this are rejected before reaching a handler.
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<CatalogFeed>,
    pub checkout: Arc<CheckoutService>,
    pub webhooks: Arc<WebhookProcessor>,
    pub storage: Arc<dyn StorageAdapter>,
    /// Components reported by `/health`.
    pub components: Vec<Arc<dyn Adapter>>,
    /// Lower-cased name of the webhook signature header.
    pub signature_header: String,
    pub admin: AdminAuth,
    pub start_time: Instant,
}

/// Build the full route table.
///
/// - GET  /health
/// - GET  /api/marketplace/search
/// - GET  /api/marketplace/category/{category}
/// - POST /api/checkout
/// - POST /api/webhooks/payment
/// - /admin/* (bearer token)
pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/admin/products",
            get(admin::list_products).post(admin::create_product),
        )
        .route(
            "/admin/products/{id}",
            get(admin::get_product)
                .patch(admin::update_product)
                .delete(admin::delete_product),
        )
        .route("/admin/sales", get(admin::list_sales))
        .route("/admin/sales/archived", get(admin::list_archived_sales))
        .route("/admin/sales/{id}", get(admin::get_sale))
        .route("/admin/sales/{id}/fulfillment", put(admin::set_fulfillment))
        .route_layer(from_fn_with_state(state.admin.clone(), admin_auth));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/marketplace/search", get(handlers::search))
        .route(
            "/api/marketplace/category/{category}",
            get(handlers::browse_category),
        )
        .route("/api/checkout", post(handlers::checkout))
        .route("/api/webhooks/payment", post(handlers::payment_webhook))
        .merge(admin_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
}

/// Bind and serve until `shutdown` is cancelled. In-flight requests finish
/// before this returns.
pub async fn serve(
    config: &ServerConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), StorefrontError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StorefrontError::Internal(format!("failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "storefront listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| StorefrontError::Internal(format!("server error: {e}")))?;

    tracing::info!("server stopped");
    Ok(())
}
