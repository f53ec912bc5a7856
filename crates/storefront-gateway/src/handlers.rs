// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public storefront handlers: catalog feed, checkout, payment webhook and
//! health.

use std::collections::BTreeMap;

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use futures::future::join_all;
use serde::Serialize;

use storefront_core::types::{HealthStatus, ListingPage};
use storefront_payments::{CheckoutRequest, CheckoutResponse, WebhookOutcome};

use crate::error::ApiError;
use crate::params::SearchParams;
use crate::server::AppState;

/// GET /api/marketplace/search
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ListingPage>, ApiError> {
    let Query(params) = params?;
    let request = params.into_request()?;
    Ok(Json(state.feed.search(&request).await?))
}

/// GET /api/marketplace/category/{category}
pub async fn browse_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ListingPage>, ApiError> {
    let Query(params) = params?;
    let request = params.into_request()?;
    Ok(Json(state.feed.browse_category(&category, &request).await?))
}

/// POST /api/checkout
pub async fn checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CheckoutResponse>), ApiError> {
    let Json(request) = payload?;
    let response = state.checkout.checkout(&request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/webhooks/payment
///
/// Takes the raw body: the signature covers the exact bytes received.
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookOutcome>, ApiError> {
    let signature = headers
        .get(state.signature_header.as_str())
        .and_then(|v| v.to_str().ok());
    Ok(Json(state.webhooks.handle(&body, signature).await?))
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, `degraded` or `unhealthy`.
    pub status: &'static str,
    pub version: String,
    pub uptime_secs: u64,
    pub components: BTreeMap<String, ComponentHealth>,
}

#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// GET /health
///
/// 503 when any component is unhealthy. Degraded components (for example a
/// marketplace without a token) still answer 200.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let checks = join_all(state.components.iter().map(|c| async move {
        let status = c
            .health_check()
            .await
            .unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string()));
        (c.name().to_string(), status)
    }))
    .await;

    let mut overall = "ok";
    let mut components = BTreeMap::new();
    for (name, status) in checks {
        let component = match status {
            HealthStatus::Healthy => ComponentHealth {
                status: "healthy",
                detail: None,
            },
            HealthStatus::Degraded(detail) => {
                if overall == "ok" {
                    overall = "degraded";
                }
                ComponentHealth {
                    status: "degraded",
                    detail: Some(detail),
                }
            }
            HealthStatus::Unhealthy(detail) => {
                overall = "unhealthy";
                ComponentHealth {
                    status: "unhealthy",
                    detail: Some(detail),
                }
            }
        };
        components.insert(name, component);
    }

    let code = if overall == "unhealthy" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (
        code,
        Json(HealthResponse {
            status: overall,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs: state.start_time.elapsed().as_secs(),
            components,
        }),
    )
}
