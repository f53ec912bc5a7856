// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer-token guard for back-office routes.
//!
//! With no token configured every admin request is rejected (fail-closed).

use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use storefront_config::model::AdminConfig;

use crate::error::ErrorResponse;

#[derive(Clone, Default)]
pub struct AdminAuth {
    pub bearer_token: Option<String>,
}

impl From<&AdminConfig> for AdminAuth {
    fn from(config: &AdminConfig) -> Self {
        Self {
            bearer_token: config.bearer_token.clone().filter(|t| !t.is_empty()),
        }
    }
}

impl std::fmt::Debug for AdminAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuth")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

pub async fn admin_auth(State(auth): State<AdminAuth>, request: Request, next: Next) -> Response {
    let Some(expected) = auth.bearer_token.as_deref() else {
        tracing::error!("admin token not configured -- rejecting request");
        return unauthorized();
    };

    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match presented {
        Some(token) if token == expected => next.run(request).await,
        _ => {
            tracing::warn!(path = %request.uri().path(), "admin request with bad credentials");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "unauthorized".into(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use tower::ServiceExt;

    use super::*;

    fn app(token: Option<&str>) -> Router {
        let auth = AdminAuth {
            bearer_token: token.map(str::to_string),
        };
        Router::new()
            .route("/admin/ping", get(|| async { "pong" }))
            .route_layer(from_fn_with_state(auth, admin_auth))
    }

    async fn status(app: Router, header: Option<&str>) -> StatusCode {
        let mut req = HttpRequest::builder().uri("/admin/ping");
        if let Some(h) = header {
            req = req.header(AUTHORIZATION, h);
        }
        app.oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn accepts_matching_token() {
        assert_eq!(
            status(app(Some("s3cret")), Some("Bearer s3cret")).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn rejects_wrong_or_missing_token() {
        assert_eq!(
            status(app(Some("s3cret")), Some("Bearer nope")).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(app(Some("s3cret")), Some("s3cret")).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status(app(Some("s3cret")), None).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn fails_closed_without_configured_token() {
        assert_eq!(
            status(app(None), Some("Bearer anything")).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn empty_configured_token_counts_as_absent() {
        let auth = AdminAuth::from(&AdminConfig {
            bearer_token: Some(String::new()),
        });
        assert!(auth.bearer_token.is_none());
    }

    #[test]
    fn debug_redacts_token() {
        let auth = AdminAuth {
            bearer_token: Some("s3cret".into()),
        };
        let debug = format!("{auth:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("[redacted]"));
    }
}
