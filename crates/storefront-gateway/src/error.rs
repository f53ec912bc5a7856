// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of domain errors into HTTP responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, error};

use storefront_core::StorefrontError;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler error wrapper. Every handler returns `Result<_, ApiError>`.
#[derive(Debug)]
pub struct ApiError(pub StorefrontError);

impl From<StorefrontError> for ApiError {
    fn from(err: StorefrontError) -> Self {
        Self(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(StorefrontError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(StorefrontError::Validation(rejection.body_text()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(StorefrontError::MalformedPayload(rejection.body_text()))
    }
}

/// HTTP status for each error kind.
pub fn status_for(err: &StorefrontError) -> StatusCode {
    match err {
        StorefrontError::InvalidSignature => StatusCode::UNAUTHORIZED,
        StorefrontError::MalformedPayload(_) | StorefrontError::Validation(_) => {
            StatusCode::BAD_REQUEST
        }
        StorefrontError::NotFound { .. } => StatusCode::NOT_FOUND,
        StorefrontError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        StorefrontError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
        StorefrontError::Config(_)
        | StorefrontError::Storage { .. }
        | StorefrontError::Notification { .. }
        | StorefrontError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "request failed");
            "internal error".to_string()
        } else if status == StatusCode::SERVICE_UNAVAILABLE {
            // Names the missing setting in the log, not the response.
            error!(error = %self.0, "request needs unconfigured feature");
            "service not configured".to_string()
        } else {
            debug!(error = %self.0, status = status.as_u16(), "request rejected");
            self.0.to_string()
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
