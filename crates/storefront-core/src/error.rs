// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Storefront back end.

use thiserror::Error;

/// The primary error type used across all Storefront adapter traits and services.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration errors (invalid TOML, bad values detected at startup).
    #[error("configuration error: {0}")]
    Config(String),

    /// A required secret or environment value is absent at request time.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A third-party service (marketplace, payment gateway) could not be reached
    /// or answered with a non-success status.
    #[error("{service} unavailable: {message}")]
    UpstreamUnavailable {
        service: &'static str,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Webhook signature did not match the recomputed signature.
    #[error("invalid webhook signature")]
    InvalidSignature,

    /// An inbound payload could not be parsed or lacks a required field.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// The requested entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Request input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Email notification could not be built or delivered.
    #[error("notification error: {message}")]
    Notification {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StorefrontError {
    /// Shorthand for an upstream failure without an underlying source error.
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            service,
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when the error indicates a degraded third-party source
    /// that callers may skip instead of failing the request.
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::NotConfigured(_)
        )
    }
}
