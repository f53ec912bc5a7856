// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook event payloads.

use serde::Deserialize;
use serde_json::Value;
use storefront_core::StorefrontError;

/// A gateway callback. Only the fields the storefront acts on are typed.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub event: String,
    #[serde(default)]
    pub data: EventData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub reference: Option<String>,
    /// Either an object or a JSON-encoded string, depending on how the
    /// transaction was opened.
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl WebhookEvent {
    pub fn parse(body: &[u8]) -> Result<Self, StorefrontError> {
        serde_json::from_slice(body)
            .map_err(|e| StorefrontError::MalformedPayload(format!("invalid event JSON: {e}")))
    }

    /// The sale id carried in `data.metadata.order_id`.
    pub fn order_id(&self) -> Result<i64, StorefrontError> {
        let metadata = match &self.data.metadata {
            Some(Value::String(raw)) => serde_json::from_str::<Value>(raw).map_err(|e| {
                StorefrontError::MalformedPayload(format!("metadata is not JSON: {e}"))
            })?,
            Some(other) => other.clone(),
            None => return Err(malformed("missing data.metadata")),
        };

        match metadata.get("order_id") {
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| malformed("order_id is not an integer")),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map_err(|_| malformed("order_id is not numeric")),
            Some(_) => Err(malformed("order_id has an unexpected type")),
            None => Err(malformed("missing data.metadata.order_id")),
        }
    }
}

fn malformed(message: &str) -> StorefrontError {
    StorefrontError::MalformedPayload(message.to_string())
}
