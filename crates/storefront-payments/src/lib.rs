// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payments: checkout, the gateway client and inbound webhook handling.
//!
//! Outbound, [`CheckoutService`] records a pending sale and opens a gateway
//! transaction through [`PaymentClient`]. Inbound, [`WebhookProcessor`]
//! verifies the HMAC-SHA512 signature of each callback before completing
//! the referenced sale.

pub mod checkout;
pub mod client;
pub mod event;
pub mod signature;
pub mod webhook;

pub use checkout::{CartLine, CheckoutRequest, CheckoutResponse, CheckoutService};
pub use client::PaymentClient;
pub use webhook::{WebhookOutcome, WebhookProcessor};
