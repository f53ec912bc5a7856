// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the storefront.
//!
//! Public routes serve the merged catalog feed, checkout and the payment
//! webhook; `/admin` routes sit behind bearer-token middleware. Every
//! failure leaves as a JSON `{ "error": ... }` body via [`ApiError`].

pub mod admin;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod params;
pub mod server;

pub use auth::AdminAuth;
pub use error::ApiError;
pub use server::{AppState, router, serve};
