// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Storefront integration tests.
//!
//! Provides fakes for every third-party collaborator and a harness that
//! assembles the full HTTP router over a temporary SQLite database, so
//! tests run without network access.
//!
//! # Components
//!
//! - [`MockMarketplace`] - canned marketplace pages, records every query
//! - [`MockPaymentGateway`] - fake transaction initialization
//! - [`RecordingNotifier`] - captures payment confirmations
//! - [`TestHarness`] - router + storage + fakes, driven with `oneshot`

pub mod fixtures;
pub mod harness;
pub mod mock_marketplace;
pub mod mock_payments;

pub use harness::{TestHarness, TestResponse};
pub use mock_marketplace::MockMarketplace;
pub use mock_payments::{MockPaymentGateway, RecordingNotifier};
