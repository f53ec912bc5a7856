// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the Storefront back end.
//!
//! WAL-mode SQLite with embedded migrations. Every statement runs on the
//! single `tokio-rusqlite` background thread, so writes are serialized
//! without in-process locking.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
