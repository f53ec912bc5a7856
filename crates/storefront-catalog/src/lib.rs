// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The unified catalog feed.
//!
//! [`merge`] is the pure local-first merger; [`CatalogFeed`] queries the
//! local catalog and the marketplace concurrently and merges the results.

pub mod feed;
pub mod merge;

pub use feed::{CatalogFeed, SearchRequest};
pub use merge::merge;
