// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations.
//!
//! The SQL files under `migrations/` are compiled in with refinery's
//! `embed_migrations!` and applied every time a database is opened.

use storefront_core::StorefrontError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Apply pending migrations. Refinery records progress in
/// `refinery_schema_history`, so this is safe to call on every start.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<usize, StorefrontError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(|e| StorefrontError::Storage {
            source: Box::new(e),
        })?;
    Ok(report.applied_migrations().len())
}
