// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `storefront config check`.

use storefront_config::StorefrontConfig;

fn secret(value: &Option<String>) -> &'static str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => "set",
        _ => "not set",
    }
}

/// Summary lines for a validated config. Secrets show as set/not set.
pub fn summary(config: &StorefrontConfig) -> Vec<String> {
    let mut lines = vec![
        format!("server:      {}:{} (log level {})", config.server.host, config.server.port, config.server.log_level),
        format!("database:    {} (wal {})", config.storage.database_path, config.storage.wal_mode),
        format!(
            "marketplace: {} [{}], token {}",
            config.marketplace.base_url,
            config.marketplace.marketplace_id,
            secret(&config.marketplace.api_token)
        ),
        format!(
            "payments:    {}, secret key {}, signature header {}",
            config.payments.base_url,
            secret(&config.payments.secret_key),
            config.payments.signature_header
        ),
        format!(
            "email:       {}",
            if config.email.enabled {
                config.email.smtp_host.clone().unwrap_or_default()
            } else {
                "disabled".to_string()
            }
        ),
        format!(
            "catalog:     {} currency, page size {}, {} categories",
            config.catalog.currency,
            config.catalog.default_page_size,
            config.catalog.categories.len()
        ),
        format!("admin:       token {}", secret(&config.admin.bearer_token)),
    ];

    if config.marketplace.api_token.is_none() {
        lines.push("warning: no marketplace token; feeds serve local inventory only".into());
    }
    if config.payments.secret_key.is_none() {
        lines.push("warning: no payment secret; checkout and webhooks answer 503".into());
    }
    if config.admin.bearer_token.is_none() {
        lines.push("warning: no admin token; back-office routes reject every request".into());
    }
    lines
}

pub fn print_summary(config: &StorefrontConfig) {
    println!("configuration OK");
    for line in summary(config) {
        println!("  {line}");
    }
}
