// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::StorefrontConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every problem instead of stopping at the first.
pub fn validate_config(config: &StorefrontConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::validation("server.host must not be empty"));
    } else if host.parse::<std::net::IpAddr>().is_err()
        && !host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        errors.push(ConfigError::validation(format!(
            "server.host `{host}` is not a valid IP address or hostname"
        )));
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "server.log_level must be one of {}, got `{}`",
            LOG_LEVELS.join(", "),
            config.server.log_level
        )));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "storage.database_path must not be empty",
        ));
    }

    for (name, url) in [
        ("marketplace.base_url", &config.marketplace.base_url),
        ("payments.base_url", &config.payments.base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::validation(format!(
                "{name} must start with http:// or https://, got `{url}`"
            )));
        }
    }

    if config.marketplace.max_page_size == 0 {
        errors.push(ConfigError::validation(
            "marketplace.max_page_size must be at least 1",
        ));
    }

    if config.catalog.default_page_size == 0 {
        errors.push(ConfigError::validation(
            "catalog.default_page_size must be at least 1",
        ));
    } else if config.catalog.default_page_size > config.marketplace.max_page_size {
        errors.push(ConfigError::validation(format!(
            "catalog.default_page_size ({}) exceeds marketplace.max_page_size ({})",
            config.catalog.default_page_size, config.marketplace.max_page_size
        )));
    }

    if config.catalog.currency.len() != 3 {
        errors.push(ConfigError::validation(format!(
            "catalog.currency must be a three-letter code, got `{}`",
            config.catalog.currency
        )));
    }

    if config.catalog.listed_statuses.is_empty() {
        errors.push(ConfigError::validation(
            "catalog.listed_statuses must name at least one status",
        ));
    }
    for status in &config.catalog.listed_statuses {
        if !status.is_purchasable() {
            errors.push(ConfigError::validation(format!(
                "catalog.listed_statuses may only contain available or pre_order, got `{status}`"
            )));
        }
    }

    if config.payments.signature_header.trim().is_empty() {
        errors.push(ConfigError::validation(
            "payments.signature_header must not be empty",
        ));
    }

    let mut slugs = HashSet::new();
    for category in &config.catalog.categories {
        if category.slug.trim().is_empty() {
            errors.push(ConfigError::validation(
                "catalog.categories entries need a non-empty slug",
            ));
        } else if !slugs.insert(category.slug.to_ascii_lowercase()) {
            errors.push(ConfigError::validation(format!(
                "duplicate category slug `{}`",
                category.slug
            )));
        }
    }

    if config.email.enabled {
        for (name, value) in [
            ("email.smtp_host", &config.email.smtp_host),
            ("email.from_address", &config.email.from_address),
        ] {
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                errors.push(ConfigError::validation(format!(
                    "{name} is required when email.enabled = true"
                )));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
