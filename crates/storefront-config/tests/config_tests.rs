// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for configuration loading.

use storefront_config::diagnostic::ConfigError;
use storefront_config::model::StorefrontConfig;
use storefront_config::{
    load_and_validate_path, load_and_validate_str, load_config_from_path, load_config_from_str,
};
use storefront_core::types::ProductStatus;

#[test]
fn full_config_deserializes() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 3000
log_level = "debug"

[storage]
database_path = "/tmp/shop.db"
wal_mode = false

[marketplace]
api_token = "mkt-token"
marketplace_id = "EBAY_GB"
max_page_size = 40

[payments]
secret_key = "sk_test_abc"
callback_url = "https://shop.example/thanks"

[email]
enabled = true
smtp_host = "smtp.example.com"
from_address = "Gadget Hub <orders@shop.example>"
admin_address = "owner@shop.example"

[catalog]
currency = "NGN"
default_page_size = 20
listed_statuses = ["available"]

[[catalog.categories]]
slug = "phones"
local_category = "phones"
marketplace_category_id = "9355"

[[catalog.categories]]
slug = "accessories"
local_category = "accessories"

[admin]
bearer_token = "let-me-in"
"#;

    let config = load_and_validate_str(toml).expect("valid config");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.storage.database_path, "/tmp/shop.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.marketplace.api_token.as_deref(), Some("mkt-token"));
    assert_eq!(config.marketplace.max_page_size, 40);
    assert_eq!(config.payments.secret_key.as_deref(), Some("sk_test_abc"));
    assert_eq!(config.payments.success_event, "charge.success");
    assert!(config.email.enabled);
    assert_eq!(config.catalog.currency, "NGN");
    assert_eq!(config.catalog.listed_statuses, vec![ProductStatus::Available]);
    assert_eq!(config.catalog.categories.len(), 2);
    assert_eq!(
        config
            .catalog
            .category("PHONES")
            .and_then(|c| c.marketplace_category_id.as_deref()),
        Some("9355")
    );
    assert!(config.catalog.category("accessories").unwrap().marketplace_category_id.is_none());
    assert_eq!(config.admin.bearer_token.as_deref(), Some("let-me-in"));
}

#[test]
fn empty_input_yields_defaults() {
    let config = load_config_from_str("").expect("empty TOML is valid");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.marketplace.max_page_size, 50);
    assert_eq!(config.payments.signature_header, "x-paystack-signature");
    assert!(config.marketplace.api_token.is_none());
    assert!(config.payments.secret_key.is_none());
    assert_eq!(
        config.catalog.listed_statuses,
        vec![ProductStatus::Available, ProductStatus::PreOrder]
    );
}

#[test]
fn unknown_key_gets_a_suggestion() {
    let toml = "[payments]\nsecert_key = \"sk\"\n";
    let errors = load_and_validate_str(toml).expect_err("typo must be rejected");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            span,
            ..
        } => {
            assert_eq!(key, "secert_key");
            assert_eq!(suggestion.as_deref(), Some("secret_key"));
            assert!(span.is_some(), "inline source should be located");
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let errors = load_and_validate_str("[telemetry]\nenabled = true\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::UnknownKey { .. }));
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[server]\nport = \"eighty\"\n").unwrap_err();
    assert!(
        matches!(&errors[0], ConfigError::InvalidType { key, .. } if key.contains("port")),
        "got {errors:?}"
    );
}

#[test]
fn category_without_local_name_is_missing_key() {
    let toml = "[[catalog.categories]]\nslug = \"phones\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(
        matches!(&errors[0], ConfigError::MissingKey { key } if key.contains("local_category")),
        "got {errors:?}"
    );
}

#[test]
fn semantic_errors_surface_after_parsing() {
    let toml = "[marketplace]\nmax_page_size = 10\n\n[catalog]\ndefault_page_size = 25\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors[0].to_string().contains("exceeds marketplace.max_page_size"));
}

#[test]
fn secrets_are_redacted_in_debug() {
    let toml = r#"
[marketplace]
api_token = "mkt-secret"
[payments]
secret_key = "sk_live_secret"
[admin]
bearer_token = "admin-secret"
"#;
    let config = load_config_from_str(toml).unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("mkt-secret"));
    assert!(!debug.contains("sk_live_secret"));
    assert!(!debug.contains("admin-secret"));
    assert!(debug.contains("[redacted]"));
}

#[test]
fn defaults_survive_a_toml_round_trip() {
    let rendered = toml::to_string(&StorefrontConfig::default()).expect("serializable");
    let reloaded = load_and_validate_str(&rendered).expect("defaults reload");
    assert_eq!(reloaded.server.port, 8080);
    assert_eq!(reloaded.catalog.default_page_size, 24);
}

#[test]
fn env_overrides_file_values() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("shop.toml", "[server]\nport = 4000\n")?;
        jail.set_env("STOREFRONT_SERVER_PORT", "5000");
        jail.set_env("STOREFRONT_PAYMENTS_SECRET_KEY", "sk_from_env");

        let config = load_config_from_path(std::path::Path::new("shop.toml"))?;
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.payments.secret_key.as_deref(), Some("sk_from_env"));
        Ok(())
    });
}

#[test]
fn explicit_path_errors_carry_file_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront.toml");
    std::fs::write(&path, "[server]\nprot = 9000\n").unwrap();

    let errors = load_and_validate_path(&path).unwrap_err();
    match &errors[0] {
        ConfigError::UnknownKey { suggestion, src, .. } => {
            assert_eq!(suggestion.as_deref(), Some("port"));
            assert!(src.is_some());
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}
