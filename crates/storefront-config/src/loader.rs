// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order is `/etc/storefront/storefront.toml`, then the user config
//! directory, then `./storefront.toml`, with `STOREFRONT_*` environment
//! variables applied last.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::StorefrontConfig;

/// Name of the configuration file at every level of the hierarchy.
pub const CONFIG_FILE: &str = "storefront.toml";

/// Sections that environment variables may target.
const SECTIONS: &[&str] = &[
    "server",
    "storage",
    "marketplace",
    "payments",
    "email",
    "catalog",
    "admin",
];

/// System-wide configuration file.
pub fn system_config_path() -> PathBuf {
    Path::new("/etc/storefront").join(CONFIG_FILE)
}

/// Per-user configuration file, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("storefront").join(CONFIG_FILE))
}

/// Load configuration from the file hierarchy with env var overrides.
pub fn load_config() -> Result<StorefrontConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from an inline TOML string only. No files, no env.
pub fn load_config_from_str(toml_content: &str) -> Result<StorefrontConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StorefrontConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file, with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<StorefrontConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StorefrontConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The full hierarchy before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(StorefrontConfig::default()))
        .merge(Toml::file(system_config_path()))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider mapping `STOREFRONT_<SECTION>_<KEY>` to `section.key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `STOREFRONT_PAYMENTS_SECRET_KEY` lands on `payments.secret_key`.
fn env_provider() -> Env {
    Env::prefixed("STOREFRONT_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    SECTIONS
        .iter()
        .find_map(|section| {
            key.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|rest| format!("{section}.{rest}"))
        })
        .unwrap_or_else(|| key.to_string())
}
