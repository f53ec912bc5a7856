// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is a
//! startup error instead of a silently ignored setting.

use serde::{Deserialize, Serialize};
use storefront_core::types::ProductStatus;

/// Top-level Storefront configuration.
///
/// Every section is optional and falls back to defaults suitable for local
/// development. Secrets default to `None`; the features that need them
/// answer with service-unavailable until they are set.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorefrontConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Third-party marketplace search API.
    #[serde(default)]
    pub marketplace: MarketplaceConfig,

    /// Payment gateway (transactions and webhooks).
    #[serde(default)]
    pub payments: PaymentsConfig,

    /// Outbound email notifications.
    #[serde(default)]
    pub email: EmailConfig,

    /// Unified catalog feed settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Back-office access.
    #[serde(default)]
    pub admin: AdminConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("storefront").join("storefront.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("storefront.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Marketplace search API configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MarketplaceConfig {
    /// API root; the search path is appended to it.
    #[serde(default = "default_marketplace_base_url")]
    pub base_url: String,

    /// OAuth application token. `None` disables marketplace results.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Value sent in the marketplace-id header.
    #[serde(default = "default_marketplace_id")]
    pub marketplace_id: String,

    /// Whole-request timeout handed to the HTTP client.
    #[serde(default = "default_marketplace_timeout")]
    pub timeout_secs: u64,

    /// Largest page size forwarded upstream.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            base_url: default_marketplace_base_url(),
            api_token: None,
            marketplace_id: default_marketplace_id(),
            timeout_secs: default_marketplace_timeout(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl std::fmt::Debug for MarketplaceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketplaceConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("marketplace_id", &self.marketplace_id)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_page_size", &self.max_page_size)
            .finish()
    }
}

fn default_marketplace_base_url() -> String {
    "https://api.ebay.com".to_string()
}

fn default_marketplace_id() -> String {
    "EBAY_US".to_string()
}

fn default_marketplace_timeout() -> u64 {
    10
}

fn default_max_page_size() -> u32 {
    50
}

/// Payment gateway configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentsConfig {
    /// Gateway API root.
    #[serde(default = "default_payments_base_url")]
    pub base_url: String,

    /// Secret key: bearer credential for API calls and HMAC key for webhooks.
    /// `None` makes checkout and the webhook answer 503.
    #[serde(default)]
    pub secret_key: Option<String>,

    /// Header carrying the webhook signature.
    #[serde(default = "default_signature_header")]
    pub signature_header: String,

    /// Event type that marks a successful payment.
    #[serde(default = "default_success_event")]
    pub success_event: String,

    /// Where the gateway sends the buyer after paying.
    #[serde(default)]
    pub callback_url: Option<String>,

    /// Whole-request timeout handed to the HTTP client.
    #[serde(default = "default_payments_timeout")]
    pub timeout_secs: u64,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            base_url: default_payments_base_url(),
            secret_key: None,
            signature_header: default_signature_header(),
            success_event: default_success_event(),
            callback_url: None,
            timeout_secs: default_payments_timeout(),
        }
    }
}

impl std::fmt::Debug for PaymentsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentsConfig")
            .field("base_url", &self.base_url)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[redacted]"))
            .field("signature_header", &self.signature_header)
            .field("success_event", &self.success_event)
            .field("callback_url", &self.callback_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_payments_base_url() -> String {
    "https://api.paystack.co".to_string()
}

fn default_signature_header() -> String {
    "x-paystack-signature".to_string()
}

fn default_success_event() -> String {
    "charge.success".to_string()
}

fn default_payments_timeout() -> u64 {
    15
}

/// SMTP notification configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmailConfig {
    /// Send order emails. When false, notifications are skipped.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub smtp_host: Option<String>,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Sender mailbox, e.g. `Gadget Hub <orders@example.com>`.
    #[serde(default)]
    pub from_address: Option<String>,

    /// Shop inbox that receives a blind copy of every confirmation.
    #[serde(default)]
    pub admin_address: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: None,
            smtp_port: default_smtp_port(),
            username: None,
            password: None,
            from_address: None,
            admin_address: None,
        }
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("enabled", &self.enabled)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("from_address", &self.from_address)
            .field("admin_address", &self.admin_address)
            .finish()
    }
}

fn default_smtp_port() -> u16 {
    587
}

/// Unified catalog feed configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Currency local prices are stored in.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Page size when the request omits one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Local statuses shown to shoppers.
    #[serde(default = "default_listed_statuses")]
    pub listed_statuses: Vec<ProductStatus>,

    /// Storefront category slugs and their local/marketplace identifiers.
    #[serde(default)]
    pub categories: Vec<CategoryMapping>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            default_page_size: default_page_size(),
            listed_statuses: default_listed_statuses(),
            categories: Vec::new(),
        }
    }
}

impl CatalogConfig {
    /// Looks up a category by its storefront slug (case-insensitive).
    pub fn category(&self, slug: &str) -> Option<&CategoryMapping> {
        self.categories
            .iter()
            .find(|c| c.slug.eq_ignore_ascii_case(slug))
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_page_size() -> u32 {
    24
}

fn default_listed_statuses() -> Vec<ProductStatus> {
    vec![ProductStatus::Available, ProductStatus::PreOrder]
}

/// One storefront category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryMapping {
    /// Identifier used in storefront URLs.
    pub slug: String,

    /// Value of the `category` column for local products.
    pub local_category: String,

    /// Marketplace category id. `None` keeps the category local-only.
    #[serde(default)]
    pub marketplace_category_id: Option<String>,
}

/// Back-office configuration.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Bearer token for `/admin` routes. `None` rejects every admin request.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
