//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vividcart_commerce::checkout::ClearPolicy;

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["vividcart.toml", ".vividcart.toml", "vividcart.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Checkout behavior.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config content, choosing the format from the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Where products come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// JSON file with an array of products. The built-in demo catalog is
    /// used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Checkout configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfig {
    /// Whether to empty the cart after an accepted checkout.
    #[serde(default)]
    pub clear_policy: ClearPolicy,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines (for development).
    #[default]
    Text,
    /// JSON lines (for log aggregation).
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Default filter directives, overridden by `RUST_LOG`.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "vividcart=info,vividcart_commerce=warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_filter(),
        }
    }
}

/// Generate a default vividcart.toml config file.
pub fn generate_default_config() -> String {
    r#"# VividCart storefront configuration

[catalog]
# JSON array of {id, name, price, image, rating}; prices in cents.
# Leave unset to use the built-in demo catalog.
# path = "catalog.json"

[checkout]
# "keep_cart" or "clear_on_accepted"
clear_policy = "keep_cart"

[logging]
# "text" or "json"
format = "text"
filter = "vividcart=info,vividcart_commerce=warn"
"#
    .to_string()
}
