//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use smoothie_commerce::StorefrontConfig;

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["smoothie.toml", ".smoothie.toml", "smoothie.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Storefront rules: shipping, payment, builder and menu settings.
    #[serde(flatten)]
    pub storefront: StorefrontConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
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

/// Generate a default smoothie.toml config file.
pub fn generate_default_config() -> String {
    let defaults = StorefrontConfig::default();
    format!(
        r#"# Smoothie storefront configuration

[shipping]
# Orders at or above this subtotal ship free.
free_threshold = {free_threshold}
flat_fee = {flat_fee}

[payment]
# Simulated processing time.
delay_ms = {delay_ms}

[builder]
max_fruits = {max_fruits}

[menu]
page_size = {page_size}
page_step = {page_step}
"#,
        free_threshold = defaults.shipping.free_threshold.amount,
        flat_fee = defaults.shipping.flat_fee.amount,
        delay_ms = defaults.payment.delay_ms,
        max_fruits = defaults.builder.max_fruits,
        page_size = defaults.menu.page_size,
        page_step = defaults.menu.page_step,
    )
}
