//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use smoothie_commerce::{Storefront, StorefrontConfig};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the config came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        if let Some(ref path) = config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Storefront rules in effect.
    pub fn storefront_config(&self) -> &StorefrontConfig {
        &self.config.storefront
    }

    /// Fresh storefront session under the loaded config.
    pub fn storefront(&self) -> Storefront {
        Storefront::new(self.config.storefront.clone())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
