//! CLI command implementations.

pub mod build;
pub mod config;
pub mod menu;
pub mod order;

use clap::{Args, Subcommand};

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Category filter: all, detox, energy or protein.
    #[arg(long)]
    pub category: Option<String>,

    /// List the signature line instead of the menu.
    #[arg(short, long)]
    pub signature: bool,

    /// Press "load more" this many times.
    #[arg(long, default_value = "0")]
    pub more: usize,
}

/// Arguments for the build command.
#[derive(Args)]
pub struct BuildArgs {
    /// Base ingredient id.
    #[arg(short, long, required_unless_present = "list")]
    pub base: Option<String>,

    /// Fruit ingredient id (repeatable).
    #[arg(short, long = "fruit")]
    pub fruits: Vec<String>,

    /// Add-on ingredient id (repeatable).
    #[arg(short, long = "addon")]
    pub addons: Vec<String>,

    /// List the available ingredients instead of building.
    #[arg(long, conflicts_with_all = ["fruits", "addons"])]
    pub list: bool,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Order file (TOML or JSON).
    pub file: String,

    /// Skip the simulated payment delay.
    #[arg(long)]
    pub no_delay: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// Where to write it (default: smoothie.toml). A `.json` path writes JSON.
        #[arg(short, long)]
        path: Option<String>,
    },
}
