//! Smoothie CLI - Command line driver for the smoothie storefront.
//!
//! Commands:
//! - `smoothie menu` - List the menu or the signature line
//! - `smoothie build` - Price a build-your-own smoothie
//! - `smoothie order` - Run a scripted order through checkout
//! - `smoothie config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ConfigArgs, MenuArgs, OrderArgs};

/// Smoothie CLI - Browse the menu and place simulated orders
#[derive(Parser)]
#[command(name = "smoothie")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List menu items
    Menu(MenuArgs),

    /// Price a custom smoothie
    Build(BuildArgs),

    /// Run an order file through checkout
    Order(OrderArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; --verbose raises the default.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let result = match cli.command {
        Commands::Menu(args) => commands::menu::run(args, &ctx).await,
        Commands::Build(args) => commands::build::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
