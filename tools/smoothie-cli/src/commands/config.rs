//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force, path } => init_config(force, path.as_deref(), ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = ctx.storefront_config();

    ctx.output.info("");
    ctx.output.info("[shipping]");
    ctx.output.kv("free_threshold", &config.shipping.free_threshold.display());
    ctx.output.kv("flat_fee", &config.shipping.flat_fee.display());

    ctx.output.info("");
    ctx.output.info("[payment]");
    ctx.output.kv("delay_ms", &config.payment.delay_ms.to_string());

    ctx.output.info("");
    ctx.output.info("[builder]");
    ctx.output.kv("max_fruits", &config.builder.max_fruits.to_string());

    ctx.output.info("");
    ctx.output.info("[menu]");
    ctx.output.kv("page_size", &config.menu.page_size.to_string());
    ctx.output.kv("page_step", &config.menu.page_step.to_string());

    Ok(())
}

async fn init_config(force: bool, path: Option<&str>, ctx: &Context) -> Result<()> {
    let config_path = ctx.resolve_path(path.unwrap_or(CONFIG_FILE_NAMES[0]));

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let path_str = config_path.to_string_lossy();
    if path_str.ends_with(".json") {
        CliConfig::default().save(&path_str)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
