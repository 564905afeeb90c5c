//! Configuration management commands.

use anyhow::{bail, Result};
use landing_core::{FormKind, LandingConfig, CONFIG_FILE_NAMES};

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[backend]");
    ctx.output.kv("base_url", &ctx.config.backend.base_url);
    for kind in FormKind::ALL {
        ctx.output.kv(
            &format!("{} endpoint", kind),
            &ctx.config.backend.endpoint_url(kind),
        );
    }

    ctx.output.info("[status]");
    ctx.output.kv(
        "success_hide_ms",
        &ctx.config.status.success_hide_ms.to_string(),
    );

    ctx.output.info("[analytics]");
    ctx.output.kv("enabled", &ctx.config.analytics.enabled.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    LandingConfig::default().save(&config_path)?;
    ctx.output
        .success(&format!("Created {}", config_path.display()));

    Ok(())
}
