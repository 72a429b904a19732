//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use console::Term;
use dialoguer::Confirm;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
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

    let format = &ctx.config.format;
    ctx.output.info("");
    ctx.output.info("[format]");
    ctx.output.kv("locale", &format.locale);
    ctx.output.kv("decimal_separator", &format!("{:?}", format.decimal_separator));
    ctx.output.kv("group_separator", &format!("{:?}", format.group_separator));
    ctx.output.kv("min_grouping_digits", &format.min_grouping_digits.to_string());
    ctx.output.kv("symbol_after", &format.symbol_after.to_string());
    let default_digits = format
        .default_fraction_digits
        .map(|d| d.to_string())
        .unwrap_or_else(|| "currency minor units".to_string());
    ctx.output.kv("default_fraction_digits", &default_digits);
    for (code, rule) in &format.currencies {
        let digits = rule
            .fraction_digits
            .map(|d| d.to_string())
            .unwrap_or_else(|| "default".to_string());
        let symbol = rule.symbol.as_deref().unwrap_or("default");
        ctx.output.kv(
            &format!("currencies.{}", code),
            &format!("{} digits, symbol {}", digits, symbol),
        );
    }

    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output
        .kv("strict_currency", &ctx.config.pricing.strict_currency.to_string());

    let catalog = &ctx.config.catalog;
    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output
        .kv("size_option_names", &catalog.size_option_names.join(", "));
    for (name, label) in &catalog.option_labels {
        ctx.output.list_item(&format!("{} → {}", name, label));
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        let interactive = Term::stderr().is_term() && !ctx.output.is_json();
        if !interactive {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        let overwrite = Confirm::new()
            .with_prompt(format!("Overwrite {}?", config_path.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            ctx.output.warn("Kept the existing config file");
            return Ok(());
        }
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.errors();
    let warnings = ctx.config.warnings();

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
