//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use tracing_subscriber::EnvFilter;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, LogFormat};
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
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    ctx.output.info("[catalog]");
    ctx.output.kv(
        "path",
        ctx.config
            .catalog
            .path
            .as_deref()
            .unwrap_or("(built-in demo catalog)"),
    );

    ctx.output.info("[checkout]");
    ctx.output
        .kv("clear_policy", ctx.config.checkout.clear_policy.as_str());

    ctx.output.info("[logging]");
    let format = match ctx.config.logging.format {
        LogFormat::Text => "text",
        LogFormat::Json => "json",
    };
    ctx.output.kv("format", format);
    ctx.output.kv("filter", &ctx.config.logging.filter);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("vividcart.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();

    if let Err(e) = EnvFilter::try_new(&ctx.config.logging.filter) {
        errors.push(format!("logging.filter is invalid: {}", e));
    }

    match ctx.catalog() {
        Ok(catalog) if catalog.is_empty() => {
            ctx.output.warn("Warning: catalog has no products");
        }
        Ok(catalog) => ctx
            .output
            .kv("catalog", &format!("{} products", catalog.len())),
        Err(e) => errors.push(format!("{:#}", e)),
    }

    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }
    bail!("Configuration has {} error(s)", errors.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;

    fn context(config: CliConfig, dir: &std::path::Path) -> Context {
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(CliConfig::default(), dir.path());

        init_config(false, &ctx).unwrap();
        assert!(dir.path().join("vividcart.toml").exists());
        assert!(init_config(false, &ctx).is_err());
        assert!(init_config(true, &ctx).is_ok());
    }

    #[test]
    fn test_validate_default_config() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config(&context(CliConfig::default(), dir.path())).is_ok());
    }

    #[test]
    fn test_validate_reports_bad_catalog() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "not json").unwrap();

        let mut config = CliConfig::default();
        config.catalog.path = Some("bad.json".to_string());
        let err = validate_config(&context(config, dir.path())).unwrap_err();
        assert!(err.to_string().contains("1 error"));
    }
}
