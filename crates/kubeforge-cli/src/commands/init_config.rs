//! `kubeforge init-config`: write the default configuration file.

use std::path::Path;

use crate::{
    cli::{GlobalArgs, InitConfigArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::{OutputManager, Status},
};

pub fn execute(args: InitConfigArgs, global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    let config_path = global.config.clone().unwrap_or_else(AppConfig::config_path);

    if config_path.exists() && !args.force {
        let msg = format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display()
        );
        output.status(Status::Notice, &msg)?;
        return Ok(());
    }

    write_default(&config_path)?;
    let msg = format!("Configuration created at {}", config_path.display());
    output.status(Status::Done, &msg)?;
    Ok(())
}

fn write_default(path: &Path) -> CliResult<()> {
    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create config directory '{}'", parent.display()))?;
    }
    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}
