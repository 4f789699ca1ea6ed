use crate::config::{RiskgaugeConfig, CONFIG_FILE_NAME};
use crate::io;
use anyhow::{Context, Result};
use std::path::PathBuf;

const HEADER: &str = "\
# Riskgauge Configuration
#
# Every built-in metric is listed below. Edit an entry to change its gauge,
# delete entries you do not need to override, or add new metric ids with a
# `kind`. Set `replace_builtin = true` to use only the metrics in this file.

";

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let body = toml::to_string_pretty(&RiskgaugeConfig::template())
        .context("Failed to serialize the default registry")?;
    io::write_file(&config_path, &format!("{HEADER}{body}"))?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}
