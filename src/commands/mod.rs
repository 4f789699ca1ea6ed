//! CLI command implementations for riskgauge.
//!
//! Available commands:
//! - **eval**: Evaluate a single metric value against its gauge
//! - **report**: Evaluate every metric of a scoring-service payload
//! - **validate**: Check a registry file and list every problem
//! - **list**: Show the registered metrics and their gauges
//! - **init**: Write a `.riskgauge.toml` with the built-in registry

pub mod eval;
pub mod init;
pub mod list;
pub mod report;
pub mod validate;

pub use eval::{evaluate_value, EvalConfig};
pub use init::init_config;
pub use list::list_metrics;
pub use report::{run_report, ReportConfig};
pub use validate::validate_config;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::{load_config, load_config_from_path, DisplaySettings, MetricRegistry};

/// Registry and display settings from `--registry`, or from the discovered
/// configuration when no file was given.
pub fn load_registry(path: Option<&Path>) -> Result<(MetricRegistry, DisplaySettings)> {
    let config = match path {
        Some(path) => load_config_from_path(path)
            .with_context(|| format!("Failed to load registry {}", path.display()))?,
        None => load_config(),
    };
    let registry = config.registry().context("Invalid metric registry")?;
    log::debug!("Registry has {} metrics", registry.len());
    Ok((registry, config.display_settings()))
}

/// Buffered writer for `--output`, or stdout.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}
