use anyhow::Result;
use std::path::Path;

use crate::config::load_config_from_path;
use crate::error::ConfigError;
use crate::formatting::Styler;

/// Check a registry file. Every validation problem is printed before the
/// command fails.
pub fn validate_config(path: &Path, styler: Styler) -> Result<()> {
    let config = load_config_from_path(path)?;

    match config.registry() {
        Ok(registry) => {
            println!(
                "{} {}: {} metrics",
                styler.success("OK"),
                path.display(),
                registry.len()
            );
            Ok(())
        }
        Err(ConfigError::Invalid(issues)) => {
            for issue in &issues {
                eprintln!("  {} {}", styler.error("✗"), issue);
            }
            anyhow::bail!(
                "{} problem(s) found in {}",
                issues.len(),
                path.display()
            )
        }
        Err(e) => Err(e.into()),
    }
}
