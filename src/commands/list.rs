use anyhow::Result;
use std::path::Path;

use crate::formatting::Styler;
use crate::io::output::{create_writer, OutputFormat};

use super::load_registry;

pub fn list_metrics(registry_path: Option<&Path>, format: OutputFormat, styler: Styler) -> Result<()> {
    let (registry, _) = load_registry(registry_path)?;
    let mut writer = create_writer(format, Box::new(std::io::stdout()), styler);
    writer.write_registry(&registry)?;
    writer.flush()
}
