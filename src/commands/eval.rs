use anyhow::Result;
use std::path::PathBuf;

use crate::formatting::Styler;
use crate::io::output::{create_writer, OutputFormat};
use crate::metric::{MetricValue, NOT_AVAILABLE};
use crate::report::metric_report;

use super::load_registry;

pub struct EvalConfig {
    pub metric: String,
    pub value: Option<String>,
    pub format: OutputFormat,
    pub registry: Option<PathBuf>,
}

/// Parse a command-line value. Omitted or `N/A` means not available; anything
/// else must be a number.
pub fn parse_value(input: Option<&str>) -> Result<MetricValue> {
    let Some(raw) = input.map(str::trim) else {
        return Ok(MetricValue::missing());
    };
    if raw.is_empty() || raw.eq_ignore_ascii_case(NOT_AVAILABLE) {
        return Ok(MetricValue::missing());
    }
    let value = MetricValue::parse(raw);
    if !value.is_available() {
        anyhow::bail!("Invalid value '{}': expected a number or {}", raw, NOT_AVAILABLE);
    }
    Ok(value)
}

pub fn evaluate_value(config: EvalConfig, styler: Styler) -> Result<()> {
    let (registry, settings) = load_registry(config.registry.as_deref())?;

    let Some(spec) = registry.get(&config.metric) else {
        let known: Vec<&str> = registry.iter().map(|spec| spec.id.as_str()).collect();
        anyhow::bail!(
            "Unknown metric '{}'. Registered metrics: {}",
            config.metric,
            known.join(", ")
        );
    };

    let value = parse_value(config.value.as_deref())?;
    let report = metric_report(spec, value, &settings, None);

    let mut writer = create_writer(config.format, Box::new(std::io::stdout()), styler);
    writer.write_metric(&report)?;
    writer.flush()
}
