use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::benchmarks::Country;
use crate::formatting::Styler;
use crate::io;
use crate::io::output::{create_writer, OutputFormat};
use crate::report::{build_report, BenchmarkContext, ReportOptions};

use super::{load_registry, open_output};

pub struct ReportConfig {
    pub payload: PathBuf,
    pub country: Option<Country>,
    pub sector: Option<String>,
    pub include_missing: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub registry: Option<PathBuf>,
}

fn read_payload(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .context("Failed to read payload from stdin")?;
        Ok(contents)
    } else {
        io::read_file(path).with_context(|| format!("Failed to read payload {}", path.display()))
    }
}

/// Parse a payload, which must be a JSON object.
pub fn parse_payload(contents: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(contents).context("Payload is not valid JSON")? {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("Payload must be a JSON object of metric values"),
    }
}

/// Benchmark context from the payload, with command-line overrides.
pub fn benchmark_context(
    payload: &Map<String, Value>,
    country: Option<Country>,
    sector: Option<&str>,
) -> Option<BenchmarkContext> {
    let from_payload = BenchmarkContext::from_payload(payload);
    if country.is_none() && sector.is_none() {
        return from_payload;
    }
    let sector = sector
        .map(str::to_string)
        .or_else(|| from_payload.as_ref().map(|context| context.sector.clone()))?;
    let country = country
        .or_else(|| from_payload.as_ref().map(|context| context.country))
        .unwrap_or(Country::Usa);
    Some(BenchmarkContext::new(country, sector))
}

pub fn run_report(config: ReportConfig, styler: Styler) -> Result<()> {
    let (registry, settings) = load_registry(config.registry.as_deref())?;
    let payload = parse_payload(&read_payload(&config.payload)?)?;

    let options = ReportOptions {
        include_missing: config.include_missing,
        benchmarks: benchmark_context(&payload, config.country, config.sector.as_deref()),
    };
    let report = build_report(&registry, &payload, &settings, &options);
    log::info!(
        "Evaluated {} metrics from {}",
        report.metrics.len(),
        config.payload.display()
    );

    let mut writer = create_writer(config.format, open_output(config.output.as_deref())?, styler);
    writer.write_report(&report)?;
    writer.flush()
}
