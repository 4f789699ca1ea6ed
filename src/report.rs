//! Whole-report evaluation.
//!
//! A report payload is the flat JSON object the scoring service returns:
//! company metadata next to one entry per metric id, where unavailable
//! metrics are `"N/A"` or `null`.
//!
//! ```json
//! {"companyName": "Acme", "fiscalYear": 2023, "country": "Italy",
//!  "industrySector": "manufacturing", "currentRatio": 1.8, "roa": "N/A"}
//! ```

use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info_span};

use crate::benchmarks::{benchmark_table, Country};
use crate::classification::Zone;
use crate::config::{DisplaySettings, MetricRegistry, MetricSpec};
use crate::engine::{evaluate, GaugeResult};
use crate::metric::{format_display_value, MetricKind, MetricValue};

/// Country and sector used to look up industry benchmarks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkContext {
    pub country: Country,
    pub sector: String,
}

impl BenchmarkContext {
    pub fn new(country: Country, sector: impl Into<String>) -> Self {
        Self {
            country,
            sector: sector.into(),
        }
    }

    /// Read `country` and `industrySector` from a payload. A missing country
    /// means USA; a missing sector means no benchmarks.
    pub fn from_payload(payload: &Map<String, Value>) -> Option<Self> {
        let sector = payload
            .get("industrySector")
            .and_then(Value::as_str)
            .filter(|sector| !sector.is_empty())?;
        let country = match payload.get("country").and_then(Value::as_str) {
            None => Country::Usa,
            Some(name) => match name.parse() {
                Ok(country) => country,
                Err(e) => {
                    debug!("No benchmarks for payload: {}", e);
                    return None;
                }
            },
        };
        Some(Self::new(country, sector))
    }
}

/// Company metadata carried in the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHeader {
    pub company_name: Option<String>,
    pub fiscal_year: Option<String>,
}

impl ReportHeader {
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let text = |key: &str| match payload.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Self {
            company_name: text("companyName"),
            fiscal_year: text("fiscalYear"),
        }
    }
}

/// Evaluated gauge for one metric of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricReport {
    pub id: String,
    pub title: String,
    pub kind: MetricKind,
    pub value: MetricValue,
    pub display_value: String,
    /// Formatted industry reference, for metrics with benchmarks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<String>,
    pub gauge: GaugeResult,
}

/// Zone counts across a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total: usize,
    pub critical: usize,
    pub adequate: usize,
    pub good: usize,
    pub not_available: usize,
}

impl ReportSummary {
    pub fn from_reports(reports: &[MetricReport]) -> Self {
        reports.iter().fold(
            ReportSummary::default(),
            |mut summary, report| {
                summary.total += 1;
                match report.gauge.zone {
                    Zone::Critical => summary.critical += 1,
                    Zone::Adequate => summary.adequate += 1,
                    Zone::Good => summary.good += 1,
                    Zone::NotAvailable => summary.not_available += 1,
                }
                summary
            },
        )
    }

    /// Most severe zone present, `None` when nothing was available.
    pub fn worst_zone(&self) -> Option<Zone> {
        if self.critical > 0 {
            Some(Zone::Critical)
        } else if self.adequate > 0 {
            Some(Zone::Adequate)
        } else if self.good > 0 {
            Some(Zone::Good)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Also report registry metrics absent from the payload, as N/A
    pub include_missing: bool,
    pub benchmarks: Option<BenchmarkContext>,
}

/// A fully evaluated report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub header: ReportHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmarks: Option<BenchmarkContext>,
    pub metrics: Vec<MetricReport>,
    pub summary: ReportSummary,
}

/// Evaluate every registry metric present in `payload`, in registry order.
pub fn evaluate_report(
    registry: &MetricRegistry,
    payload: &Map<String, Value>,
    settings: &DisplaySettings,
    options: &ReportOptions,
) -> Vec<MetricReport> {
    let span = info_span!(
        "evaluate_report",
        registered = registry.len(),
        fields = payload.len(),
    );
    let _guard = span.enter();

    let reports: Vec<MetricReport> = registry
        .specs()
        .par_iter()
        .filter_map(|spec| {
            let raw = payload.get(&spec.id);
            if raw.is_none() && !options.include_missing {
                return None;
            }
            let value = raw.map(MetricValue::from_json).unwrap_or_default();
            Some(metric_report(spec, value, settings, options.benchmarks.as_ref()))
        })
        .collect();

    debug!(evaluated = reports.len(), "Report evaluated");
    reports
}

/// Evaluate a payload into a [`Report`] with header and summary.
pub fn build_report(
    registry: &MetricRegistry,
    payload: &Map<String, Value>,
    settings: &DisplaySettings,
    options: &ReportOptions,
) -> Report {
    let metrics = evaluate_report(registry, payload, settings, options);
    Report {
        header: ReportHeader::from_payload(payload),
        benchmarks: options.benchmarks.clone(),
        summary: ReportSummary::from_reports(&metrics),
        metrics,
    }
}

/// Evaluate one metric, with its industry benchmark when the context has one.
pub fn metric_report(
    spec: &MetricSpec,
    value: MetricValue,
    settings: &DisplaySettings,
    benchmarks: Option<&BenchmarkContext>,
) -> MetricReport {
    let benchmark = benchmarks
        .filter(|context| benchmark_table().has_metric(context.country, &spec.id))
        .map(|context| {
            benchmark_table()
                .get(context.country, &spec.id, &context.sector)
                .display(spec.kind)
        });

    MetricReport {
        id: spec.id.clone(),
        title: spec.title.clone(),
        kind: spec.kind,
        value,
        display_value: format_display_value(value, spec.kind),
        benchmark,
        gauge: evaluate(value, spec, settings),
    }
}
