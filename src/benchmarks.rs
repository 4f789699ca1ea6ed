//! Industry reference values shown next to key-ratio gauges.
//!
//! The table is embedded at build time and parsed once on first use.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::metric::{format_display_value, MetricKind, NOT_AVAILABLE};

const BENCHMARKS_TOML: &str = include_str!("../data/benchmarks.toml");

/// Country the benchmark table is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    #[serde(alias = "USA")]
    Usa,
    #[serde(alias = "Italy")]
    Italy,
}

impl Country {
    pub const ALL: [Country; 2] = [Country::Usa, Country::Italy];

    pub fn name(&self) -> &'static str {
        match self {
            Country::Usa => "USA",
            Country::Italy => "Italy",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Country {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "usa" | "us" => Ok(Country::Usa),
            "italy" | "it" => Ok(Country::Italy),
            other => Err(format!("unknown country '{other}', expected USA or Italy")),
        }
    }
}

/// Industry reference value for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Benchmark {
    Value(f64),
    NotAvailable,
}

impl Benchmark {
    pub fn value(&self) -> Option<f64> {
        match self {
            Benchmark::Value(v) => Some(*v),
            Benchmark::NotAvailable => None,
        }
    }

    /// Formatted the same way as the metric it accompanies.
    pub fn display(&self, kind: MetricKind) -> String {
        match self {
            Benchmark::Value(v) => format_display_value(*v, kind),
            Benchmark::NotAvailable => NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBenchmark {
    Number(f64),
    Other(serde::de::IgnoredAny),
}

impl From<RawBenchmark> for Benchmark {
    fn from(raw: RawBenchmark) -> Self {
        match raw {
            RawBenchmark::Number(v) if v.is_finite() => Benchmark::Value(v),
            _ => Benchmark::NotAvailable,
        }
    }
}

type SectorTable = BTreeMap<String, RawBenchmark>;
type RawTable = BTreeMap<String, BTreeMap<String, SectorTable>>;

/// Country, metric id and sector to benchmark.
#[derive(Debug, Default)]
pub struct BenchmarkTable {
    entries: BTreeMap<Country, BTreeMap<String, BTreeMap<String, Benchmark>>>,
}

impl BenchmarkTable {
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let raw: RawTable = toml::from_str(contents)?;
        let entries = raw
            .into_iter()
            .filter_map(|(country, metrics)| match country.parse::<Country>() {
                Ok(country) => Some((country, metrics)),
                Err(e) => {
                    log::warn!("Skipping benchmarks: {}", e);
                    None
                }
            })
            .map(|(country, metrics)| {
                let metrics = metrics
                    .into_iter()
                    .map(|(metric, sectors)| {
                        let sectors = sectors
                            .into_iter()
                            .map(|(sector, raw)| (sector, Benchmark::from(raw)))
                            .collect();
                        (metric, sectors)
                    })
                    .collect();
                (country, metrics)
            })
            .collect();
        Ok(Self { entries })
    }

    /// Missing countries, metrics and sectors all give `NotAvailable`.
    pub fn get(&self, country: Country, metric: &str, sector: &str) -> Benchmark {
        self.entries
            .get(&country)
            .and_then(|metrics| metrics.get(metric))
            .and_then(|sectors| sectors.get(sector))
            .copied()
            .unwrap_or(Benchmark::NotAvailable)
    }

    pub fn has_metric(&self, country: Country, metric: &str) -> bool {
        self.entries
            .get(&country)
            .is_some_and(|metrics| metrics.contains_key(metric))
    }

    /// Metric ids with benchmarks for `country`.
    pub fn metrics(&self, country: Country) -> impl Iterator<Item = &str> {
        self.entries
            .get(&country)
            .into_iter()
            .flat_map(|metrics| metrics.keys().map(String::as_str))
    }

    /// Sector keys known for `country`.
    pub fn sectors(&self, country: Country) -> Vec<&str> {
        let mut sectors: Vec<&str> = self
            .entries
            .get(&country)
            .into_iter()
            .flat_map(|metrics| metrics.values())
            .flat_map(|sectors| sectors.keys().map(String::as_str))
            .collect();
        sectors.sort_unstable();
        sectors.dedup();
        sectors
    }
}

static BENCHMARKS: Lazy<BenchmarkTable> = Lazy::new(|| {
    BenchmarkTable::parse(BENCHMARKS_TOML).unwrap_or_else(|e| {
        log::error!("Embedded industry benchmarks failed to parse: {}", e);
        BenchmarkTable::default()
    })
});

pub fn benchmark_table() -> &'static BenchmarkTable {
    &BENCHMARKS
}

/// Industry reference value for a metric in a sector.
pub fn industry_benchmark(country: Country, metric: &str, sector: &str) -> Benchmark {
    benchmark_table().get(country, metric, sector)
}
