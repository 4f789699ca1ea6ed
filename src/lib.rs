// Export modules for library usage
pub mod benchmarks;
pub mod classification;
pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod formatting;
pub mod gauge;
pub mod io;
pub mod metric;
pub mod observability;
pub mod report;

// Re-export commonly used types
pub use crate::metric::{
    format_display_value, truncate_to_precision, DisplayFormat, MetricKind, MetricValue,
    NOT_AVAILABLE,
};

pub use crate::classification::{
    classify, classify_binary, classify_normative, classify_three_zone, BinaryTie, Band,
    Classification, Logic, Zone,
};

pub use crate::gauge::{
    clamp_percent, gauge_positions, label_midpoints, normalize_to_percent, GaugePositions,
    LabelPositions,
};

pub use crate::engine::{
    evaluate, evaluate_gauge, evaluate_metric, BandSegment, GaugeResult, MiddleCaption,
    ThresholdTick,
};

pub use crate::config::{
    builtin_registry, load_config, load_config_from_path, DisplaySettings, GaugeConfig,
    MetricRegistry, MetricSpec, RiskgaugeConfig, Scale, Thresholds,
};

pub use crate::error::{ConfigError, ConfigFormat, ValidationIssue};

pub use crate::benchmarks::{industry_benchmark, Benchmark, Country};

pub use crate::report::{
    build_report, evaluate_report, BenchmarkContext, MetricReport, Report, ReportOptions,
    ReportSummary,
};

pub use crate::io::output::{create_writer, OutputFormat, ReportWriter};
