//! Metric values and their presentation.
//!
//! A [`MetricValue`] is an optional measurement: anything that is not a
//! finite number collapses to "not available". [`MetricKind`] maps each kind
//! of metric to a [`DisplayFormat`], which fixes both the rendered string and
//! the truncation precision used before classification. Classifying the
//! truncated value keeps the shown number and the shown zone in agreement.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text shown for a missing value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Scale applied before truncation to absorb binary floating-point noise
/// (`0.29 * 100.0 == 28.999999999999996`).
const NOISE_SCALE: f64 = 1e6;

const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0;

/// An optional, always-finite measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricValue(Option<f64>);

impl MetricValue {
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(Some(value))
        } else {
            Self(None)
        }
    }

    pub fn missing() -> Self {
        Self(None)
    }

    pub fn get(&self) -> Option<f64> {
        self.0
    }

    pub fn is_available(&self) -> bool {
        self.0.is_some()
    }

    /// Read a value from a scoring-service payload. Strings such as `"N/A"`,
    /// nulls and non-numeric JSON are all treated as missing.
    pub fn from_json(value: &serde_json::Value) -> Self {
        value.as_f64().map(Self::new).unwrap_or_default()
    }

    /// Parse a user-supplied string; unparseable input is missing.
    pub fn parse(input: &str) -> Self {
        input
            .trim()
            .parse::<f64>()
            .map(Self::new)
            .unwrap_or_default()
    }

    /// Truncate to `decimals` places, see [`truncate_to_precision`].
    pub fn quantize(self, decimals: u32) -> Self {
        self.0
            .map(|v| Self::new(truncate_to_precision(v, decimals)))
            .unwrap_or_default()
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Option<f64>> for MetricValue {
    fn from(value: Option<f64>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// Truncate toward zero to `decimals` places.
///
/// Idempotent: a value that is already truncated maps to itself, which is
/// what lets the engine classify the displayed number instead of the raw one.
pub fn truncate_to_precision(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    // past 2^52 every f64 is an integer, nothing left to truncate
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    let denoised = (scaled * NOISE_SCALE).round() / NOISE_SCALE;
    let truncated = denoised.trunc() / factor;
    // avoid rendering "-0.00"
    if truncated == 0.0 {
        0.0
    } else {
        truncated
    }
}

/// Category of metric, which decides how its value is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Return and leverage ratios shown as a decimal with a percent hint.
    PercentageRatio,
    /// Liquidity and turnover ratios shown as a multiplier.
    MultiplierRatio,
    /// Bankruptcy prediction scores (Altman, Springate, ...).
    DistressModel,
    /// Probability of distress in `[0, 1]`, shown as a percentage.
    ProbabilityIndex,
    /// ESG overall score on a 0-100 scale.
    EsgOverall,
    /// Individual E, S or G pillar score on a 1-5 scale.
    EsgPillar,
    /// Debt-service coverage style ratios.
    CoverageRatio,
}

impl MetricKind {
    pub fn display_format(&self) -> DisplayFormat {
        match self {
            MetricKind::PercentageRatio => DisplayFormat::PercentAnnotated,
            MetricKind::MultiplierRatio | MetricKind::CoverageRatio => DisplayFormat::Multiplier,
            MetricKind::DistressModel => DisplayFormat::Decimal { decimals: 4 },
            MetricKind::ProbabilityIndex => DisplayFormat::Percentage,
            MetricKind::EsgOverall => DisplayFormat::Decimal { decimals: 0 },
            MetricKind::EsgPillar => DisplayFormat::Decimal { decimals: 2 },
        }
    }

    /// Decimal places the value is truncated to before display and
    /// classification.
    pub fn precision(&self) -> u32 {
        self.display_format().precision()
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::PercentageRatio => "percentage ratio",
            MetricKind::MultiplierRatio => "multiplier ratio",
            MetricKind::DistressModel => "distress model",
            MetricKind::ProbabilityIndex => "probability index",
            MetricKind::EsgOverall => "ESG overall",
            MetricKind::EsgPillar => "ESG pillar",
            MetricKind::CoverageRatio => "coverage ratio",
        }
    }
}

/// Presentation of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    /// `"0.05 (5%)"`
    PercentAnnotated,
    /// `"1.80x"`
    Multiplier,
    /// `"42.50%"`, value is a proportion
    Percentage,
    /// Plain decimal with a fixed number of places
    Decimal { decimals: u32 },
}

impl DisplayFormat {
    pub fn precision(&self) -> u32 {
        match self {
            DisplayFormat::PercentAnnotated | DisplayFormat::Multiplier => 2,
            DisplayFormat::Percentage => 4,
            DisplayFormat::Decimal { decimals } => *decimals,
        }
    }

    pub fn render(&self, value: MetricValue) -> String {
        let Some(v) = value.quantize(self.precision()).get() else {
            return NOT_AVAILABLE.to_string();
        };
        match self {
            DisplayFormat::PercentAnnotated => format!("{:.2} ({:.0}%)", v, v * 100.0),
            DisplayFormat::Multiplier => format!("{v:.2}x"),
            DisplayFormat::Percentage => format!("{:.2}%", v * 100.0),
            DisplayFormat::Decimal { decimals } => format!("{:.*}", *decimals as usize, v),
        }
    }
}

/// Render `value` the way gauges of `kind` show it.
pub fn format_display_value(value: impl Into<MetricValue>, kind: MetricKind) -> String {
    kind.display_format().render(value.into())
}
