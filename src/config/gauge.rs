//! Gauge configuration shapes.
//!
//! Each metric is interpreted through exactly one [`GaugeConfig`] variant.
//! The serialized form is internally tagged by `shape`:
//!
//! ```toml
//! shape = "three_zone"
//! scale = [0.0, 5.0]
//! thresholds = [1.81, 2.99]
//! logic = "higher_is_better"
//! labels = ["Distress Zone", "Grey Zone", "Safe Zone"]
//! ```
//!
//! Older registries without a `shape` key are still accepted through
//! [`deserialize_gauge`]: an empty middle label marks a binary gauge and
//! `is_normative` marks a fixed reference rule.

use serde::{Deserialize, Deserializer, Serialize};

use crate::classification::{
    classify_binary, classify_normative, classify_three_zone, zone_for_band, Band, BinaryTie,
    Classification, Logic, Zone,
};
use crate::metric::MetricValue;

/// Value domain mapped onto 0-100% of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Scale {
    pub min: f64,
    pub max: f64,
}

impl Scale {
    pub const UNIT: Scale = Scale { min: 0.0, max: 1.0 };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl From<(f64, f64)> for Scale {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<Scale> for (f64, f64) {
    fn from(scale: Scale) -> Self {
        (scale.min, scale.max)
    }
}

/// Threshold pair in scale units, in either order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Thresholds {
    pub t1: f64,
    pub t2: f64,
}

impl Thresholds {
    pub fn new(t1: f64, t2: f64) -> Self {
        Self { t1, t2 }
    }

    pub fn ordered(&self) -> (f64, f64) {
        crate::classification::ordered(self.t1, self.t2)
    }
}

impl From<(f64, f64)> for Thresholds {
    fn from((t1, t2): (f64, f64)) -> Self {
        Self { t1, t2 }
    }
}

impl From<Thresholds> for (f64, f64) {
    fn from(thresholds: Thresholds) -> Self {
        (thresholds.t1, thresholds.t2)
    }
}

/// Captions of the three bands, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[String; 3]", into = "[String; 3]")]
pub struct ThreeZoneLabels {
    pub low: String,
    pub middle: String,
    pub high: String,
}

impl ThreeZoneLabels {
    pub fn new(low: &str, middle: &str, high: &str) -> Self {
        Self {
            low: low.to_string(),
            middle: middle.to_string(),
            high: high.to_string(),
        }
    }
}

impl From<[String; 3]> for ThreeZoneLabels {
    fn from([low, middle, high]: [String; 3]) -> Self {
        Self { low, middle, high }
    }
}

impl From<ThreeZoneLabels> for [String; 3] {
    fn from(labels: ThreeZoneLabels) -> Self {
        [labels.low, labels.middle, labels.high]
    }
}

/// Captions of the two bands of a binary gauge, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[String; 2]", into = "[String; 2]")]
pub struct BinaryLabels {
    pub low: String,
    pub high: String,
}

impl BinaryLabels {
    pub fn new(low: &str, high: &str) -> Self {
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }
}

impl From<[String; 2]> for BinaryLabels {
    fn from([low, high]: [String; 2]) -> Self {
        Self { low, high }
    }
}

impl From<BinaryLabels> for [String; 2] {
    fn from(labels: BinaryLabels) -> Self {
        [labels.low, labels.high]
    }
}

/// Captions of a normative rule, by outcome rather than position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormativeLabels {
    pub fail: String,
    pub pass: String,
}

impl Default for NormativeLabels {
    fn default() -> Self {
        Self {
            fail: Zone::Critical.label().to_string(),
            pass: Zone::Good.label().to_string(),
        }
    }
}

/// Critical / adequate / good gauge with two thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeZoneConfig {
    pub scale: Scale,
    pub thresholds: Thresholds,
    pub logic: Logic,
    /// Positional captions. When absent the zone names are used, ordered by
    /// `logic`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<ThreeZoneLabels>,
}

/// Pass / fail gauge with a single cut-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryConfig {
    pub scale: Scale,
    pub cutoff: f64,
    pub logic: Logic,
    pub labels: BinaryLabels,
    /// Band a value equal to the cut-off belongs to.
    #[serde(default)]
    pub tie: BinaryTie,
}

/// Fixed reference rule that ignores dataset-driven thresholds, e.g. a
/// coverage ratio that must reach 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormativeConfig {
    pub scale: Scale,
    pub reference: f64,
    pub logic: Logic,
    #[serde(default)]
    pub labels: NormativeLabels,
}

/// Band of a probability gauge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbabilityBand {
    Explicit(Thresholds),
    Centered {
        #[serde(default = "default_center")]
        center: f64,
        #[serde(default = "default_width")]
        width: f64,
    },
}

fn default_center() -> f64 {
    0.5
}

fn default_width() -> f64 {
    0.20
}

impl Default for ProbabilityBand {
    fn default() -> Self {
        ProbabilityBand::Centered {
            center: default_center(),
            width: default_width(),
        }
    }
}

impl ProbabilityBand {
    /// Lower and upper band edges. A centered band is clipped to `[0, 1]`.
    pub fn resolve(&self) -> (f64, f64) {
        match self {
            ProbabilityBand::Explicit(thresholds) => thresholds.ordered(),
            ProbabilityBand::Centered { center, width } => {
                let clamp01 = |x: f64| x.clamp(0.0, 1.0);
                (
                    clamp01(center - width / 2.0),
                    clamp01(center + width / 2.0),
                )
            }
        }
    }
}

fn default_probability_labels() -> ThreeZoneLabels {
    ThreeZoneLabels::new("Minor Risk", "Normal Risk", "Major Risk")
}

/// Probability of distress on `[0, 1]`; lower is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityConfig {
    #[serde(default = "default_probability_labels")]
    pub labels: ThreeZoneLabels,
    #[serde(default)]
    pub band: ProbabilityBand,
}

impl Default for ProbabilityConfig {
    fn default() -> Self {
        Self {
            labels: default_probability_labels(),
            band: ProbabilityBand::default(),
        }
    }
}

/// How a metric value is placed on a gauge and classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum GaugeConfig {
    ThreeZone(ThreeZoneConfig),
    Binary(BinaryConfig),
    Normative(NormativeConfig),
    Probability(ProbabilityConfig),
}

impl GaugeConfig {
    pub fn three_zone(scale: (f64, f64), thresholds: (f64, f64), logic: Logic) -> Self {
        GaugeConfig::ThreeZone(ThreeZoneConfig {
            scale: scale.into(),
            thresholds: thresholds.into(),
            logic,
            labels: None,
        })
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            GaugeConfig::ThreeZone(_) => "three_zone",
            GaugeConfig::Binary(_) => "binary",
            GaugeConfig::Normative(_) => "normative",
            GaugeConfig::Probability(_) => "probability",
        }
    }

    pub fn scale(&self) -> Scale {
        match self {
            GaugeConfig::ThreeZone(c) => c.scale,
            GaugeConfig::Binary(c) => c.scale,
            GaugeConfig::Normative(c) => c.scale,
            GaugeConfig::Probability(_) => Scale::UNIT,
        }
    }

    pub fn logic(&self) -> Logic {
        match self {
            GaugeConfig::ThreeZone(c) => c.logic,
            GaugeConfig::Binary(c) => c.logic,
            GaugeConfig::Normative(c) => c.logic,
            GaugeConfig::Probability(_) => Logic::LowerIsBetter,
        }
    }

    /// Threshold values as configured. Single cut-off shapes repeat it.
    pub fn threshold_values(&self) -> (f64, f64) {
        match self {
            GaugeConfig::ThreeZone(c) => (c.thresholds.t1, c.thresholds.t2),
            GaugeConfig::Binary(c) => (c.cutoff, c.cutoff),
            GaugeConfig::Normative(c) => (c.reference, c.reference),
            GaugeConfig::Probability(c) => c.band.resolve(),
        }
    }

    /// Binary and normative gauges have no middle band.
    pub fn is_two_band(&self) -> bool {
        matches!(self, GaugeConfig::Binary(_) | GaugeConfig::Normative(_))
    }

    pub fn classify(&self, value: MetricValue) -> Classification {
        match self {
            GaugeConfig::ThreeZone(c) => {
                classify_three_zone(value, c.logic, c.thresholds.t1, c.thresholds.t2)
            }
            GaugeConfig::Binary(c) => classify_binary(value, c.logic, c.cutoff, c.tie),
            GaugeConfig::Normative(c) => classify_normative(value, c.logic, c.reference),
            GaugeConfig::Probability(c) => {
                let (lo, hi) = c.band.resolve();
                classify_three_zone(value, Logic::LowerIsBetter, lo, hi)
            }
        }
    }

    /// Caption of a band, `None` for the middle band of two-band gauges.
    pub fn band_label(&self, band: Band) -> Option<&str> {
        match self {
            GaugeConfig::ThreeZone(c) => Some(match &c.labels {
                Some(labels) => pick_three(labels, band),
                None => zone_for_band(band, c.logic).label(),
            }),
            GaugeConfig::Probability(c) => Some(pick_three(&c.labels, band)),
            GaugeConfig::Binary(c) => match band {
                Band::Low => Some(c.labels.low.as_str()),
                Band::High => Some(c.labels.high.as_str()),
                Band::Middle => None,
            },
            GaugeConfig::Normative(c) => match (band, zone_for_band(band, c.logic)) {
                (Band::Middle, _) => None,
                (_, Zone::Good) => Some(c.labels.pass.as_str()),
                _ => Some(c.labels.fail.as_str()),
            },
        }
    }

    pub fn middle_label(&self) -> Option<&str> {
        self.band_label(Band::Middle)
    }

    /// Caption for a classification result, `"N/A"` when unavailable.
    pub fn zone_label(&self, classification: Classification) -> &str {
        classification
            .band
            .and_then(|band| self.band_label(band))
            .unwrap_or_else(|| classification.zone.label())
    }
}

fn pick_three(labels: &ThreeZoneLabels, band: Band) -> &str {
    match band {
        Band::Low => &labels.low,
        Band::Middle => &labels.middle,
        Band::High => &labels.high,
    }
}

/// Entry shape used by registries written before `shape` existed.
#[derive(Debug, Deserialize)]
struct LegacyGaugeConfig {
    thresholds: Thresholds,
    scale: Scale,
    logic: Logic,
    #[serde(default)]
    labels: Option<Vec<String>>,
    #[serde(default, alias = "isNormative")]
    is_normative: bool,
}

impl TryFrom<LegacyGaugeConfig> for GaugeConfig {
    type Error = String;

    fn try_from(legacy: LegacyGaugeConfig) -> Result<Self, Self::Error> {
        let labels = match legacy.labels {
            None => None,
            Some(labels) => match <[String; 3]>::try_from(labels) {
                Ok(labels) => Some(labels),
                Err(labels) => {
                    return Err(format!("expected 3 labels, found {}", labels.len()));
                }
            },
        };

        if legacy.is_normative {
            // positional captions: the passing side depends on logic
            let labels = labels
                .map(|[low, _, high]| match legacy.logic {
                    Logic::HigherIsBetter => NormativeLabels { fail: low, pass: high },
                    Logic::LowerIsBetter => NormativeLabels { fail: high, pass: low },
                })
                .unwrap_or_default();
            return Ok(GaugeConfig::Normative(NormativeConfig {
                scale: legacy.scale,
                reference: legacy.thresholds.t1,
                logic: legacy.logic,
                labels,
            }));
        }

        match labels {
            Some([low, middle, high]) if middle.is_empty() => Ok(GaugeConfig::Binary(BinaryConfig {
                scale: legacy.scale,
                cutoff: legacy.thresholds.t1,
                logic: legacy.logic,
                labels: BinaryLabels { low, high },
                tie: BinaryTie::default(),
            })),
            labels => Ok(GaugeConfig::ThreeZone(ThreeZoneConfig {
                scale: legacy.scale,
                thresholds: legacy.thresholds,
                logic: legacy.logic,
                labels: labels.map(ThreeZoneLabels::from),
            })),
        }
    }
}

/// Deserialize either the tagged or the legacy gauge schema. Entries with a
/// `shape` key are always read as tagged, so a broken tagged entry is an
/// error instead of a legacy gauge.
pub fn deserialize_gauge<'de, D>(deserializer: D) -> Result<GaugeConfig, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = serde_json::Value::deserialize(deserializer)?;
    let tagged = value
        .as_object()
        .is_some_and(|entry| entry.contains_key("shape"));
    if tagged {
        serde_json::from_value(value).map_err(D::Error::custom)
    } else {
        let legacy: LegacyGaugeConfig = serde_json::from_value(value)
            .map_err(|e| D::Error::custom(format!("gauge without `shape`: {e}")))?;
        GaugeConfig::try_from(legacy).map_err(D::Error::custom)
    }
}
