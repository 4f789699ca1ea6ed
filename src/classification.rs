//! Risk zone classification
//!
//! Classification happens in two steps. A value first lands in a positional
//! [`Band`] (left, middle or right segment of the gauge), then the band is
//! read through the metric's [`Logic`] to get its [`Zone`]. Labels are
//! positional, zones carry severity.

use crate::metric::MetricValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the thresholds is favorable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Logic {
    #[serde(alias = "higher", alias = "higher-is-better")]
    HigherIsBetter,
    #[serde(alias = "lower", alias = "lower-is-better")]
    LowerIsBetter,
}

/// Categorical risk bucket of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    Critical,
    Adequate,
    Good,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Zone {
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Critical => "Critical",
            Zone::Adequate => "Adequate",
            Zone::Good => "Good",
            Zone::NotAvailable => crate::metric::NOT_AVAILABLE,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Zone::NotAvailable)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Positional segment of a gauge, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Middle,
    High,
}

/// Side a value equal to a binary cut-off falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryTie {
    /// Equality goes to the left band: the first, "not good" side for
    /// higher-is-better metrics.
    #[default]
    Low,
    /// Equality goes to the right band.
    High,
}

/// Band and zone of a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub zone: Zone,
    pub band: Option<Band>,
}

impl Classification {
    pub fn not_available() -> Self {
        Self {
            zone: Zone::NotAvailable,
            band: None,
        }
    }

    fn from_band(band: Band, logic: Logic) -> Self {
        Self {
            zone: zone_for_band(band, logic),
            band: Some(band),
        }
    }
}

/// Zone of a positional band under `logic`.
pub fn zone_for_band(band: Band, logic: Logic) -> Zone {
    match (band, logic) {
        (Band::Middle, _) => Zone::Adequate,
        (Band::Low, Logic::HigherIsBetter) | (Band::High, Logic::LowerIsBetter) => Zone::Critical,
        (Band::High, Logic::HigherIsBetter) | (Band::Low, Logic::LowerIsBetter) => Zone::Good,
    }
}

/// Threshold pair reordered ascending.
pub fn ordered(t1: f64, t2: f64) -> (f64, f64) {
    (t1.min(t2), t1.max(t2))
}

/// Band of `value` between two thresholds given in any order. Values equal
/// to a threshold belong to the middle band.
pub fn three_zone_band(value: f64, t1: f64, t2: f64) -> Band {
    let (lo, hi) = ordered(t1, t2);
    if value < lo {
        Band::Low
    } else if value > hi {
        Band::High
    } else {
        Band::Middle
    }
}

pub fn binary_band(value: f64, cutoff: f64, tie: BinaryTie) -> Band {
    if value < cutoff {
        Band::Low
    } else if value > cutoff {
        Band::High
    } else {
        match tie {
            BinaryTie::Low => Band::Low,
            BinaryTie::High => Band::High,
        }
    }
}

/// Band of `value` under a fixed reference rule. Meeting the reference
/// exactly always passes: `>=` for higher-is-better, `<=` otherwise.
pub fn normative_band(value: f64, reference: f64, logic: Logic) -> Band {
    match logic {
        Logic::HigherIsBetter if value >= reference => Band::High,
        Logic::HigherIsBetter => Band::Low,
        Logic::LowerIsBetter if value <= reference => Band::Low,
        Logic::LowerIsBetter => Band::High,
    }
}

/// Three-zone classification of `value` against thresholds in any order.
pub fn classify(value: impl Into<MetricValue>, logic: Logic, t1: f64, t2: f64) -> Zone {
    classify_three_zone(value.into(), logic, t1, t2).zone
}

pub fn classify_three_zone(value: MetricValue, logic: Logic, t1: f64, t2: f64) -> Classification {
    match value.get() {
        Some(v) => Classification::from_band(three_zone_band(v, t1, t2), logic),
        None => Classification::not_available(),
    }
}

pub fn classify_binary(
    value: MetricValue,
    logic: Logic,
    cutoff: f64,
    tie: BinaryTie,
) -> Classification {
    match value.get() {
        Some(v) => Classification::from_band(binary_band(v, cutoff, tie), logic),
        None => Classification::not_available(),
    }
}

pub fn classify_normative(value: MetricValue, logic: Logic, reference: f64) -> Classification {
    match value.get() {
        Some(v) => Classification::from_band(normative_band(v, reference, logic), logic),
        None => Classification::not_available(),
    }
}
