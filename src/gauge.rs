//! Gauge geometry: mapping values and thresholds onto a 0-100% bar.

use serde::Serialize;

/// Percent returned for a degenerate scale where `min == max`.
pub const DEGENERATE_SCALE_PCT: f64 = 50.0;

/// Linear map of `value` from `[min, max]` to `[0, 100]`.
///
/// The result is not clamped, values outside the scale map outside the
/// percent range. A degenerate scale (`min == max`) maps everything to 50.
pub fn normalize_to_percent(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return DEGENERATE_SCALE_PCT;
    }
    (value - min) / (max - min) * 100.0
}

pub fn clamp_percent(pct: f64) -> f64 {
    pct.clamp(0.0, 100.0)
}

/// Marker and threshold stops of a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugePositions {
    /// Always within `[0, 100]`; out-of-scale values pin to the nearest edge.
    pub marker_pct: f64,
    pub low_stop_pct: f64,
    pub high_stop_pct: f64,
}

/// Marker position clamped to the bar, stops reordered ascending and left
/// unclamped.
pub fn gauge_positions(value: f64, min: f64, max: f64, t1: f64, t2: f64) -> GaugePositions {
    let (low_stop_pct, high_stop_pct) = stop_positions(min, max, t1, t2);
    GaugePositions {
        marker_pct: clamp_percent(normalize_to_percent(value, min, max)),
        low_stop_pct,
        high_stop_pct,
    }
}

/// Threshold stops ascending, whatever order `t1` and `t2` come in.
pub fn stop_positions(min: f64, max: f64, t1: f64, t2: f64) -> (f64, f64) {
    let s1 = normalize_to_percent(t1, min, max);
    let s2 = normalize_to_percent(t2, min, max);
    (s1.min(s2), s1.max(s2))
}

/// Caption positions, one per band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelPositions {
    pub low: f64,
    pub middle: f64,
    pub high: f64,
}

impl LabelPositions {
    pub fn as_array(&self) -> [f64; 3] {
        [self.low, self.middle, self.high]
    }
}

/// Midpoints of `[0, low]`, `[low, high]` and `[high, 100]`.
pub fn label_midpoints(low_stop_pct: f64, high_stop_pct: f64) -> LabelPositions {
    LabelPositions {
        low: low_stop_pct / 2.0,
        middle: low_stop_pct + (high_stop_pct - low_stop_pct) / 2.0,
        high: high_stop_pct + (100.0 - high_stop_pct) / 2.0,
    }
}
