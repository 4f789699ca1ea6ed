//! Gauge evaluation.
//!
//! Composes quantization, positioning and classification into a single
//! [`GaugeResult`] that a renderer can draw without knowing anything about
//! logic or shapes: stops and bands come pre-ordered, each band carries its
//! zone and caption, and the value caption is already kept off the edges.

use serde::Serialize;

use crate::classification::{zone_for_band, Band, Zone};
use crate::config::{DisplaySettings, GaugeConfig, MetricRegistry, MetricSpec};
use crate::gauge::{
    clamp_percent, label_midpoints, normalize_to_percent, stop_positions, LabelPositions,
};
use crate::metric::{MetricValue, NOT_AVAILABLE};

/// Caption drawn inside the middle band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiddleCaption {
    pub text: String,
    /// `text` holds initials because the band is too narrow for the full label
    pub abbreviated: bool,
}

/// One colored segment of the bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandSegment {
    pub start_pct: f64,
    pub end_pct: f64,
    pub band: Band,
    pub zone: Zone,
    pub label: String,
}

/// Threshold tick under the bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdTick {
    pub position_pct: f64,
    pub value: f64,
}

/// Everything needed to draw one gauge. Percentages are within `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeResult {
    /// `None` when the value is not available
    pub marker_pct: Option<f64>,
    /// Marker kept `bubble_margin` away from both ends
    pub bubble_pct: Option<f64>,
    pub low_stop_pct: f64,
    pub high_stop_pct: f64,
    pub label_positions: LabelPositions,
    pub zone: Zone,
    pub band: Option<Band>,
    pub zone_label: String,
    pub middle_caption: Option<MiddleCaption>,
    pub bands: Vec<BandSegment>,
    pub threshold_ticks: Vec<ThresholdTick>,
    /// `false` for metrics missing from the registry
    pub configured: bool,
}

impl GaugeResult {
    /// Result for a metric with no gauge configuration.
    pub fn unconfigured() -> Self {
        Self {
            marker_pct: None,
            bubble_pct: None,
            low_stop_pct: 0.0,
            high_stop_pct: 100.0,
            label_positions: label_midpoints(0.0, 100.0),
            zone: Zone::NotAvailable,
            band: None,
            zone_label: NOT_AVAILABLE.to_string(),
            middle_caption: None,
            bands: Vec::new(),
            threshold_ticks: Vec::new(),
            configured: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.zone.is_available()
    }
}

/// Evaluate a value against a gauge configuration as given, without
/// quantizing it first.
pub fn evaluate_gauge(
    value: MetricValue,
    gauge: &GaugeConfig,
    settings: &DisplaySettings,
) -> GaugeResult {
    let scale = gauge.scale();
    let (t1, t2) = gauge.threshold_values();
    let (low_stop, high_stop) = stop_positions(scale.min, scale.max, t1, t2);
    let low_stop_pct = clamp_percent(low_stop);
    let high_stop_pct = clamp_percent(high_stop);

    let marker_pct = value
        .get()
        .map(|v| clamp_percent(normalize_to_percent(v, scale.min, scale.max)));
    let margin = bubble_margin(settings);
    let bubble_pct = marker_pct.map(|pct| pct.clamp(margin, 100.0 - margin));

    let classification = gauge.classify(value);

    GaugeResult {
        marker_pct,
        bubble_pct,
        low_stop_pct,
        high_stop_pct,
        label_positions: label_midpoints(low_stop_pct, high_stop_pct),
        zone: classification.zone,
        band: classification.band,
        zone_label: gauge.zone_label(classification).to_string(),
        middle_caption: middle_caption(gauge, high_stop_pct - low_stop_pct, settings),
        bands: band_segments(gauge, low_stop_pct, high_stop_pct),
        threshold_ticks: threshold_ticks(gauge, low_stop_pct, high_stop_pct),
        configured: true,
    }
}

/// Evaluate a registered metric. The value is truncated to the precision
/// it is displayed with, so the zone always agrees with the shown number.
pub fn evaluate(value: MetricValue, spec: &MetricSpec, settings: &DisplaySettings) -> GaugeResult {
    evaluate_gauge(value.quantize(spec.kind.precision()), &spec.gauge, settings)
}

/// Evaluate by metric id; unknown ids give [`GaugeResult::unconfigured`].
pub fn evaluate_metric(
    registry: &MetricRegistry,
    id: &str,
    value: impl Into<MetricValue>,
    settings: &DisplaySettings,
) -> GaugeResult {
    match registry.get(id) {
        Some(spec) => evaluate(value.into(), spec, settings),
        None => {
            log::debug!("No gauge configured for metric {}", id);
            GaugeResult::unconfigured()
        }
    }
}

fn bubble_margin(settings: &DisplaySettings) -> f64 {
    if settings.bubble_margin.is_finite() {
        settings.bubble_margin.clamp(0.0, 50.0)
    } else {
        0.0
    }
}

fn middle_caption(
    gauge: &GaugeConfig,
    width: f64,
    settings: &DisplaySettings,
) -> Option<MiddleCaption> {
    let label = gauge.middle_label().filter(|label| !label.trim().is_empty())?;
    if width > settings.middle_caption_min_width {
        Some(MiddleCaption {
            text: label.to_string(),
            abbreviated: false,
        })
    } else {
        Some(MiddleCaption {
            text: initials(label),
            abbreviated: true,
        })
    }
}

/// "Grey Zone" -> "GZ"
pub fn initials(label: &str) -> String {
    label
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

fn band_segments(gauge: &GaugeConfig, low_stop: f64, high_stop: f64) -> Vec<BandSegment> {
    let logic = gauge.logic();
    let segment = |start_pct: f64, end_pct: f64, band: Band| {
        let zone = zone_for_band(band, logic);
        BandSegment {
            start_pct,
            end_pct,
            band,
            zone,
            label: gauge
                .band_label(band)
                .unwrap_or_else(|| zone.label())
                .to_string(),
        }
    };

    if gauge.is_two_band() {
        vec![segment(0.0, low_stop, Band::Low), segment(low_stop, 100.0, Band::High)]
    } else {
        vec![
            segment(0.0, low_stop, Band::Low),
            segment(low_stop, high_stop, Band::Middle),
            segment(high_stop, 100.0, Band::High),
        ]
    }
}

fn threshold_ticks(gauge: &GaugeConfig, low_stop: f64, high_stop: f64) -> Vec<ThresholdTick> {
    let (t1, t2) = gauge.threshold_values();
    let (lo, hi) = crate::classification::ordered(t1, t2);
    let low = ThresholdTick {
        position_pct: low_stop,
        value: lo,
    };
    if gauge.is_two_band() {
        vec![low]
    } else {
        vec![
            low,
            ThresholdTick {
                position_pct: high_stop,
                value: hi,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::Logic;
    use pretty_assertions::assert_eq;

    fn settings() -> DisplaySettings {
        DisplaySettings::default()
    }

    fn builtin(id: &str) -> MetricSpec {
        MetricRegistry::builtin().get(id).cloned().unwrap()
    }

    #[test]
    fn altman_grey_zone_is_spelled_out_when_wide() {
        let result = evaluate(2.5.into(), &builtin("altmanZScore"), &settings());
        assert_eq!(result.zone, Zone::Adequate);
        assert_eq!(result.zone_label, "Grey Zone");
        assert_eq!(result.marker_pct, Some(50.0));
        let caption = result.middle_caption.unwrap();
        assert_eq!(caption.text, "Grey Zone");
        assert!(!caption.abbreviated);
    }

    #[test]
    fn narrow_middle_band_is_abbreviated() {
        // Taffler: stops at 46.67% and 53.33%
        let result = evaluate(0.25.into(), &builtin("tafflerTScore"), &settings());
        let caption = result.middle_caption.unwrap();
        assert_eq!(caption.text, "GZ");
        assert!(caption.abbreviated);
    }

    #[test]
    fn binary_gauge_has_two_bands_and_no_middle_caption() {
        let spec = builtin("springateSScore");
        let result = evaluate(0.9.into(), &spec, &settings());
        assert_eq!(result.zone, Zone::Good);
        assert_eq!(result.zone_label, "Safe Zone");
        assert!(result.middle_caption.is_none());
        assert_eq!(result.bands.len(), 2);
        assert_eq!(result.threshold_ticks.len(), 1);

        let low = evaluate(0.5.into(), &spec, &settings());
        assert_eq!(low.zone_label, "Distress Zone");
        assert_eq!(low.zone, Zone::Critical);
    }

    #[test]
    fn bands_follow_logic_for_lower_is_better() {
        let result = evaluate(0.5.into(), &builtin("debtToEquityRatio"), &settings());
        let zones: Vec<_> = result.bands.iter().map(|b| b.zone).collect();
        assert_eq!(zones, [Zone::Good, Zone::Adequate, Zone::Critical]);
        assert_eq!(result.zone, Zone::Good);
        let ticks: Vec<_> = result.threshold_ticks.iter().map(|t| t.value).collect();
        assert_eq!(ticks, [1.0, 2.0]);
    }

    #[test]
    fn missing_value_still_draws_the_gauge() {
        let result = evaluate(MetricValue::missing(), &builtin("currentRatio"), &settings());
        assert_eq!(result.marker_pct, None);
        assert_eq!(result.bubble_pct, None);
        assert_eq!(result.zone, Zone::NotAvailable);
        assert_eq!(result.zone_label, "N/A");
        assert_eq!(result.bands.len(), 3);
        assert!(result.configured);
    }

    #[test]
    fn bubble_keeps_off_the_edges() {
        let result = evaluate(100.0.into(), &builtin("currentRatio"), &settings());
        assert_eq!(result.marker_pct, Some(100.0));
        assert_eq!(result.bubble_pct, Some(98.0));

        let result = evaluate((-1.0).into(), &builtin("currentRatio"), &settings());
        assert_eq!(result.bubble_pct, Some(2.0));
    }

    #[test]
    fn value_is_truncated_before_classification() {
        // 0.0199 shows as "0.01 (1%)", below the 0.02 threshold either way,
        // but 0.04999 shows as 0.04 and must not read as Good at 0.05.
        let result = evaluate(0.04999.into(), &builtin("roa"), &settings());
        assert_eq!(result.zone, Zone::Adequate);

        // DSCR 0.999 displays as 0.99x and fails the reference.
        let dscr = evaluate(0.999.into(), &builtin("dscr"), &settings());
        assert_eq!(dscr.zone_label, "Crisis");
    }

    #[test]
    fn out_of_scale_thresholds_clamp_stops() {
        let gauge = GaugeConfig::three_zone((0.0, 1.0), (-0.5, 2.0), Logic::HigherIsBetter);
        let result = evaluate_gauge(0.5.into(), &gauge, &settings());
        assert_eq!(result.low_stop_pct, 0.0);
        assert_eq!(result.high_stop_pct, 100.0);
    }

    #[test]
    fn degenerate_scale_centers_everything() {
        let gauge = GaugeConfig::three_zone((5.0, 5.0), (5.0, 5.0), Logic::HigherIsBetter);
        let result = evaluate_gauge(7.0.into(), &gauge, &settings());
        assert_eq!(result.marker_pct, Some(50.0));
        assert_eq!(result.low_stop_pct, 50.0);
    }

    #[test]
    fn unknown_metric_is_unconfigured() {
        let result = evaluate_metric(&MetricRegistry::builtin(), "ebitdaMargin", 0.3, &settings());
        assert_eq!(result, GaugeResult::unconfigured());
        assert!(!result.is_available());
    }

    #[test]
    fn initials_of_multi_word_labels() {
        assert_eq!(initials("Grey Zone"), "GZ");
        assert_eq!(initials("normal risk"), "NR");
        assert_eq!(initials("Adequate"), "A");
    }

    #[test]
    fn serializes_camel_case() {
        let result = evaluate(1.5.into(), &builtin("currentRatio"), &settings());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["markerPct"], 50.0);
        assert_eq!(json["zoneLabel"], "Adequate");
        assert!(json["thresholdTicks"].is_array());
    }
}
