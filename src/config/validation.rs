//! Validation with error accumulation for gauge configuration.
//!
//! Uses stillwater's `Validation` so a registry with several broken
//! entries reports all of them in one run instead of stopping at the first.
//!
//! ```rust
//! use riskgauge::config::validation::validate_registry;
//! use riskgauge::config::MetricRegistry;
//!
//! let validation = validate_registry(&MetricRegistry::builtin());
//! assert!(validation.is_success());
//! ```

use stillwater::{NonEmptyVec, Validation};

use super::display::DisplaySettings;
use super::gauge::{GaugeConfig, ProbabilityBand, Scale};
use super::registry::MetricRegistry;
use crate::error::{ConfigError, ValidationIssue};

/// Validation result carrying every issue found.
pub type GaugeValidation<T> = Validation<T, NonEmptyVec<ValidationIssue>>;

fn from_issues(issues: Vec<ValidationIssue>) -> GaugeValidation<()> {
    match NonEmptyVec::from_vec(issues) {
        Some(issues) => Validation::Failure(issues),
        None => Validation::Success(()),
    }
}

/// Combine validations, keeping the issues of every failed one.
pub fn combine_validations(validations: Vec<GaugeValidation<()>>) -> GaugeValidation<()> {
    let mut issues = Vec::new();
    for validation in validations {
        if let Validation::Failure(errors) = validation {
            issues.extend(errors);
        }
    }
    from_issues(issues)
}

/// Convert an accumulated validation into a `Result`.
pub fn run_validation<T>(validation: GaugeValidation<T>) -> Result<T, ConfigError> {
    match validation {
        Validation::Success(value) => Ok(value),
        Validation::Failure(issues) => Err(ConfigError::Invalid(issues.into_vec())),
    }
}

/// Validate every gauge in a registry.
pub fn validate_registry(registry: &MetricRegistry) -> GaugeValidation<()> {
    combine_validations(
        registry
            .iter()
            .map(|spec| validate_gauge_config(&spec.id, &spec.gauge))
            .collect(),
    )
}

/// Validate one gauge configuration.
pub fn validate_gauge_config(metric: &str, gauge: &GaugeConfig) -> GaugeValidation<()> {
    let mut issues = Vec::new();
    let mut issue = |field: &str, message: String| {
        issues.push(ValidationIssue::new(metric, field, message));
    };

    match gauge {
        GaugeConfig::ThreeZone(config) => {
            let scale_ok = check_scale(config.scale, &mut issue);
            check_point("thresholds", config.thresholds.t1, config.scale, scale_ok, &mut issue);
            check_point("thresholds", config.thresholds.t2, config.scale, scale_ok, &mut issue);
            if let Some(labels) = &config.labels {
                check_labels([&labels.low, &labels.middle, &labels.high], &mut issue);
            }
        }
        GaugeConfig::Binary(config) => {
            let scale_ok = check_scale(config.scale, &mut issue);
            check_point("cutoff", config.cutoff, config.scale, scale_ok, &mut issue);
            check_labels([&config.labels.low, &config.labels.high], &mut issue);
        }
        GaugeConfig::Normative(config) => {
            let scale_ok = check_scale(config.scale, &mut issue);
            check_point("reference", config.reference, config.scale, scale_ok, &mut issue);
            check_labels([&config.labels.fail, &config.labels.pass], &mut issue);
        }
        GaugeConfig::Probability(config) => {
            match config.band {
                ProbabilityBand::Explicit(thresholds) => {
                    check_point("band", thresholds.t1, Scale::UNIT, true, &mut issue);
                    check_point("band", thresholds.t2, Scale::UNIT, true, &mut issue);
                }
                ProbabilityBand::Centered { center, width } => {
                    check_point("band.center", center, Scale::UNIT, true, &mut issue);
                    if !width.is_finite() || width < 0.0 {
                        issue("band.width", format!("must be a non-negative number, got {width}"));
                    }
                }
            }
            let labels = &config.labels;
            check_labels([&labels.low, &labels.middle, &labels.high], &mut issue);
        }
    }

    from_issues(issues)
}

fn check_scale(scale: Scale, issue: &mut impl FnMut(&str, String)) -> bool {
    if !scale.min.is_finite() || !scale.max.is_finite() {
        issue("scale", format!("bounds must be finite, got [{}, {}]", scale.min, scale.max));
        return false;
    }
    if scale.is_degenerate() {
        issue("scale", format!("has zero width at {}", scale.min));
        return false;
    }
    if scale.min > scale.max {
        issue("scale", format!("min must be below max, got [{}, {}]", scale.min, scale.max));
        return false;
    }
    true
}

fn check_point(
    field: &str,
    value: f64,
    scale: Scale,
    scale_ok: bool,
    issue: &mut impl FnMut(&str, String),
) {
    if !value.is_finite() {
        issue(field, format!("must be finite, got {value}"));
    } else if scale_ok && !scale.contains(value) {
        issue(
            field,
            format!("{value} lies outside the scale [{}, {}]", scale.min, scale.max),
        );
    }
}

fn check_labels<const N: usize>(labels: [&String; N], issue: &mut impl FnMut(&str, String)) {
    if labels.iter().any(|label| label.trim().is_empty()) {
        issue("labels", "captions must not be empty".to_string());
    }
}

/// Validate display settings.
pub fn validate_display_settings(settings: &DisplaySettings) -> GaugeValidation<()> {
    let mut issues = Vec::new();
    let width = settings.middle_caption_min_width;
    if !width.is_finite() || !(0.0..=100.0).contains(&width) {
        issues.push(ValidationIssue::new(
            "display",
            "middle_caption_min_width",
            format!("must be between 0 and 100, got {width}"),
        ));
    }
    let margin = settings.bubble_margin;
    if !margin.is_finite() || !(0.0..50.0).contains(&margin) {
        issues.push(ValidationIssue::new(
            "display",
            "bubble_margin",
            format!("must be at least 0 and below 50, got {margin}"),
        ));
    }
    from_issues(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::{BinaryTie, Logic};
    use crate::config::gauge::{BinaryConfig, BinaryLabels, ProbabilityConfig};
    use crate::config::registry::MetricSpec;
    use crate::metric::MetricKind;

    fn issues_of(validation: GaugeValidation<()>) -> Vec<ValidationIssue> {
        match validation {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(issues) => issues.into_vec(),
        }
    }

    #[test]
    fn builtin_registry_is_valid() {
        assert!(validate_registry(&MetricRegistry::builtin()).is_success());
    }

    #[test]
    fn threshold_outside_scale_is_rejected() {
        let gauge = GaugeConfig::three_zone((0.0, 3.0), (1.0, 4.0), Logic::HigherIsBetter);
        let issues = issues_of(validate_gauge_config("currentRatio", &gauge));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "thresholds");
        assert!(issues[0].message.contains("outside the scale"));
    }

    #[test]
    fn inverted_scale_skips_range_checks() {
        let gauge = GaugeConfig::three_zone((3.0, 0.0), (1.0, 2.0), Logic::HigherIsBetter);
        let issues = issues_of(validate_gauge_config("m", &gauge));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "scale");
    }

    #[test]
    fn degenerate_scale_is_rejected() {
        let gauge = GaugeConfig::three_zone((1.0, 1.0), (1.0, 1.0), Logic::HigherIsBetter);
        let issues = issues_of(validate_gauge_config("m", &gauge));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "scale");
        assert!(issues[0].message.contains("zero width"));
    }

    #[test]
    fn non_finite_cutoff_and_blank_label_are_both_reported() {
        let gauge = GaugeConfig::Binary(BinaryConfig {
            scale: Scale::new(0.0, 2.0),
            cutoff: f64::NAN,
            logic: Logic::HigherIsBetter,
            labels: BinaryLabels::new("Distress Zone", " "),
            tie: BinaryTie::Low,
        });
        let fields: Vec<_> = issues_of(validate_gauge_config("springateSScore", &gauge))
            .into_iter()
            .map(|issue| issue.field)
            .collect();
        assert_eq!(fields, ["cutoff", "labels"]);
    }

    #[test]
    fn negative_probability_width_is_rejected() {
        let gauge = GaugeConfig::Probability(ProbabilityConfig {
            band: ProbabilityBand::Centered {
                center: 0.5,
                width: -0.1,
            },
            ..ProbabilityConfig::default()
        });
        let issues = issues_of(validate_gauge_config("vecthorIndex", &gauge));
        assert_eq!(issues[0].field, "band.width");
    }

    #[test]
    fn registry_accumulates_issues_across_metrics() {
        let registry: MetricRegistry = vec![
            MetricSpec::new(
                "a",
                "A",
                MetricKind::MultiplierRatio,
                GaugeConfig::three_zone((0.0, 1.0), (2.0, 0.5), Logic::HigherIsBetter),
            ),
            MetricSpec::new(
                "b",
                "B",
                MetricKind::MultiplierRatio,
                GaugeConfig::three_zone((0.0, 1.0), (0.2, -1.0), Logic::HigherIsBetter),
            ),
        ]
        .into_iter()
        .collect();

        let err = run_validation(validate_registry(&registry)).unwrap_err();
        let metrics: Vec<_> = err.issues().iter().map(|i| i.metric.as_str()).collect();
        assert_eq!(metrics, ["a", "b"]);
    }

    #[test]
    fn display_settings_ranges() {
        assert!(validate_display_settings(&DisplaySettings::default()).is_success());
        let bad = DisplaySettings {
            middle_caption_min_width: 150.0,
            bubble_margin: -1.0,
        };
        assert_eq!(issues_of(validate_display_settings(&bad)).len(), 2);
    }
}
