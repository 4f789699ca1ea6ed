use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::display::DisplaySettings;
use super::gauge::{deserialize_gauge, GaugeConfig};
use super::registry::{MetricRegistry, MetricSpec};
use super::validation::{
    combine_validations, run_validation, validate_display_settings, validate_registry,
};
use crate::error::{ConfigError, ValidationIssue};
use crate::metric::MetricKind;

/// Root configuration structure for riskgauge
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RiskgaugeConfig {
    /// Start from an empty registry instead of the built-in one
    #[serde(default)]
    pub replace_builtin: bool,

    /// Layout settings shared by all gauges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplaySettings>,

    /// Metric entries keyed by id. Entries matching a built-in id replace
    /// its gauge; new ids add a metric.
    #[serde(default)]
    pub metrics: BTreeMap<String, MetricEntry>,
}

/// One `[metrics.<id>]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Required for ids that are not built in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MetricKind>,

    #[serde(deserialize_with = "deserialize_gauge")]
    pub gauge: GaugeConfig,
}

impl From<&MetricSpec> for MetricEntry {
    fn from(spec: &MetricSpec) -> Self {
        Self {
            title: Some(spec.title.clone()),
            kind: Some(spec.kind),
            gauge: spec.gauge.clone(),
        }
    }
}

impl RiskgaugeConfig {
    /// Configuration that spells out the whole built-in registry, used by
    /// `riskgauge init`.
    pub fn template() -> Self {
        Self {
            replace_builtin: false,
            display: Some(DisplaySettings::default()),
            metrics: MetricRegistry::builtin()
                .iter()
                .map(|spec| (spec.id.clone(), MetricEntry::from(spec)))
                .collect(),
        }
    }

    pub fn display_settings(&self) -> DisplaySettings {
        self.display.unwrap_or_default()
    }

    /// Build and validate the effective registry.
    pub fn registry(&self) -> Result<MetricRegistry, ConfigError> {
        let mut registry = if self.replace_builtin {
            MetricRegistry::new()
        } else {
            MetricRegistry::builtin()
        };

        let mut issues = Vec::new();
        for (id, entry) in &self.metrics {
            match merge_entry(registry.get(id), id, entry) {
                Ok(spec) => {
                    if registry.insert(spec).is_some() {
                        log::debug!("Overriding built-in metric {}", id);
                    }
                }
                Err(issue) => issues.push(issue),
            }
        }
        if !issues.is_empty() {
            return Err(ConfigError::Invalid(issues));
        }

        run_validation(combine_validations(vec![
            validate_display_settings(&self.display_settings()),
            validate_registry(&registry),
        ]))?;

        Ok(registry)
    }
}

fn merge_entry(
    existing: Option<&MetricSpec>,
    id: &str,
    entry: &MetricEntry,
) -> Result<MetricSpec, ValidationIssue> {
    let kind = match (entry.kind, existing) {
        (Some(kind), _) => kind,
        (None, Some(spec)) => spec.kind,
        (None, None) => {
            return Err(ValidationIssue::new(
                id,
                "kind",
                "required for metrics that are not built in",
            ))
        }
    };
    let title = entry
        .title
        .clone()
        .or_else(|| existing.map(|spec| spec.title.clone()))
        .unwrap_or_else(|| id.to_string());

    Ok(MetricSpec {
        id: id.to_string(),
        title,
        kind,
        gauge: entry.gauge.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::Logic;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn override_keeps_builtin_title_and_kind() {
        let config: RiskgaugeConfig = toml::from_str(indoc! {r#"
            [metrics.currentRatio.gauge]
            shape = "three_zone"
            scale = [0, 4]
            thresholds = [1.2, 2.5]
            logic = "higher_is_better"
        "#})
        .unwrap();
        let registry = config.registry().unwrap();
        let spec = registry.get("currentRatio").unwrap();
        assert_eq!(spec.title, "Current Ratio");
        assert_eq!(spec.kind, MetricKind::MultiplierRatio);
        assert_eq!(spec.gauge.threshold_values(), (1.2, 2.5));
        assert_eq!(registry.len(), MetricRegistry::builtin().len());
    }

    #[test]
    fn new_metric_requires_kind() {
        let config: RiskgaugeConfig = toml::from_str(indoc! {r#"
            [metrics.cashRatio.gauge]
            shape = "three_zone"
            scale = [0, 2]
            thresholds = [0.2, 0.5]
            logic = "higher_is_better"
        "#})
        .unwrap();
        let err = config.registry().unwrap_err();
        assert_eq!(err.issues()[0].field, "kind");
    }

    #[test]
    fn replace_builtin_starts_empty() {
        let config: RiskgaugeConfig = toml::from_str(indoc! {r#"
            replace_builtin = true

            [metrics.cashRatio]
            title = "Cash Ratio"
            kind = "multiplier_ratio"

            [metrics.cashRatio.gauge]
            shape = "three_zone"
            scale = [0, 2]
            thresholds = [0.2, 0.5]
            logic = "higher_is_better"
        "#})
        .unwrap();
        let registry = config.registry().unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("cashRatio").unwrap().gauge.logic(), Logic::HigherIsBetter);
    }

    #[test]
    fn invalid_display_and_gauge_are_reported_together() {
        let config: RiskgaugeConfig = toml::from_str(indoc! {r#"
            [display]
            bubble_margin = 70

            [metrics.roa.gauge]
            shape = "three_zone"
            scale = [-0.05, 0.10]
            thresholds = [0.02, 0.5]
            logic = "higher_is_better"
        "#})
        .unwrap();
        let err = config.registry().unwrap_err();
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn template_round_trips_through_toml() {
        let template = RiskgaugeConfig::template();
        let text = toml::to_string_pretty(&template).unwrap();
        let parsed: RiskgaugeConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.metrics, template.metrics);
        assert_eq!(parsed.display_settings(), DisplaySettings::default());
        assert!(parsed.registry().is_ok());
    }
}
