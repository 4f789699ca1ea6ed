//! Loading registry files: overlays, discovery and accumulated validation.

use indoc::indoc;
use pretty_assertions::assert_eq;
use riskgauge::config::{discover_config, load_config_from_path, parse_config, CONFIG_FILE_NAME};
use riskgauge::{
    evaluate_metric, ConfigError, ConfigFormat, GaugeConfig, Logic, MetricKind, MetricRegistry,
    RiskgaugeConfig, Zone,
};
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn builtin_registry_validates_clean() {
    let registry = RiskgaugeConfig::default().registry().unwrap();
    assert_eq!(registry.len(), MetricRegistry::builtin().len());
    assert_eq!(registry.len(), 21);
}

#[test]
fn file_entries_override_and_extend_the_builtin_registry() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        CONFIG_FILE_NAME,
        indoc! {r#"
            [display]
            middle_caption_min_width = 10.0

            [metrics.currentRatio.gauge]
            shape = "three_zone"
            scale = [0.0, 4.0]
            thresholds = [1.2, 2.5]
            logic = "higher_is_better"

            [metrics.ebitdaMargin]
            title = "EBITDA Margin"
            kind = "percentage_ratio"

            [metrics.ebitdaMargin.gauge]
            shape = "three_zone"
            scale = [0.0, 0.5]
            thresholds = [0.1, 0.2]
            logic = "higher_is_better"
            labels = ["Thin", "Fair", "Strong"]
        "#},
    );

    let config = load_config_from_path(&path).unwrap();
    let registry = config.registry().unwrap();
    let settings = config.display_settings();

    let current = registry.get("currentRatio").unwrap();
    assert_eq!(current.title, "Current Ratio");
    assert_eq!(current.kind, MetricKind::MultiplierRatio);
    assert_eq!(current.gauge.threshold_values(), (1.2, 2.5));

    let margin = evaluate_metric(&registry, "ebitdaMargin", 0.25, &settings);
    assert_eq!(margin.zone, Zone::Good);
    assert_eq!(margin.zone_label, "Strong");
    assert_eq!(registry.len(), 22);
    assert_eq!(settings.middle_caption_min_width, 10.0);
}

#[test]
fn replace_builtin_starts_from_empty() {
    let config = parse_config(
        indoc! {r#"
            replace_builtin = true

            [metrics.dscr]
            kind = "coverage_ratio"

            [metrics.dscr.gauge]
            shape = "normative"
            scale = [0.0, 2.0]
            reference = 1.25
            logic = "higher_is_better"
            labels = { fail = "Breach", pass = "Covenant met" }
        "#},
        ConfigFormat::Toml,
    )
    .unwrap();

    let registry = config.registry().unwrap();
    assert_eq!(registry.len(), 1);
    let dscr = registry.get("dscr").unwrap();
    match &dscr.gauge {
        GaugeConfig::Normative(normative) => {
            assert_eq!(normative.reference, 1.25);
            assert_eq!(normative.logic, Logic::HigherIsBetter);
        }
        other => panic!("expected normative gauge, got {other:?}"),
    }
    assert_eq!(dscr.title, "dscr");
}

#[test]
fn validation_reports_every_problem() {
    let config = parse_config(
        indoc! {r#"
            [display]
            bubble_margin = 60.0

            [metrics.currentRatio.gauge]
            shape = "three_zone"
            scale = [3.0, 0.0]
            thresholds = [1.0, 2.0]
            logic = "higher_is_better"

            [metrics.springateSScore.gauge]
            shape = "binary"
            scale = [0.0, 2.0]
            cutoff = 5.0
            logic = "higher_is_better"
            labels = ["", "Safe Zone"]
        "#},
        ConfigFormat::Toml,
    )
    .unwrap();

    let err = config.registry().unwrap_err();
    let mut found: Vec<(String, String)> = err
        .issues()
        .iter()
        .map(|issue| (issue.metric.clone(), issue.field.clone()))
        .collect();
    found.sort();
    assert_eq!(
        found,
        vec![
            ("currentRatio".to_string(), "scale".to_string()),
            ("display".to_string(), "bubble_margin".to_string()),
            ("springateSScore".to_string(), "cutoff".to_string()),
            ("springateSScore".to_string(), "labels".to_string()),
        ]
    );
    assert!(err.to_string().contains("4 problem(s)"));
}

#[test]
fn new_metric_without_kind_is_rejected() {
    let config = parse_config(
        indoc! {r#"
            [metrics.cashRatio.gauge]
            shape = "three_zone"
            scale = [0.0, 2.0]
            thresholds = [0.2, 0.5]
            logic = "higher_is_better"
        "#},
        ConfigFormat::Toml,
    )
    .unwrap();

    let err = config.registry().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert_eq!(err.issues()[0].field, "kind");
}

#[test]
fn legacy_entries_load_from_json() {
    let config = parse_config(
        r#"{
            "metrics": {
                "springateSScore": {
                    "gauge": {
                        "thresholds": [0.862, 0.862],
                        "scale": [0, 2],
                        "logic": "higher",
                        "labels": ["Distress Zone", "", "Safe Zone"]
                    }
                },
                "dscr": {
                    "gauge": {
                        "thresholds": [1.1, 1.1],
                        "scale": [0, 3],
                        "logic": "higher",
                        "isNormative": true
                    }
                }
            }
        }"#,
        ConfigFormat::Json,
    )
    .unwrap();
    let registry = config.registry().unwrap();

    assert_eq!(registry.get("springateSScore").unwrap().gauge.shape_name(), "binary");
    let dscr = registry.get("dscr").unwrap();
    assert_eq!(dscr.gauge.shape_name(), "normative");
    assert_eq!(dscr.gauge.threshold_values(), (1.1, 1.1));
}

#[test]
fn template_round_trips_through_toml() {
    let dir = TempDir::new().unwrap();
    let body = toml::to_string_pretty(&RiskgaugeConfig::template()).unwrap();
    let path = write(&dir, "template.toml", &body);

    let registry = load_config_from_path(&path).unwrap().registry().unwrap();
    let builtin = MetricRegistry::builtin();
    assert_eq!(registry.len(), builtin.len());
    for spec in builtin.iter() {
        assert_eq!(registry.get(&spec.id), Some(spec));
    }
}

#[test]
fn discovery_prefers_the_nearest_file() {
    let root = TempDir::new().unwrap();
    let project = root.path().join("project");
    let nested = project.join("q3");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        root.path().join(CONFIG_FILE_NAME),
        "[display]\nbubble_margin = 5.0\n",
    )
    .unwrap();
    fs::write(
        project.join(CONFIG_FILE_NAME),
        "[display]\nbubble_margin = 3.0\n",
    )
    .unwrap();

    let (path, config) = discover_config(nested).unwrap();
    assert_eq!(path, project.join(CONFIG_FILE_NAME));
    assert_eq!(config.display_settings().bubble_margin, 3.0);
}

#[test]
fn unreadable_file_is_skipped_during_discovery() {
    let root = TempDir::new().unwrap();
    let nested = root.path().join("inner");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join(CONFIG_FILE_NAME), "metrics = [").unwrap();
    fs::write(
        root.path().join(CONFIG_FILE_NAME),
        "[display]\nbubble_margin = 4.0\n",
    )
    .unwrap();

    let (path, config) = discover_config(nested).unwrap();
    assert_eq!(path, root.path().join(CONFIG_FILE_NAME));
    assert_eq!(config.display_settings().bubble_margin, 4.0);
}

#[test]
fn tagged_entry_never_falls_back_to_legacy_schema() {
    let result = parse_config(
        indoc! {r#"
            [metrics.dscr.gauge]
            shape = "normative"
            thresholds = [1.0, 1.0]
            scale = [0.0, 3.0]
            logic = "higher_is_better"
        "#},
        ConfigFormat::Toml,
    );
    let err = result.err().expect("normative entry without reference must be rejected");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("reference"));
}

#[test]
fn legacy_lower_is_better_normative_keeps_positional_captions() {
    let config = parse_config(
        r#"{
            "replace_builtin": true,
            "metrics": {
                "leverageCap": {
                    "kind": "multiplier_ratio",
                    "gauge": {
                        "thresholds": [0.5, 0.5],
                        "scale": [0, 1],
                        "logic": "lower",
                        "isNormative": true,
                        "labels": ["Safe", "", "Crisis"]
                    }
                }
            }
        }"#,
        ConfigFormat::Json,
    )
    .unwrap();
    let registry = config.registry().unwrap();
    let settings = riskgauge::DisplaySettings::default();

    let below = evaluate_metric(&registry, "leverageCap", 0.2, &settings);
    assert_eq!(below.zone, Zone::Good);
    assert_eq!(below.zone_label, "Safe");

    let above = evaluate_metric(&registry, "leverageCap", 0.8, &settings);
    assert_eq!(above.zone, Zone::Critical);
    assert_eq!(above.zone_label, "Crisis");
}
