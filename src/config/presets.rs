//! Built-in metric registry.
//!
//! Scales, thresholds and captions for the metrics the scoring service
//! returns:
//! - **Key ratios**: liquidity, leverage, profitability and efficiency
//! - **Distress models**: Altman, Springate, Taffler, Fulmer and Grover
//! - **ESG**: overall score and the three pillar scores
//! - **Vecthor Index**: calibrated probability of distress
//! - **DSCR**: debt service coverage against the fixed 1.0 reference
//!
//! Files can override any entry, see [`crate::config::RiskgaugeConfig`].

use once_cell::sync::Lazy;

use super::gauge::{
    BinaryConfig, BinaryLabels, GaugeConfig, NormativeConfig, NormativeLabels, ProbabilityConfig,
    Scale, ThreeZoneConfig, ThreeZoneLabels,
};
use super::registry::{MetricRegistry, MetricSpec};
use crate::classification::{BinaryTie, Logic};
use crate::metric::MetricKind;

static BUILTIN_REGISTRY: Lazy<MetricRegistry> =
    Lazy::new(|| builtin_specs().into_iter().collect());

/// Shared built-in registry, built on first use.
pub fn builtin_registry() -> &'static MetricRegistry {
    &BUILTIN_REGISTRY
}

fn ratio(id: &str, title: &str, kind: MetricKind, scale: (f64, f64), thresholds: (f64, f64), logic: Logic) -> MetricSpec {
    MetricSpec::new(id, title, kind, GaugeConfig::three_zone(scale, thresholds, logic))
}

fn model(id: &str, title: &str, scale: (f64, f64), thresholds: (f64, f64), labels: [&str; 3]) -> MetricSpec {
    let [low, middle, high] = labels;
    MetricSpec::new(
        id,
        title,
        MetricKind::DistressModel,
        GaugeConfig::ThreeZone(ThreeZoneConfig {
            scale: scale.into(),
            thresholds: thresholds.into(),
            logic: Logic::HigherIsBetter,
            labels: Some(ThreeZoneLabels::new(low, middle, high)),
        }),
    )
}

fn binary_model(id: &str, title: &str, scale: (f64, f64), cutoff: f64, labels: [&str; 2]) -> MetricSpec {
    let [low, high] = labels;
    MetricSpec::new(
        id,
        title,
        MetricKind::DistressModel,
        GaugeConfig::Binary(BinaryConfig {
            scale: scale.into(),
            cutoff,
            logic: Logic::HigherIsBetter,
            labels: BinaryLabels::new(low, high),
            tie: BinaryTie::Low,
        }),
    )
}

pub fn key_ratio_specs() -> Vec<MetricSpec> {
    use MetricKind::{MultiplierRatio, PercentageRatio};
    use Logic::{HigherIsBetter, LowerIsBetter};

    vec![
        ratio("currentRatio", "Current Ratio", MultiplierRatio, (0.0, 3.0), (1.0, 2.0), HigherIsBetter),
        ratio("quickRatio", "Quick Ratio", MultiplierRatio, (0.0, 2.0), (0.8, 1.2), HigherIsBetter),
        ratio("debtToEquityRatio", "Debt-to-Equity Ratio", MultiplierRatio, (0.0, 3.0), (2.0, 1.0), LowerIsBetter),
        ratio("debtToAssetsRatio", "Debt-to-Asset Ratio", PercentageRatio, (0.0, 1.0), (0.6, 0.4), LowerIsBetter),
        ratio("interestCoverageRatio", "Interest Coverage Ratio", MultiplierRatio, (0.0, 10.0), (1.5, 5.0), HigherIsBetter),
        ratio("roa", "Return on Assets (ROA)", PercentageRatio, (-0.05, 0.10), (0.02, 0.05), HigherIsBetter),
        ratio("roe", "Return on Equity (ROE)", PercentageRatio, (-0.10, 0.30), (0.05, 0.15), HigherIsBetter),
        ratio("roi", "Return on Investment (ROI)", PercentageRatio, (0.0, 0.20), (0.05, 0.10), HigherIsBetter),
        ratio("ros", "Return on Sales (ROS)", PercentageRatio, (0.0, 0.30), (0.05, 0.15), HigherIsBetter),
        ratio("assetTurnover", "Asset Turnover", MultiplierRatio, (0.0, 3.0), (0.5, 1.5), HigherIsBetter),
    ]
}

pub fn distress_model_specs() -> Vec<MetricSpec> {
    vec![
        model("altmanZScore", "Altman Z-Score", (0.0, 5.0), (1.81, 2.99), ["Distress Zone", "Grey Zone", "Safe Zone"]),
        binary_model("springateSScore", "Springate S-Score", (0.0, 2.0), 0.862, ["Distress Zone", "Safe Zone"]),
        model("tafflerTScore", "Taffler T-Score", (-0.5, 1.0), (0.2, 0.3), ["High Risk", "Grey Zone", "Low Risk"]),
        binary_model("fulmerHFactor", "Fulmer H-Factor", (-5.0, 5.0), 0.0, ["Failure Zone", "Safe Zone"]),
        model("groverGScore", "Grover G-Score", (-0.5, 0.5), (-0.02, 0.01), ["Distress Zone", "Grey Zone", "Safe Zone"]),
    ]
}

pub fn esg_specs() -> Vec<MetricSpec> {
    use Logic::HigherIsBetter;
    use MetricKind::{EsgOverall, EsgPillar};

    vec![
        ratio("esgOverall", "ESG Overall", EsgOverall, (0.0, 100.0), (50.0, 70.0), HigherIsBetter),
        ratio("esgEnvironmental", "Environmental (1-5)", EsgPillar, (1.0, 5.0), (3.0, 4.0), HigherIsBetter),
        ratio("esgSocial", "Social (1-5)", EsgPillar, (1.0, 5.0), (3.0, 4.0), HigherIsBetter),
        ratio("esgGovernance", "Governance (1-5)", EsgPillar, (1.0, 5.0), (3.0, 4.0), HigherIsBetter),
    ]
}

pub fn vecthor_index_spec() -> MetricSpec {
    MetricSpec::new(
        "vecthorIndex",
        "Vecthor Index",
        MetricKind::ProbabilityIndex,
        GaugeConfig::Probability(ProbabilityConfig::default()),
    )
}

pub fn dscr_spec() -> MetricSpec {
    MetricSpec::new(
        "dscr",
        "Debt Service Coverage Ratio (DSCR)",
        MetricKind::CoverageRatio,
        GaugeConfig::Normative(NormativeConfig {
            scale: Scale::new(0.0, 3.0),
            reference: 1.0,
            logic: Logic::HigherIsBetter,
            labels: NormativeLabels {
                fail: "Crisis".to_string(),
                pass: "Safe".to_string(),
            },
        }),
    )
}

pub fn builtin_specs() -> Vec<MetricSpec> {
    let mut specs = key_ratio_specs();
    specs.extend(distress_model_specs());
    specs.extend(esg_specs());
    specs.push(vecthor_index_spec());
    specs.push(dscr_spec());
    specs
}
