use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::gauge::GaugeConfig;
use crate::metric::MetricKind;

/// A registered metric: what it is called, how it is shown and how it is
/// classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub id: String,
    pub title: String,
    pub kind: MetricKind,
    pub gauge: GaugeConfig,
}

impl MetricSpec {
    pub fn new(id: &str, title: &str, kind: MetricKind, gauge: GaugeConfig) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            gauge,
        }
    }
}

/// Immutable-after-load map of metric id to [`MetricSpec`], keeping
/// registration order.
#[derive(Debug, Clone, Default)]
pub struct MetricRegistry {
    specs: Vec<MetricSpec>,
    index: HashMap<String, usize>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in ratios, models, ESG scores,
    /// probability index and coverage ratio.
    pub fn builtin() -> Self {
        super::presets::builtin_registry().clone()
    }

    /// Insert or replace a spec. A replaced spec keeps its position.
    pub fn insert(&mut self, spec: MetricSpec) -> Option<MetricSpec> {
        match self.index.get(&spec.id) {
            Some(&position) => Some(std::mem::replace(&mut self.specs[position], spec)),
            None => {
                self.index.insert(spec.id.clone(), self.specs.len());
                self.specs.push(spec);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&MetricSpec> {
        self.index.get(id).map(|&position| &self.specs[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricSpec> {
        self.specs.iter()
    }

    pub fn specs(&self) -> &[MetricSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl FromIterator<MetricSpec> for MetricRegistry {
    fn from_iter<I: IntoIterator<Item = MetricSpec>>(iter: I) -> Self {
        let mut registry = MetricRegistry::new();
        for spec in iter {
            registry.insert(spec);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::Logic;

    fn spec(id: &str, t2: f64) -> MetricSpec {
        MetricSpec::new(
            id,
            id,
            MetricKind::MultiplierRatio,
            GaugeConfig::three_zone((0.0, 3.0), (1.0, t2), Logic::HigherIsBetter),
        )
    }

    #[test]
    fn insert_keeps_order_and_replaces_in_place() {
        let mut registry: MetricRegistry = vec![spec("a", 2.0), spec("b", 2.0)].into_iter().collect();
        let replaced = registry.insert(spec("a", 2.5));
        assert!(replaced.is_some());
        let ids: Vec<_> = registry.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(
            registry.get("a").map(|s| s.gauge.threshold_values()),
            Some((1.0, 2.5))
        );
    }

    #[test]
    fn unknown_metric_is_absent() {
        let registry = MetricRegistry::new();
        assert!(registry.get("currentRatio").is_none());
        assert!(registry.is_empty());
    }
}
