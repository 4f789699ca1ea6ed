// Sub-modules
mod core;
mod display;
pub mod gauge;
mod loader;
pub mod presets;
mod registry;
pub mod validation;

pub use self::core::{MetricEntry, RiskgaugeConfig};
pub use display::DisplaySettings;
pub use gauge::{
    deserialize_gauge, BinaryConfig, BinaryLabels, GaugeConfig, NormativeConfig, NormativeLabels,
    ProbabilityBand, ProbabilityConfig, Scale, ThreeZoneConfig, ThreeZoneLabels, Thresholds,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path, parse_config,
    user_config_path, CONFIG_FILE_NAME,
};
pub use presets::builtin_registry;
pub use registry::{MetricRegistry, MetricSpec};
