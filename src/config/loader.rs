use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::RiskgaugeConfig;
use crate::error::{ConfigError, ConfigFormat};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".riskgauge.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse configuration text in the given format. Does not validate.
pub fn parse_config(contents: &str, format: ConfigFormat) -> Result<RiskgaugeConfig, ConfigError> {
    match format {
        ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::parse(format, e)),
        ConfigFormat::Json => {
            serde_json::from_str(contents).map_err(|e| ConfigError::parse(format, e))
        }
        ConfigFormat::Yaml => {
            serde_yaml::from_str(contents).map_err(|e| ConfigError::parse(format, e))
        }
    }
}

/// Load a configuration file, picking the format from its extension.
pub fn load_config_from_path(path: &Path) -> Result<RiskgaugeConfig, ConfigError> {
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
    let contents = read_config_file(path).map_err(|e| ConfigError::io(path, e))?;
    let config = parse_config(&contents, format)?;
    log::debug!("Loaded {} config from {}", format, path.display());
    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<RiskgaugeConfig> {
    match load_config_from_path(config_path) {
        Ok(config) => Some(config),
        Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            None
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}", config_path.display(), e);
            None
        }
    }
}

/// Directories from `start` upwards, at most `max_depth` of them
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// `~/.config/riskgauge/config.toml` on Linux, the platform equivalent elsewhere
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("riskgauge").join("config.toml"))
}

/// Search `start` and its ancestors for `.riskgauge.toml`, then the user
/// configuration directory.
pub fn discover_config(start: PathBuf) -> Option<(PathBuf, RiskgaugeConfig)> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .chain(user_config_path())
        .find_map(|path| try_load_config_from_path(&path).map(|config| (path, config)))
}

/// Load the discovered configuration, or the defaults when there is none.
pub fn load_config() -> RiskgaugeConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return RiskgaugeConfig::default();
        }
    };

    match discover_config(current) {
        Some((path, config)) => {
            log::debug!("Using config {}", path.display());
            config
        }
        None => {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            RiskgaugeConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn ancestors_stop_at_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b")
            ]
        );
    }

    #[test]
    fn discovers_config_in_parent_directory() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("reports").join("2024");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            indoc! {r#"
                [display]
                middle_caption_min_width = 12
            "#},
        )
        .unwrap();

        let (path, config) = discover_config(nested).unwrap();
        assert_eq!(path, root.path().join(CONFIG_FILE_NAME));
        assert_eq!(config.display_settings().middle_caption_min_width, 12.0);
    }

    #[test]
    fn loads_json_and_yaml_by_extension() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("gauges.json");
        fs::write(
            &json,
            r#"{"metrics": {"roa": {"gauge": {"thresholds": [0.02, 0.05], "scale": [-0.05, 0.1], "logic": "higher"}}}}"#,
        )
        .unwrap();
        let yaml = dir.path().join("gauges.yaml");
        fs::write(
            &yaml,
            indoc! {"
                metrics:
                  roa:
                    gauge:
                      shape: three_zone
                      scale: [-0.05, 0.1]
                      thresholds: [0.03, 0.06]
                      logic: higher_is_better
            "},
        )
        .unwrap();

        let from_json = load_config_from_path(&json).unwrap().registry().unwrap();
        let from_yaml = load_config_from_path(&yaml).unwrap().registry().unwrap();
        assert_eq!(from_json.get("roa").unwrap().gauge.threshold_values(), (0.02, 0.05));
        assert_eq!(from_yaml.get("roa").unwrap().gauge.threshold_values(), (0.03, 0.06));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_config_from_path(Path::new("gauges.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn malformed_toml_reports_format() {
        let err = parse_config("metrics = [", ConfigFormat::Toml).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse TOML configuration"));
    }
}
