use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::units::UnitPreferences;

/// Contents of `config.yaml`. Every field is optional.
///
/// Example YAML:
/// ```yaml
/// units:
///   width: mm
///   speed: m/s
/// store_path: /srv/cema/evaluations.json
/// log_level: info
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Units assumed for `--width` / `--speed` when no unit flag is given
    #[serde(default)]
    pub units: UnitPreferences,

    /// Evaluation store location (default: ~/.config/cema-score/evaluations.json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    /// tracing filter directive, e.g. "info" or "cema_score=debug".
    /// RUST_LOG takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{SpeedUnit, WidthUnit};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.units.width, WidthUnit::Inches);
        assert_eq!(config.units.speed, SpeedUnit::FeetPerMinute);
        assert!(config.store_path.is_none());
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
units:
  width: mm
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.units.width, WidthUnit::Millimeters);
        assert_eq!(config.units.speed, SpeedUnit::FeetPerMinute);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
units:
  width: mm
  speed: m/s
store_path: /tmp/evaluations.json
log_level: debug
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.units.speed, SpeedUnit::MetersPerSecond);
        assert_eq!(config.store_path, Some(PathBuf::from("/tmp/evaluations.json")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "queries: []\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let yaml = "units:\n  width: cm\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            units: UnitPreferences {
                width: WidthUnit::Millimeters,
                speed: SpeedUnit::MetersPerSecond,
            },
            store_path: Some(PathBuf::from("/data/evaluations.json")),
            log_level: Some("info".to_string()),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
