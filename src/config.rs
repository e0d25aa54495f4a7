use std::path::Path;

use crate::env::{RelayConfig, RewardConfig};
use crate::error::ConfigError;
use crate::simulation::SimulationConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rewards: RewardConfig,
    pub relay: RelayConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rewards.win <= 0.0 {
            return Err(ConfigError::Validation("rewards.win must be > 0".into()));
        }
        if self.rewards.invalid >= 0.0 {
            return Err(ConfigError::Validation(
                "rewards.invalid must be < 0".into(),
            ));
        }
        if self.rewards.draw < 0.0 {
            return Err(ConfigError::Validation("rewards.draw must be >= 0".into()));
        }
        if self.rewards.draw >= self.rewards.win {
            return Err(ConfigError::Validation(
                "rewards.draw must be < rewards.win".into(),
            ));
        }

        if self.simulation.episodes == 0 {
            return Err(ConfigError::Validation(
                "simulation.episodes must be > 0".into(),
            ));
        }
        if self.simulation.log_interval == 0 {
            return Err(ConfigError::Validation(
                "simulation.log_interval must be > 0".into(),
            ));
        }
        if self.simulation.max_steps == 0 {
            return Err(ConfigError::Validation(
                "simulation.max_steps must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::PlayerKind;
    use crate::env::FirstMover;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[rewards]
win = 50.0
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!((config.rewards.win - 50.0).abs() < 1e-6);
        // Other fields should be defaults
        assert!((config.rewards.invalid + 200.0).abs() < 1e-6);
        assert_eq!(config.simulation.episodes, 1000);
        assert_eq!(config.relay.first_mover, FirstMover::Random);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.rewards, default.rewards);
        assert_eq!(config.simulation.episodes, default.simulation.episodes);
        assert_eq!(config.relay.seed, None);
    }

    #[test]
    fn test_relay_section_parses_lowercase_names() {
        let toml_str = r#"
[relay]
opponent = "greedy"
first_mover = "opponent"
seed = 9
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.relay.opponent, PlayerKind::Greedy);
        assert_eq!(config.relay.first_mover, FirstMover::Opponent);
        assert_eq!(config.relay.seed, Some(9));
    }

    #[test]
    fn test_unknown_opponent_fails_to_parse() {
        let toml_str = r#"
[relay]
opponent = "alphazero"
"#;
        assert!(toml::from_str::<AppConfig>(toml_str).is_err());
    }

    #[test]
    fn test_validation_rejects_zero_episodes() {
        let mut config = AppConfig::default();
        config.simulation.episodes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_log_interval() {
        let mut config = AppConfig::default();
        config.simulation.log_interval = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_max_steps() {
        let mut config = AppConfig::default();
        config.simulation.max_steps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_positive_win() {
        let mut config = AppConfig::default();
        config.rewards.win = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_negative_invalid() {
        let mut config = AppConfig::default();
        config.rewards.invalid = 10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_draw_above_win() {
        let mut config = AppConfig::default();
        config.rewards.draw = 150.0;
        assert!(config.validate().is_err());

        config.rewards.draw = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.simulation.episodes, 1000);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[simulation]
episodes = 500
controller = "random"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.simulation.episodes, 500);
        assert_eq!(config.simulation.controller, PlayerKind::Random);
        // Others are defaults
        assert!((config.rewards.draw - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[rewards]\ninvalid = 5.0\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = AppConfig::load(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
