use std::path::Path;

use crate::ai::network::MAX_HIDDEN_SIZE;
use crate::ai::NetworkConfig;
use crate::cli::PlayConfig;
use crate::error::ConfigError;
use crate::training::trainer::TrainerConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub training: TrainerConfig,
    pub play: PlayConfig,
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
        if self.network.hidden_size == 0 || self.network.hidden_size > MAX_HIDDEN_SIZE {
            return Err(ConfigError::Validation(format!(
                "network.hidden_size must be in 1..={MAX_HIDDEN_SIZE}"
            )));
        }
        if !self.network.learning_rate.is_finite() || self.network.learning_rate <= 0.0 {
            return Err(ConfigError::Validation(
                "network.learning_rate must be > 0".into(),
            ));
        }

        if self.training.num_episodes == 0 {
            return Err(ConfigError::Validation(
                "training.num_episodes must be > 0".into(),
            ));
        }
        if self.training.log_interval == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval must be > 0".into(),
            ));
        }
        if self.training.eval_interval == 0 {
            return Err(ConfigError::Validation(
                "training.eval_interval must be > 0".into(),
            ));
        }
        if self.training.eval_games == 0 {
            return Err(ConfigError::Validation(
                "training.eval_games must be > 0".into(),
            ));
        }
        for (name, value) in [
            ("win_target", self.training.win_target),
            ("loss_target", self.training.loss_target),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "training.{name} must be in [0, 1]"
                )));
            }
        }
        if self.training.win_target <= self.training.loss_target {
            return Err(ConfigError::Validation(
                "training.win_target must be > training.loss_target".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
