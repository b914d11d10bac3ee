use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::constants::{
    CHECKPOINT_EVERY, DEFAULT_API_KEY, DEFAULT_CONFIG_PATH, DEFAULT_INPUT_PATH, GEOCODE_ENDPOINT,
    PROGRESS_EVERY,
};
use crate::error::{ConverterError, Result};

pub const ENV_INPUT: &str = "FA_GEOCODER_INPUT";
pub const ENV_OUTPUT_DIR: &str = "FA_GEOCODER_OUTPUT_DIR";
pub const ENV_API_KEY: &str = "GOOGLE_MAPS_API_KEY";

/// Run settings. Sources, lowest precedence first: built-in defaults, the
/// TOML file, environment variables, command line flags (applied by `main`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub api_key: String,
    pub endpoint: String,
    pub progress_every: usize,
    pub checkpoint_every: usize,
    pub timeout_seconds: Option<u64>,
    pub limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from("."),
            api_key: DEFAULT_API_KEY.to_string(),
            endpoint: GEOCODE_ENDPOINT.to_string(),
            progress_every: PROGRESS_EVERY,
            checkpoint_every: CHECKPOINT_EVERY,
            timeout_seconds: None,
            limit: None,
        }
    }
}

impl Config {
    /// Loads the config file and applies environment overrides.
    ///
    /// An explicitly given file must exist; the default `fa_geocoder.toml` is
    /// optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConverterError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        info!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies overrides looked up by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(input) = lookup(ENV_INPUT).filter(|v| !v.trim().is_empty()) {
            self.input_path = PathBuf::from(input);
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.trim().is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.api_key = key;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.progress_every == 0 {
            return Err(ConverterError::Config("progress_every must be at least 1".into()));
        }
        if self.checkpoint_every == 0 {
            return Err(ConverterError::Config("checkpoint_every must be at least 1".into()));
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConverterError::Config("endpoint must not be empty".into()));
        }
        if self.api_key == DEFAULT_API_KEY {
            warn!("Geocoding API key is still the placeholder; every lookup will be denied");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_batch_layout() {
        let config = Config::default();
        assert_eq!(config.progress_every, 100);
        assert_eq!(config.checkpoint_every, 1000);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.endpoint, GEOCODE_ENDPOINT);
        assert!(config.timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            input_path = "data/ia_advisers.xlsx"
            timeout_seconds = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.input_path, PathBuf::from("data/ia_advisers.xlsx"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(20)));
        assert_eq!(config.checkpoint_every, 1000);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            Config::from_toml_str("checkpoint = 5"),
            Err(ConverterError::Toml(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            ENV_API_KEY => Some("secret".to_string()),
            ENV_OUTPUT_DIR => Some("out".to_string()),
            ENV_INPUT => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.input_path, PathBuf::from(DEFAULT_INPUT_PATH));
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let config = Config {
            checkpoint_every: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConverterError::Config(_))));

        let config = Config {
            progress_every: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
