//! # Configs
//!
//! Runtime settings for the feed workspace.
//!
//! Loading order (later wins):
//! 1. Built-in defaults
//! 2. `config/feed.toml` (optional)
//! 3. `FEED__*` environment variables, e.g. `FEED__CMS__ENDPOINT`
//!
//! A `.env` file is read first so local runs can keep variables there.

pub mod telemetry;

use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config/feed.toml";
pub const ENV_PREFIX: &str = "FEED";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Deployment environment, e.g. `development`, `testing`, `production`.
    pub environment: String,
    #[serde(default)]
    pub store: StoreSettings,
    pub cms: CmsSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSettings {
    /// Appended to the `feed` collection root, e.g. `testing` gives `feed_testing`.
    #[serde(default)]
    pub collection_suffix: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CmsSettings {
    /// Ghost base URL. No endpoint means no CMS merge.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<SecretString>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// An `EnvFilter` directive, e.g. `info` or `storage_adapters=debug,info`.
    pub level: String,
    pub json: bool,
}

impl Settings {
    /// Loads `.env`, then the default config file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Same as [`Settings::load`] with an explicit file. A missing file is
    /// not an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings = defaults()?
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cms.timeout_secs == 0 {
            return Err(ConfigError::Invalid("cms.timeout_secs must be greater than 0".into()));
        }
        if self.cms.endpoint.is_some() && self.cms.api_key.is_none() {
            return Err(ConfigError::Invalid("cms.api_key is required when cms.endpoint is set".into()));
        }
        Ok(())
    }

    pub fn cms_enabled(&self) -> bool {
        self.cms.endpoint.as_deref().is_some_and(|e| !e.trim().is_empty())
    }

    pub fn cms_timeout(&self) -> Duration {
        Duration::from_secs(self.cms.timeout_secs)
    }
}

fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    config::Config::builder()
        .set_default("environment", "development")?
        .set_default("cms.timeout_secs", 10)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_a_file() {
        let settings = Settings::load_from(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(settings.cms.timeout_secs, 10);
        assert_eq!(settings.cms_timeout(), Duration::from_secs(10));
        assert!(!settings.cms_enabled());
        assert!(!settings.log.level.is_empty());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
environment = "testing"

[store]
collection_suffix = "testing"

[cms]
endpoint = "https://cms.example.com"
api_key = "content-key"
timeout_secs = 3

[log]
level = "debug"
json = true
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.environment, "testing");
        assert_eq!(settings.store.collection_suffix.as_deref(), Some("testing"));
        assert!(settings.cms_enabled());
        assert_eq!(settings.cms.api_key.as_ref().unwrap().expose_secret(), "content-key");
        assert_eq!(settings.cms_timeout(), Duration::from_secs(3));
        assert!(settings.log.json);
    }

    #[test]
    fn endpoint_without_key_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[cms]\nendpoint = \"https://cms.example.com\"").unwrap();

        let err = Settings::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
