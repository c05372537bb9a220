//! RON configuration for the `uplan` binary.
//!
//! Reads `uplan.ron` from the current working directory unless a path is
//! given. Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use uplan_core::Locale;
use uplan_engine::ClientSettings;
use uplan_logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "uplan.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid language in config: {0}")]
    InvalidLanguage(String),
    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub language: String,
    pub log: LogDestination,
    pub log_level: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub max_body_bytes: u64,
    pub user_agent: Option<String>,
    /// File the values were read from; `None` for built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            server_url: client.base_url,
            language: Locale::default().code().to_string(),
            log: LogDestination::default(),
            log_level: "info".to_string(),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.map(|timeout| timeout.as_secs()),
            max_body_bytes: client.max_body_bytes,
            user_agent: None,
            source: None,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server_url: Option<String>,
    pub language: Option<Locale>,
    pub log: Option<LogDestination>,
}

/// Fully resolved settings handed to the rest of the binary.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientSettings,
    pub locale: Locale,
    pub log: LogDestination,
    pub log_level: LevelFilter,
    pub config_source: Option<PathBuf>,
}

impl AppConfig {
    /// Load from `path`, or from the default file when `path` is `None`.
    /// Only a missing default file falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
        };

        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !explicit => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let config: Self = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.clone(),
            message: err.to_string(),
        })?;
        Ok(Self {
            source: Some(path),
            ..config
        })
    }

    pub fn resolve(self, overrides: Overrides) -> Result<Settings, ConfigError> {
        let locale = match overrides.language {
            Some(locale) => locale,
            None => self
                .language
                .parse::<Locale>()
                .map_err(ConfigError::InvalidLanguage)?,
        };
        let log_level = self
            .log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))?;

        let defaults = ClientSettings::default();
        let client = ClientSettings {
            base_url: overrides.server_url.unwrap_or(self.server_url),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_body_bytes: self.max_body_bytes,
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        };

        Ok(Settings {
            client,
            locale,
            log: overrides.log.unwrap_or(self.log),
            log_level,
            config_source: self.source,
        })
    }
}
