//! Configuration loading and typed config structures for the companion
//! state service.
//!
//! The canonical configuration lives in `companion-config.yaml` next to
//! the binary's working directory. Every field has a default, so an empty
//! or missing file yields a runnable configuration. Environment variables
//! override the file for deployment-specific values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held a value of the wrong shape.
    #[error("invalid {name}: {message}")]
    InvalidEnv {
        /// Name of the environment variable.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `companion-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompanionConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Locations of the persisted documents.
    #[serde(default)]
    pub storage: StorageConfig,

    /// API key settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CompanionConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `COMPANION_HOST`, `COMPANION_PORT` override `server`
    /// - `COMPANION_STATE_FILE`, `COMPANION_WORLD_FILE`,
    ///   `COMPANION_MEMORY_FILE` override `storage`
    /// - `COMPANION_API_KEY` overrides `auth.api_key`
    /// - `COMPANION_LOG_FORMAT` overrides `logging.format`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise start from defaults.
    /// Environment overrides apply in both cases.
    ///
    /// # Errors
    ///
    /// See [`CompanionConfig::from_file`].
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Override configured values with environment variables when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if `COMPANION_PORT` or
    /// `COMPANION_LOG_FORMAT` hold unparseable values.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("COMPANION_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("COMPANION_PORT") {
            self.server.port = val.parse().map_err(|e| ConfigError::InvalidEnv {
                name: "COMPANION_PORT",
                message: format!("{e}"),
            })?;
        }
        if let Ok(val) = std::env::var("COMPANION_STATE_FILE") {
            self.storage.state_file = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("COMPANION_WORLD_FILE") {
            self.storage.world_file = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("COMPANION_MEMORY_FILE") {
            self.storage.memory_file = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("COMPANION_API_KEY") {
            self.auth.api_key = val;
        }
        if let Ok(val) = std::env::var("COMPANION_LOG_FORMAT") {
            self.logging.format = LogFormat::parse(&val).ok_or_else(|| {
                ConfigError::InvalidEnv {
                    name: "COMPANION_LOG_FORMAT",
                    message: format!("expected `pretty` or `json`, got `{val}`"),
                }
            })?;
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Locations of the persisted documents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the shared state document.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// JSON file holding the world/location reference document.
    #[serde(default = "default_world_file")]
    pub world_file: PathBuf,

    /// JSON-lines file receiving durable memory records.
    #[serde(default = "default_memory_file")]
    pub memory_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            world_file: default_world_file(),
            memory_file: default_memory_file(),
        }
    }
}

/// API key settings.
///
/// An empty key rejects every request to the protected routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthConfig {
    /// The shared secret clients send in `X-API-Key`.
    #[serde(default)]
    pub api_key: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse a format name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8000
}

fn default_state_file() -> PathBuf {
    PathBuf::from("data/state.json")
}

fn default_world_file() -> PathBuf {
    PathBuf::from("data/world.json")
}

fn default_memory_file() -> PathBuf {
    PathBuf::from("data/memories.jsonl")
}

fn default_log_level() -> String {
    "info".to_owned()
}
