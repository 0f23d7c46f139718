//! Configuration loading for the searchlab TUI.
//!
//! All fields are required. No defaults.

use searchlab_core::Session;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "SEARCHLAB_CONFIG";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    pub api_base_url: String,
    pub auth: AuthConfig,
    pub request_timeout_ms: u64,
    pub refresh_interval_ms: u64,
    pub persistence_path: PathBuf,
    pub error_log_path: PathBuf,
    pub theme: ThemeConfig,
}

/// Credentials issued by the identity provider; searchlab never signs in.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    pub id_token: String,
    pub identity: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("id_token", &"<redacted>")
            .field("identity", &self.identity)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or SEARCHLAB_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: TuiConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        require("api_base_url", !base.is_empty(), "must not be empty")?;
        require(
            "api_base_url",
            base.starts_with("http://") || base.starts_with("https://"),
            "must start with http:// or https://",
        )?;
        require("auth.id_token", !self.auth.id_token.trim().is_empty(), "must not be empty")?;
        require("auth.identity", !self.auth.identity.trim().is_empty(), "must not be empty")?;
        require("request_timeout_ms", self.request_timeout_ms > 0, "must be > 0")?;
        require("refresh_interval_ms", self.refresh_interval_ms > 0, "must be > 0")?;
        require(
            "persistence_path",
            !self.persistence_path.as_os_str().is_empty(),
            "must not be empty",
        )?;
        require(
            "error_log_path",
            !self.error_log_path.as_os_str().is_empty(),
            "must not be empty",
        )?;
        require("theme.name", !self.theme.name.trim().is_empty(), "must not be empty")?;
        require(
            "theme.name",
            self.theme.name.eq_ignore_ascii_case("synthbrute"),
            "only 'synthbrute' is supported",
        )
    }

    /// Build the session every gateway call carries.
    pub fn session(&self) -> Result<Session, ConfigError> {
        Session::new(self.auth.id_token.trim(), self.auth.identity.clone()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "auth.id_token",
                reason: e.to_string(),
            }
        })
    }
}

fn require(field: &'static str, ok: bool, reason: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: reason.to_string(),
        })
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var(CONFIG_ENV).ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}
