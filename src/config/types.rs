//! Core configuration types and loading.

use super::defaults::{default_port, default_timestamp_format, generate_server_id};
use crate::notification::TriggerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Client configuration: saved networks, UI settings and notifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub servers: Vec<ServerRecord>,
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl Config {
    /// Load configuration from a TOML file and fill in defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_defaults();
        Ok(config)
    }

    /// Load configuration, or start empty when the file does not exist yet.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Write configuration as TOML, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Assign missing server ids and ports.
    pub fn apply_defaults(&mut self) {
        for server in &mut self.servers {
            server.apply_defaults();
        }
    }
}

/// One saved network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    /// Stable identifier; generated when absent.
    #[serde(default)]
    pub id: String,
    pub hostname: String,
    /// 0 means "default for the TLS setting".
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub tls: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sasl_login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sasl_password: Option<String>,
    #[serde(default)]
    pub auto_connect: bool,
    pub profile: Profile,
}

impl ServerRecord {
    pub fn new(hostname: impl Into<String>, port: u16, tls: bool, nickname: impl Into<String>) -> Self {
        let mut record = Self {
            id: String::new(),
            hostname: hostname.into(),
            port,
            tls,
            password: None,
            sasl_login: None,
            sasl_password: None,
            auto_connect: false,
            profile: Profile {
                nickname: nickname.into(),
            },
        };
        record.apply_defaults();
        record
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn apply_defaults(&mut self) {
        if self.id.is_empty() {
            self.id = generate_server_id();
        }
        if self.port == 0 {
            self.port = default_port(self.tls);
        }
    }

    /// `host:port` as shown in status lines.
    pub fn address(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }

    pub fn nickname(&self) -> &str {
        &self.profile.nickname
    }

    /// SASL is used only when both halves are present.
    pub fn sasl_credentials(&self) -> Option<(&str, &str)> {
        match (self.sasl_login.as_deref(), self.sasl_password.as_deref()) {
            (Some(login), Some(password)) if !login.is_empty() && !password.is_empty() => {
                Some((login, password))
            }
            _ => None,
        }
    }
}

/// Identity used on a network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSettings {
    /// chrono strftime pattern for message timestamps.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub triggers: Vec<TriggerConfig>,
}
