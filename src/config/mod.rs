//! Configuration loading and management.
//!
//! - [`types`]: config structs, loading and saving
//! - [`defaults`]: serde default functions and generated values
//! - [`validation`]: whole-config checks run after loading

mod defaults;
mod types;
mod validation;

pub use defaults::{DEFAULT_PLAIN_PORT, DEFAULT_TLS_PORT, generate_server_id};
pub use types::{Config, ConfigError, NotificationSettings, Profile, ServerRecord, UiSettings};
pub use validation::{ValidationError, validate};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::TriggerConfig;

    const SAMPLE: &str = r##"
[ui]
timestamp_format = "%H:%M"

[[servers]]
hostname = "irc.libera.chat"
tls = true
auto_connect = true
[servers.profile]
nickname = "ferris"

[[servers]]
id = "home"
hostname = "irc.example.net"
port = 6668
[servers.profile]
nickname = "ferris"

[[notifications.triggers]]
source = "#rust"
message = "ferris"
popup = true
"##;

    #[test]
    fn test_load_applies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.ui.timestamp_format, "%H:%M");
        assert_eq!(config.servers.len(), 2);

        let libera = &config.servers[0];
        assert_eq!(libera.port, DEFAULT_TLS_PORT);
        assert!(!libera.id.is_empty());
        assert!(libera.auto_connect);

        let home = &config.servers[1];
        assert_eq!(home.id, "home");
        assert_eq!(home.port, 6668);
        assert_eq!(home.address(), "irc.example.net:6668");

        assert_eq!(config.notifications.triggers[0].source, "#rust");
        assert!(config.notifications.triggers[0].popup);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.servers.push(ServerRecord::new("irc.example.net", 0, false, "ferris"));
        config.notifications.triggers.push(TriggerConfig {
            nick: "bob".into(),
            sound: true,
            ..TriggerConfig::default()
        });
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.servers[0].port, DEFAULT_PLAIN_PORT);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert!(config.servers.is_empty());
        assert_eq!(config.ui.timestamp_format, "%H:%M:%S");
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "servers = 5").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_sasl_credentials_need_both() {
        let mut record = ServerRecord::new("irc.example.net", 0, true, "ferris");
        assert!(record.sasl_credentials().is_none());
        record.sasl_login = Some("ferris".into());
        assert!(record.sasl_credentials().is_none());
        record.sasl_password = Some("hunter2".into());
        assert_eq!(record.sasl_credentials(), Some(("ferris", "hunter2")));
    }
}
