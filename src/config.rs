use std::collections::BTreeMap;
use std::fmt;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::{fs, path::Path};

use serde::Deserialize;

use crate::errors::ConfigError;

#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Interface to bind. `0.0.0.0` listens on all of them.
    pub host: String,

    /// HTTP port to listen on.
    pub port: u16,

    /// Log level for tracing (e.g. "info", "debug").
    pub log_level: String,

    /// Maximum accepted distance, in whole seconds, between the
    /// `X-Timestamp` of a transfer and the server clock. Inclusive.
    pub skew_tolerance_seconds: u32,

    /// Basic-auth accounts allowed to write through `/admin`.
    pub accounts: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            skew_tolerance_seconds: 5,
            accounts: BTreeMap::from([
                ("foo".to_string(), "bar".to_string()),
                ("manu".to_string(), "123".to_string()),
            ]),
        }
    }
}

// Passwords stay out of the startup log.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("skew_tolerance_seconds", &self.skew_tolerance_seconds)
            .field("accounts", &self.accounts.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let cfg = serde_json::from_str::<AppConfig>(&file)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Socket address to bind. `host` is a bare IP, v4 or v6.
    pub fn listen_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.accounts.is_empty() {
            return Err(ConfigError::Invalid("accounts must not be empty".into()));
        }

        if let Some(user) = self.accounts.keys().find(|u| u.is_empty() || u.contains(':')) {
            return Err(ConfigError::Invalid(format!(
                "account name {user:?} cannot be sent as basic-auth credentials"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_fixed_deployment() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.skew_tolerance_seconds, 5);
        assert_eq!(cfg.accounts.get("foo").map(String::as_str), Some("bar"));
        assert_eq!(cfg.accounts.get("manu").map(String::as_str), Some("123"));
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let file = write_config(r#"{ "port": 9000, "log_level": "debug" }"#);

        let cfg = AppConfig::load_from_file(file.path()).unwrap();

        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.skew_tolerance_seconds, 5);
        assert_eq!(cfg.accounts.len(), 2);
    }

    #[test]
    fn empty_account_table_is_rejected() {
        let file = write_config(r#"{ "accounts": {} }"#);

        let err = AppConfig::load_from_file(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn account_name_with_colon_is_rejected() {
        let file = write_config(r#"{ "accounts": { "a:b": "pw" } }"#);

        let err = AppConfig::load_from_file(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn empty_account_name_is_rejected() {
        let file = write_config(r#"{ "accounts": { "": "pw" } }"#);

        let err = AppConfig::load_from_file(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn listen_addr_accepts_ipv4_and_ipv6_hosts() {
        let mut cfg = AppConfig::default();
        assert_eq!(cfg.listen_addr().unwrap().to_string(), "0.0.0.0:8000");

        cfg.host = "::".to_string();
        assert_eq!(cfg.listen_addr().unwrap().to_string(), "[::]:8000");

        cfg.host = "::1".to_string();
        cfg.port = 9000;
        assert_eq!(cfg.listen_addr().unwrap().to_string(), "[::1]:9000");

        cfg.host = "localhost:80".to_string();
        assert!(cfg.listen_addr().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let file = write_config("{ port: ");

        let err = AppConfig::load_from_file(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = AppConfig::load_from_file(&dir.path().join("config.json")).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn debug_output_hides_passwords() {
        let rendered = format!("{:?}", AppConfig::default());

        assert!(rendered.contains("manu"));
        assert!(!rendered.contains("123"));
    }
}
