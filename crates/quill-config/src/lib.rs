//! Startup configuration for the quill relay.
//!
//! [`RelayConfig`] is built once when the process starts and passed down to
//! whatever needs it. Nothing reads the environment after that.
//!
//! ```rust
//! use quill_config::RelayConfig;
//!
//! let config = RelayConfig::from_lookup(|key| match key {
//!     "GEMINI_API_KEY" => Some("secret".to_string()),
//!     "QUILL_PORT" => Some("9000".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.bind_addr(), "127.0.0.1:9000");
//! assert_eq!(config.default_model, "gemini-2.5-flash-lite");
//! ```

use quill_core::DEFAULT_MODEL;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const API_BASE_VAR: &str = "GEMINI_API_BASE";
pub const DEFAULT_MODEL_VAR: &str = "QUILL_DEFAULT_MODEL";
pub const HOST_VAR: &str = "QUILL_HOST";
pub const PORT_VAR: &str = "QUILL_PORT";

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

/// Errors that can occur when reading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed.
    #[error("Invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Process-wide relay settings. Immutable once built.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Gemini credential. A missing key fails requests, not startup.
    pub api_key: Option<String>,
    pub api_base: String,
    pub default_model: String,
    pub host: String,
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.into(),
            default_model: DEFAULT_MODEL.into(),
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
        }
    }
}

impl RelayConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let port = match get(PORT_VAR) {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: PORT_VAR,
                value,
            })?,
            None => defaults.port,
        };

        Ok(Self {
            api_key: get(API_KEY_VAR),
            api_base: get(API_BASE_VAR)
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            default_model: get(DEFAULT_MODEL_VAR).unwrap_or(defaults.default_model),
            host: get(HOST_VAR).unwrap_or(defaults.host),
            port,
        })
    }

    /// Address the server binds to, as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = RelayConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.default_model, "gemini-2.5-flash-lite");
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
        assert!(!config.has_api_key());
    }

    #[test]
    fn overrides_are_read() {
        let config = RelayConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "abc"),
            (API_BASE_VAR, "http://localhost:9999/"),
            (DEFAULT_MODEL_VAR, "gemini-2.5-pro"),
            (HOST_VAR, "0.0.0.0"),
            (PORT_VAR, "8080"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.api_base, "http://localhost:9999");
        assert_eq!(config.default_model, "gemini-2.5-pro");
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = RelayConfig::from_lookup(lookup(&[(API_KEY_VAR, "  "), (PORT_VAR, "")])).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = RelayConfig::from_lookup(lookup(&[(PORT_VAR, "eighty")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for QUILL_PORT: 'eighty'");
    }
}
