use anyhow::{Context, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Settings for talking to the model backend.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Config {
            api_key: non_empty(API_KEY_VAR),
            model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_empty("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Bind address for the web front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("QA_HOST")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("QA_PORT").map(|value| value.trim().to_string()) {
            Some(raw) if !raw.is_empty() => raw
                .parse::<u16>()
                .with_context(|| format!("invalid QA_PORT value '{}'", raw))?,
            _ => DEFAULT_PORT,
        };

        Ok(ServerConfig { host, port })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "   ")]));
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", " secret "),
            ("GEMINI_MODEL", "gemini-pro"),
            ("GEMINI_BASE_URL", "http://localhost:9999/v1"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn test_server_defaults() {
        let server = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(server, ServerConfig::default());
        assert_eq!(server.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_server_port_override() {
        let server = ServerConfig::from_lookup(lookup_from(&[
            ("QA_HOST", "127.0.0.1"),
            ("QA_PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(server.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_server_rejects_bad_port() {
        let err = ServerConfig::from_lookup(lookup_from(&[("QA_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("invalid QA_PORT"));
    }
}
