//! Server configuration from Shuttle secrets

use std::time::Duration;

use shuttle_runtime::SecretStore;
use thiserror::Error;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_MARKET: &str = "US";
pub const DEFAULT_RESOLVER_CONCURRENCY: usize = 5;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required secret {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Runtime settings. Holds secrets, so no `Debug`.
#[derive(Clone)]
pub struct ServerConfig {
    pub jwt_secret: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub spotify_api_base: String,
    pub spotify_market: String,
    pub resolver_concurrency: usize,
    pub http_timeout: Duration,
}

impl ServerConfig {
    pub fn from_secrets(secrets: &SecretStore) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| secrets.get(key))
    }

    /// Build from any key lookup. Blank values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let resolver_concurrency = match get("RESOLVER_CONCURRENCY") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "RESOLVER_CONCURRENCY",
                        message: format!("expected a positive integer, got {raw:?}"),
                    })
                }
            },
            None => DEFAULT_RESOLVER_CONCURRENCY,
        };

        let http_timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "HTTP_TIMEOUT_SECS",
                        message: format!("expected a positive number of seconds, got {raw:?}"),
                    })
                }
            },
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            jwt_secret: required("JWT_SECRET")?,
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            spotify_api_base: get("SPOTIFY_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SPOTIFY_API_BASE.to_string()),
            spotify_market: get("SPOTIFY_MARKET")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_MARKET.to_string()),
            resolver_concurrency,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config =
            ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "s"), ("GEMINI_API_KEY", "k")]))
                .unwrap();

        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.spotify_api_base, DEFAULT_SPOTIFY_API_BASE);
        assert_eq!(config.spotify_market, "US");
        assert_eq!(config.resolver_concurrency, 5);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_required_secret() {
        let result = ServerConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")]));
        assert_eq!(result.err(), Some(ConfigError::Missing("JWT_SECRET")));

        let result =
            ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "s"), ("GEMINI_API_KEY", " ")]));
        assert_eq!(result.err(), Some(ConfigError::Missing("GEMINI_API_KEY")));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s"),
            ("GEMINI_API_KEY", "k"),
            ("RESOLVER_CONCURRENCY", "0"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "RESOLVER_CONCURRENCY",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        for raw in ["0", "-3", "soon"] {
            let result = ServerConfig::from_lookup(lookup(&[
                ("JWT_SECRET", "s"),
                ("GEMINI_API_KEY", "k"),
                ("HTTP_TIMEOUT_SECS", raw),
            ]));
            assert!(matches!(
                result,
                Err(ConfigError::Invalid {
                    key: "HTTP_TIMEOUT_SECS",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s"),
            ("GEMINI_API_KEY", "k"),
            ("SPOTIFY_API_BASE", "http://localhost:9000/v1/"),
            ("RESOLVER_CONCURRENCY", "2"),
            ("HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.spotify_api_base, "http://localhost:9000/v1");
        assert_eq!(config.resolver_concurrency, 2);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }
}
