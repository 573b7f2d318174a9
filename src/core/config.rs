use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};
use crate::core::error::{Error, ErrorKind, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,

    // JSON file with monsters and users, loaded once at startup
    pub seed_path: Option<PathBuf>,

    // Page size when the client omits `limit`
    pub default_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 4000,
            seed_path: None,
            default_limit: 8,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; missing keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            host: try_load(&lookup, "DUNGEONDEX_HOST", defaults.host)?,
            port: try_load(&lookup, "DUNGEONDEX_PORT", defaults.port)?,
            seed_path: lookup("DUNGEONDEX_SEED").map(PathBuf::from),
            default_limit: try_load(&lookup, "DUNGEONDEX_DEFAULT_LIMIT", defaults.default_limit)?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e| {
            warn!("Invalid {key} value: {e}");
            Error::new(ErrorKind::InvalidInput, format!("Invalid {}='{}': {}", key, raw, e))
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
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
    fn missing_keys_use_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.default_limit, 8);
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn values_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DUNGEONDEX_HOST", "127.0.0.1"),
            ("DUNGEONDEX_PORT", "8080"),
            ("DUNGEONDEX_SEED", "/data/monsters.json"),
        ]))
        .unwrap();

        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.seed_path, Some(PathBuf::from("/data/monsters.json")));
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("DUNGEONDEX_PORT", "http")])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidInput);
    }
}
