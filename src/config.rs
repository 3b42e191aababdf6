//! Runtime configuration for the balance fetcher.
//!
//! Defaults point at the public REE Baleares balance page and work with no
//! config file present. An optional TOML file (path in `BALEAR_CONFIG`)
//! overrides the defaults; `BALEAR_BASE_URL` and `BALEAR_USER_AGENT`
//! override individual values on top of that.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://www.ree.es/es/balance-diario/baleares";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; BalearBot/1.0)";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base address of the daily balance page; the date path is appended.
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Resolve configuration from file and environment.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os("BALEAR_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Ok(url) = std::env::var("BALEAR_BASE_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        if let Ok(agent) = std::env::var("BALEAR_USER_AGENT") {
            if !agent.is_empty() {
                config.user_agent = agent;
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn with_clean_env<T>(f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap();
        let saved: Vec<(&str, Option<std::ffi::OsString>)> =
            ["BALEAR_CONFIG", "BALEAR_BASE_URL", "BALEAR_USER_AGENT"]
                .into_iter()
                .map(|key| (key, std::env::var_os(key)))
                .collect();
        for (key, _) in &saved {
            std::env::remove_var(key);
        }
        let result = f();
        for (key, value) in saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
        result
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        with_clean_env(|| {
            let config = Config::load().unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.timeout_secs, 30);
        });
    }

    #[test]
    fn test_file_values_with_env_override() {
        with_clean_env(|| {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("balear.toml");
            fs::write(
                &path,
                "base_url = \"http://localhost:8080/balance\"\ntimeout_secs = 5\n",
            )
            .unwrap();

            std::env::set_var("BALEAR_CONFIG", &path);
            let config = Config::load().unwrap();
            assert_eq!(config.base_url, "http://localhost:8080/balance");
            assert_eq!(config.timeout_secs, 5);
            assert_eq!(config.user_agent, Config::default().user_agent);

            std::env::set_var("BALEAR_BASE_URL", "http://localhost:9090/other");
            let config = Config::load().unwrap();
            assert_eq!(config.base_url, "http://localhost:9090/other");
            assert_eq!(config.timeout_secs, 5);
        });
    }

    #[test]
    fn test_unknown_config_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("balear.toml");
        fs::write(&path, "base_uri = \"oops\"\n").unwrap();
        assert!(Config::from_file(&path).is_err());
    }
}
