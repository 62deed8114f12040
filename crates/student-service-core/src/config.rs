//! Application configuration management.
//!
//! Two layers live here:
//!
//! - `Config`: the persisted console settings (API base URL override, last
//!   used email, session backend), stored at
//!   `~/.config/student-service/config.json`.
//! - `ClientConfig`: the resolved settings the `ApiClient` is built from.
//!
//! The base URL is resolved as: `STUDENT_SERVICE_API_BASE_URL` env var, then
//! the config file, then the fixed deployment URL.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "student-service";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "STUDENT_SERVICE_API_BASE_URL";

/// Deployment the console talks to when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "https://gleaming-rosabelle-tsi-uni-bfd33a9f.koyeb.app";

/// Where the session is persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_email: Option<String>,
    #[serde(default)]
    pub session_backend: SessionBackend,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Resolve the client settings, letting the environment win over the file.
    pub fn client_config(&self) -> ClientConfig {
        let base_url = env_base_url()
            .or_else(|| self.api_base_url.clone().filter(|u| !u.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        ClientConfig {
            base_url: normalize_base_url(&base_url),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Settings the API client is constructed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without trailing slashes
    pub base_url: String,
    /// Optional per-request timeout. `None` means requests wait indefinitely.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.as_ref()),
            request_timeout: None,
        }
    }

    /// Base URL from `STUDENT_SERVICE_API_BASE_URL`, or the deployment default.
    pub fn from_env() -> Self {
        Self::new(env_base_url().unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

fn env_base_url() -> Option<String> {
    std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Strip trailing slashes from a base URL.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}
