//! Client configuration.
//!
//! Layered lowest to highest: built-in defaults, an optional TOML file,
//! then `PBRAND_*` environment variables. CLI flags are applied by the
//! caller on top.

use pbrand_core::{BrandError, BrandResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default backend API URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5040";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "PBRAND_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "PBRAND_TIMEOUT_SECS";
pub const ENV_ACCESS_TOKEN: &str = "PBRAND_ACCESS_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub access_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            access_token: None,
        }
    }
}

impl ClientConfig {
    /// `~/.pbrand/config.toml`, when a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".pbrand").join("config.toml"))
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> BrandResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| BrandError::config(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Load from `path`, or from the default path if it exists.
    ///
    /// An explicitly given path must exist; a missing default file is fine.
    pub fn load(path: Option<&Path>) -> BrandResult<Self> {
        let (path, required) = match path {
            Some(p) => (Some(p.to_path_buf()), true),
            None => (Self::default_path(), false),
        };

        let config = match path {
            Some(p) if required || p.exists() => {
                debug!(path = %p.display(), "Reading client config");
                let text = std::fs::read_to_string(&p)?;
                Self::from_toml_str(&text)?
            }
            _ => Self::default(),
        };

        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by environment variable name.
    pub fn with_overrides<F>(mut self, lookup: F) -> BrandResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                BrandError::config(format!("{ENV_TIMEOUT_SECS} must be a number of seconds, got '{raw}'"))
            })?;
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).filter(|t| !t.is_empty()) {
            self.access_token = Some(token);
        }
        Ok(self.normalized())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self
    }
}
