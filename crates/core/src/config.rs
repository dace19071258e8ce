use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VidaskError};

pub const DEFAULT_ENDPOINT: &str = "https://generativeaidev.azurewebsites.net/fileupload";
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

pub const ENDPOINT_ENV: &str = "VIDASK_ENDPOINT";
pub const API_KEY_ENV: &str = "VIDASK_API_KEY";
pub const TIMEOUT_ENV: &str = "VIDASK_TIMEOUT_SECS";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Inference endpoint receiving the multipart upload
    pub endpoint: String,
    /// Sent as a bearer token when set
    pub api_key: Option<String>,
    /// `0` disables the timeout
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Apply `VIDASK_*` overrides using the given variable lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            self.endpoint = endpoint;
        }
        if let Some(api_key) = lookup(API_KEY_ENV) {
            self.api_key = Some(api_key).filter(|key| !key.is_empty());
        }
        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            self.request_timeout_secs =
                timeout.trim().parse().map_err(|_| VidaskError::ConfigError {
                    origin: TIMEOUT_ENV.to_string(),
                    reason: format!("expected a number of seconds, got {timeout:?}"),
                })?;
        }
        Ok(self)
    }

    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint).map_err(|e| VidaskError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(VidaskError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: format!("unsupported scheme {scheme}"),
            }),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Default location of the configuration file
pub fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vidask")
        .join(CONFIG_FILE)
}

/// Load configuration from a TOML file. A missing file yields the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    toml::from_str(&content).map_err(|e| VidaskError::ConfigError {
        origin: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Load the file (explicit path or the default one), apply environment overrides and
/// the command-line endpoint, then validate
pub fn load(path: Option<&Path>, endpoint: Option<String>) -> Result<Config> {
    resolve(path, endpoint, |key| std::env::var(key).ok())
}

fn resolve(
    path: Option<&Path>,
    endpoint: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);
    let mut config = load_from_path(&path)?.with_overrides(lookup)?;
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }
    config.endpoint_url()?;

    tracing::debug!(
        path = %path.display(),
        endpoint = %config.endpoint,
        authenticated = config.api_key.is_some(),
        "configuration loaded"
    );
    Ok(config)
}
