//! Configuration system (layered: defaults < config file < environment).

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::Deserialize;
use tracing::debug;

use crate::error::RoamError;

pub const DEFAULT_MODEL: &str = "openai:gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_ITERATIONS: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Provider API keys and base URL overrides.
///
/// Cheap to clone; clones share the same underlying maps.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    api_keys: Arc<RwLock<HashMap<String, String>>>,
    base_urls: Arc<RwLock<HashMap<String, String>>>,
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers: Vec<String> = self
            .api_keys
            .read()
            .map(|keys| keys.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("ProviderCredentials")
            .field("api_keys", &providers)
            .field("base_urls", &self.base_urls)
            .finish()
    }
}

impl ProviderCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_api_key(&self, provider: &str, key: String) {
        if let Ok(mut keys) = self.api_keys.write() {
            keys.insert(provider.to_string(), key);
        }
    }

    pub fn get_api_key(&self, provider: &str) -> Option<String> {
        self.api_keys.read().ok()?.get(provider).cloned()
    }

    pub fn set_base_url(&self, provider: &str, url: String) {
        if let Ok(mut urls) = self.base_urls.write() {
            urls.insert(provider.to_string(), url);
        }
    }

    pub fn get_base_url(&self, provider: &str) -> Option<String> {
        self.base_urls.read().ok()?.get(provider).cloned()
    }

    pub fn has_credentials(&self, provider: &str) -> bool {
        self.get_api_key(provider).is_some()
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: Vec::new(),
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Model selector, `provider:model_id`.
    pub model: String,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    pub max_iterations: usize,
    pub request_timeout_secs: u64,
    pub server: ServerConfig,
    pub credentials: ProviderCredentials,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            server: ServerConfig::default(),
            credentials: ProviderCredentials::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    model: Option<String>,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    max_iterations: Option<usize>,
    request_timeout_secs: Option<u64>,
    #[serde(default)]
    server: FileServerConfig,
    #[serde(default)]
    providers: HashMap<String, FileProviderConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileServerConfig {
    host: Option<String>,
    port: Option<u16>,
    allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileProviderConfig {
    api_key: Option<String>,
    base_url: Option<String>,
}

const API_KEY_ENV: [(&str, &str); 2] = [
    ("OPENAI_API_KEY", "openai"),
    ("OPENAI_COMPAT_API_KEY", "openai-compatible"),
];

const BASE_URL_ENV: [(&str, &str); 2] = [
    ("OPENAI_BASE_URL", "openai"),
    ("OPENAI_COMPAT_BASE_URL", "openai-compatible"),
];

impl AppConfig {
    /// Load `.env`, then the config file, then process environment.
    ///
    /// An explicit `path` must exist. Without one, `config.toml` in the user
    /// config directory is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, RoamError> {
        let _ = dotenvy::dotenv();

        let file_contents = match path {
            Some(path) => Some(std::fs::read_to_string(path).map_err(|e| {
                RoamError::Configuration(format!("cannot read {}: {e}", path.display()))
            })?),
            None => match default_config_path() {
                Some(path) if path.is_file() => {
                    debug!(path = %path.display(), "loading config file");
                    Some(std::fs::read_to_string(&path).map_err(|e| {
                        RoamError::Configuration(format!("cannot read {}: {e}", path.display()))
                    })?)
                }
                _ => None,
            },
        };

        let config = match file_contents {
            Some(contents) => Self::from_toml_str(&contents)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, RoamError> {
        let file: FileConfig = toml::from_str(contents)
            .map_err(|e| RoamError::Configuration(format!("invalid config file: {e}")))?;

        let mut config = Self::default();
        if let Some(model) = file.model {
            config.model = model;
        }
        if let Some(temperature) = file.temperature {
            config.temperature = temperature;
        }
        config.max_tokens = file.max_tokens.or(config.max_tokens);
        if let Some(max_iterations) = file.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(secs) = file.request_timeout_secs {
            config.request_timeout_secs = secs;
        }
        if let Some(host) = file.server.host {
            config.server.host = host;
        }
        if let Some(port) = file.server.port {
            config.server.port = port;
        }
        if let Some(origins) = file.server.allowed_origins {
            config.server.allowed_origins = origins;
        }
        for (provider, settings) in file.providers {
            if let Some(key) = settings.api_key {
                config.credentials.set_api_key(&provider, key);
            }
            if let Some(url) = settings.base_url {
                config.credentials.set_base_url(&provider, url);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment variables read through `env`.
    pub fn apply_env(mut self, env: impl Fn(&str) -> Option<String>) -> Result<Self, RoamError> {
        for (var, provider) in API_KEY_ENV {
            if let Some(key) = env(var).filter(|v| !v.is_empty()) {
                self.credentials.set_api_key(provider, key);
            }
        }
        for (var, provider) in BASE_URL_ENV {
            if let Some(url) = env(var).filter(|v| !v.is_empty()) {
                self.credentials.set_base_url(provider, url);
            }
        }

        if let Some(model) = env("ROAM_MODEL") {
            self.model = model;
        }
        if let Some(raw) = env("ROAM_TEMPERATURE") {
            self.temperature = parse_env("ROAM_TEMPERATURE", &raw)?;
        }
        if let Some(raw) = env("ROAM_MAX_TOKENS") {
            self.max_tokens = Some(parse_env("ROAM_MAX_TOKENS", &raw)?);
        }
        if let Some(raw) = env("ROAM_MAX_ITERATIONS") {
            self.max_iterations = parse_env("ROAM_MAX_ITERATIONS", &raw)?;
        }
        if let Some(raw) = env("ROAM_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_env("ROAM_REQUEST_TIMEOUT_SECS", &raw)?;
        }
        if let Some(host) = env("HOST") {
            self.server.host = host;
        }
        if let Some(raw) = env("PORT") {
            self.server.port = parse_env("PORT", &raw)?;
        }
        if let Some(raw) = env("ALLOWED_ORIGINS") {
            self.server.allowed_origins = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), RoamError> {
        if self.max_iterations == 0 {
            return Err(RoamError::Configuration(
                "max_iterations must be at least 1".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(RoamError::Configuration(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(RoamError::Configuration(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(var: &str, raw: &str) -> Result<T, RoamError>
where
    T::Err: fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| RoamError::Configuration(format!("{var}={raw:?} is invalid: {e}")))
}

/// `config.toml` under the platform config directory for roam.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "roam")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
