//! Correction settings, with defaults overridable from the environment.
//!
//! Lookup order for every value:
//! 1. Process environment (after an optional `.env` is loaded)
//! 2. Built-in default
//!
//! There is no config file; the credential is the only persisted state.

use crate::error::config::ConfigError;
use crate::{CHAT_COMPLETIONS_URL, DEFAULT_MODEL};

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::{debug, info, warn};
use url::Url;

pub const ENDPOINT_URL_ENV: &str = "KOREKTOR_ENDPOINT_URL";
pub const MODEL_ENV: &str = "KOREKTOR_MODEL";
pub const TEMPERATURE_ENV: &str = "KOREKTOR_TEMPERATURE";
pub const MAX_TOKENS_ENV: &str = "KOREKTOR_MAX_TOKENS";
pub const CONNECT_TIMEOUT_ENV: &str = "KOREKTOR_CONNECT_TIMEOUT_SECS";
pub const REQUEST_TIMEOUT_ENV: &str = "KOREKTOR_REQUEST_TIMEOUT_SECS";

const DEFAULT_TEMPERATURE: f32 = 0.3;
const DEFAULT_MAX_TOKENS: u32 = 2000;
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const MAX_TEMPERATURE: f32 = 1.0;
const MAX_TOKENS_LIMIT: u32 = 16_384;

/// Parameters of the outbound completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionSettings {
    pub endpoint: Url,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for CorrectionSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

fn default_endpoint() -> Url {
    Url::parse(CHAT_COMPLETIONS_URL).expect("built-in endpoint URL is valid")
}

impl CorrectionSettings {
    /// Settings pointing at a different endpoint, other values default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if `endpoint` is not a valid URL.
    pub fn with_endpoint(endpoint: &str) -> Result<Self, ConfigError> {
        let settings = Self {
            endpoint: parse_value(ENDPOINT_URL_ENV, endpoint)?,
            ..Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Load from the process environment, after trying to load a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Some(path) = try_load_dotenv() {
            info!("Loaded .env from: {}", path.display());
        } else {
            debug!("No .env file found - using process environment only");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// Unset or blank variables fall back to defaults; present but unparseable
    /// values are errors rather than silently ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(raw) = get(ENDPOINT_URL_ENV) {
            settings.endpoint = parse_value(ENDPOINT_URL_ENV, raw.trim())?;
        }
        if let Some(raw) = get(MODEL_ENV) {
            settings.model = raw.trim().to_string();
        }
        if let Some(raw) = get(TEMPERATURE_ENV) {
            settings.temperature = parse_value(TEMPERATURE_ENV, raw.trim())?;
        }
        if let Some(raw) = get(MAX_TOKENS_ENV) {
            settings.max_tokens = parse_value(MAX_TOKENS_ENV, raw.trim())?;
        }
        if let Some(raw) = get(CONNECT_TIMEOUT_ENV) {
            settings.connect_timeout =
                Duration::from_secs(parse_value(CONNECT_TIMEOUT_ENV, raw.trim())?);
        }
        if let Some(raw) = get(REQUEST_TIMEOUT_ENV) {
            settings.request_timeout =
                Duration::from_secs(parse_value(REQUEST_TIMEOUT_ENV, raw.trim())?);
        }

        settings.validate()?;

        debug!(
            "Correction settings: endpoint={}, model={}, temperature={}, max_tokens={}",
            settings.endpoint, settings.model, settings.temperature, settings.max_tokens
        );
        Ok(settings)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid endpoint scheme: {}", self.endpoint),
            });
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "Model cannot be empty".to_string(),
            });
        }

        // Low but non-zero: near-deterministic corrections.
        if !(self.temperature > 0.0 && self.temperature <= MAX_TEMPERATURE) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid temperature: {} (must be in (0.0, {MAX_TEMPERATURE}])",
                    self.temperature
                ),
            });
        }

        if self.max_tokens == 0 || self.max_tokens > MAX_TOKENS_LIMIT {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid max_tokens: {} (must be 1-{MAX_TOKENS_LIMIT})",
                    self.max_tokens
                ),
            });
        }

        if self.connect_timeout.is_zero() || self.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "Timeouts must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

#[track_caller]
fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| {
        warn!("Invalid value for {key}: {e}");
        ConfigError::ParseError {
            location: ErrorLocation::from(Location::caller()),
            key: key.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Attempts to load .env from the working directory, then next to the executable.
fn try_load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        return Some(path);
    }

    let exe_path = env::current_exe().ok()?;
    let env_path = exe_path.parent()?.join(".env");
    if !env_path.exists() {
        return None;
    }

    match dotenvy::from_path(&env_path) {
        Ok(()) => Some(env_path),
        Err(e) => {
            warn!("Failed to parse .env at {}: {}", env_path.display(), e);
            None
        }
    }
}
