//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.echochat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The API key is deliberately not validated here: a missing key resolves
//! to an empty string and shows up as an authentication failure from the
//! remote service.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::api::retry::{DEFAULT_INITIAL_DELAY_MS, DEFAULT_RETRIES};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EchoChatConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RetryConfig {
    pub max_retries: Option<u32>,
    pub initial_delay_ms: Option<u64>,
}

pub const DEFAULT_BASE_URL: &str = "https://api.echogpt.live/v1";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_key: String,
    pub base_url: String,
    pub max_retries: u32,
    pub initial_delay_ms: u64,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.echochat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".echochat").join("config.toml"))
}

/// Load config from `~/.echochat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `EchoChatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<EchoChatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(EchoChatConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(EchoChatConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: EchoChatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# EchoChat Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# api_key = "ek-..."                         # Or set ECHOGPT_API_KEY env var
# base_url = "https://api.echogpt.live/v1"   # Or ECHOGPT_BASE_URL / --base-url

# [retry]
# max_retries = 5          # Retry budget for rate-limited (HTTP 429) requests
# initial_delay_ms = 1000  # First backoff delay; doubles on each retry
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env
/// vars → CLI. `cli_base_url` is the `--base-url` flag (None = not given).
pub fn resolve(config: &EchoChatConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    // API key: env → config → empty (absence surfaces as an auth failure)
    let api_key = std::env::var("ECHOGPT_API_KEY")
        .ok()
        .or_else(|| config.api.api_key.clone())
        .unwrap_or_default();

    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("ECHOGPT_BASE_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    ResolvedConfig {
        api_key,
        base_url,
        max_retries: config.retry.max_retries.unwrap_or(DEFAULT_RETRIES),
        initial_delay_ms: config
            .retry
            .initial_delay_ms
            .unwrap_or(DEFAULT_INITIAL_DELAY_MS),
    }
}
