//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars (`.env` is loaded into the environment first).
//!
//! Config lives at `~/.shelf/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShelfConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub readwise: ReadwiseConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub root_title: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReadwiseConfig {
    pub token: Option<String>,
    pub base_url: Option<String>,
    pub page_size: Option<u32>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ROOT_TITLE: &str = "Books";
pub const DEFAULT_READWISE_BASE_URL: &str = "https://readwise.io/api/v2";
/// Readwise caps `page_size` at 1000.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
pub const MAX_PAGE_SIZE: u32 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const TOKEN_ENV: &str = "READWISE_TOKEN";
pub const BASE_URL_ENV: &str = "READWISE_BASE_URL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub root_title: String,
    pub token: String,
    pub base_url: String,
    pub page_size: u32,
    pub timeout_secs: u64,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// No access token in the config file or the environment.
    MissingToken,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingToken => write!(
                f,
                "no Readwise token found: set {TOKEN_ENV} (environment or .env) or [readwise] token in ~/.shelf/config.toml"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.shelf/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".shelf").join("config.toml"))
}

/// Load config from `~/.shelf/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ShelfConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ShelfConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ShelfConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ShelfConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<ShelfConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ShelfConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // Never log the token.
    debug!(
        "Config: root_title={:?} base_url={:?} page_size={:?} timeout_secs={:?}",
        config.general.root_title,
        config.readwise.base_url,
        config.readwise.page_size,
        config.readwise.timeout_secs
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Shelf Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars (.env is read too).

# [general]
# root_title = "Books"

# [readwise]
# token = "..."                          # Or set READWISE_TOKEN
# base_url = "https://readwise.io/api/v2" # Or set READWISE_BASE_URL
# page_size = 1000                       # Items per list, 1..=1000
# timeout_secs = 30
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

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &ShelfConfig) -> Result<ResolvedConfig, ConfigError> {
    resolve_with(config, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with(
    config: &ShelfConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    // Token: env → config. Blank values count as missing.
    let token = env(TOKEN_ENV)
        .or_else(|| config.readwise.token.clone())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ConfigError::MissingToken)?;

    // Base URL: env → config → default
    let base_url = env(BASE_URL_ENV)
        .or_else(|| config.readwise.base_url.clone())
        .unwrap_or_else(|| DEFAULT_READWISE_BASE_URL.to_string());

    let page_size = match config.readwise.page_size {
        Some(0) => {
            warn!("page_size = 0 is invalid, using {}", DEFAULT_PAGE_SIZE);
            DEFAULT_PAGE_SIZE
        }
        Some(n) if n > MAX_PAGE_SIZE => {
            warn!("page_size = {} exceeds the API limit, clamping to {}", n, MAX_PAGE_SIZE);
            MAX_PAGE_SIZE
        }
        Some(n) => n,
        None => DEFAULT_PAGE_SIZE,
    };

    Ok(ResolvedConfig {
        root_title: config
            .general
            .root_title
            .clone()
            .unwrap_or_else(|| DEFAULT_ROOT_TITLE.to_string()),
        token,
        base_url,
        page_size,
        timeout_secs: config
            .readwise
            .timeout_secs
            .unwrap_or(DEFAULT_TIMEOUT_SECS),
    })
}
