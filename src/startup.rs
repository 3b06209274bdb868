//! # Startup
//!
//! Everything that must succeed before the first frame is drawn: resolving
//! config, building the client, and fetching the book list. Any failure here
//! is fatal and is reported on stderr by `main`.

use std::fmt;
use std::sync::Arc;

use log::{error, info};

use crate::api::{ApiError, HighlightSource, ReadwiseClient};
use crate::core::config::{self, ConfigError, ResolvedConfig};
use crate::core::state::App;

#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    Client(ApiError),
    InitialFetch(ApiError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(e) => write!(f, "failed to load configuration: {e}"),
            StartupError::Client(e) => write!(f, "failed to create API client: {e}"),
            StartupError::InitialFetch(e) => write!(f, "failed to fetch books: {e}"),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<ConfigError> for StartupError {
    fn from(e: ConfigError) -> Self {
        StartupError::Config(e)
    }
}

/// Loads `.env`, the config file and the environment into a `ResolvedConfig`.
pub fn load_config() -> Result<ResolvedConfig, StartupError> {
    match dotenv::dotenv() {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => info!("No .env loaded: {}", e),
    }
    let file_config = config::load_config()?;
    Ok(config::resolve(&file_config)?)
}

/// Builds the Readwise client for `config`.
pub fn build_source(config: &ResolvedConfig) -> Result<Arc<dyn HighlightSource>, StartupError> {
    let client = ReadwiseClient::from_config(config).map_err(StartupError::Client)?;
    info!("Using Readwise API at {}", client.base_url());
    Ok(Arc::new(client))
}

/// Fetches the book list and builds the initial app state.
pub async fn bootstrap(
    source: Arc<dyn HighlightSource>,
    root_title: &str,
) -> Result<App, StartupError> {
    let books = source.fetch_books().await.map_err(|e| {
        error!("Initial book fetch failed: {}", e);
        StartupError::InitialFetch(e)
    })?;
    info!("Starting with {} books", books.len());
    Ok(App::new(source, &books, root_title))
}
