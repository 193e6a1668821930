use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, instrument, trace};

/// Which store backs the bookmark repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Sqlite,
    Memory,
}

impl FromStr for StorageKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StorageKind::Sqlite),
            "memory" => Ok(StorageKind::Memory),
            other => Err(DomainError::Other(format!(
                "Unknown storage '{}', expected 'sqlite' or 'memory'",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Sqlite => write!(f, "sqlite"),
            StorageKind::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_url: String,

    /// Socket address the HTTP server listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Path prefix for the bookmark routes
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    #[serde(default)]
    pub storage: StorageKind,

    /// Maximum number of pooled SQLite connections
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

fn default_db_path() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("../db"))
        .join(".config/bookmarks-api/bookmarks.db")
        .to_string_lossy()
        .into_owned()
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_pool_size() -> u32 {
    crate::infrastructure::repositories::sqlite::connection::DEFAULT_POOL_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_url: default_db_path(),
            bind_addr: default_bind_addr(),
            api_prefix: default_api_prefix(),
            storage: StorageKind::default(),
            pool_size: default_pool_size(),
        }
    }
}

/// Normalise a route prefix: leading '/', no trailing '/', empty for the root
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

fn implicit_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config/bookmarks-api/config.toml"))
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    let config_text = std::fs::read_to_string(path)
        .map_err(|e| DomainError::Io(e).context(format!("read config {}", path.display())))?;
    toml::from_str::<Settings>(&config_text).map_err(|e| {
        DomainError::Other(format!("Invalid config file {}: {}", path.display(), e))
    })
}

// Load settings from config files and environment variables
#[instrument(level = "debug")]
pub fn load_settings(config_path: Option<&Path>) -> DomainResult<Settings> {
    load_settings_from(config_path, implicit_config_path().as_deref())
}

fn load_settings_from(explicit: Option<&Path>, implicit: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match (explicit, implicit) {
        (Some(path), _) => {
            trace!("Loading config from: {:?}", path);
            read_config_file(path)?
        }
        (None, Some(path)) if path.exists() => {
            trace!("Loading config from: {:?}", path);
            read_config_file(path)?
        }
        (None, implicit) => {
            debug!("No config file found at {:?}, using defaults", implicit);
            Settings::default()
        }
    };

    // Override with environment variables
    if let Ok(db_url) = std::env::var("BOOKMARKS_DB_URL") {
        trace!("Using BOOKMARKS_DB_URL from environment: {}", db_url);
        settings.db_url = db_url;
    }

    if let Ok(bind_addr) = std::env::var("BOOKMARKS_BIND_ADDR") {
        trace!("Using BOOKMARKS_BIND_ADDR from environment: {}", bind_addr);
        settings.bind_addr = bind_addr;
    }

    if let Ok(prefix) = std::env::var("BOOKMARKS_API_PREFIX") {
        trace!("Using BOOKMARKS_API_PREFIX from environment: {}", prefix);
        settings.api_prefix = prefix;
    }

    if let Ok(storage) = std::env::var("BOOKMARKS_STORAGE") {
        trace!("Using BOOKMARKS_STORAGE from environment: {}", storage);
        settings.storage = storage.parse()?;
    }

    if let Ok(pool_size) = std::env::var("BOOKMARKS_POOL_SIZE") {
        trace!("Using BOOKMARKS_POOL_SIZE from environment: {}", pool_size);
        settings.pool_size = pool_size.trim().parse().map_err(|_| {
            DomainError::Other(format!("Invalid BOOKMARKS_POOL_SIZE '{}'", pool_size))
        })?;
    }

    settings.api_prefix = normalize_prefix(&settings.api_prefix);

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_config(settings: &Settings) -> String {
    toml::to_string_pretty(settings)
        .unwrap_or_else(|_| "# Error generating configuration".to_string())
}
