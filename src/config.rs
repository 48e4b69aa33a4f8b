//! Configuration for bookshelf paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (BOOKSHELF_HOME, BOOKSHELF_STORE, BOOKSHELF_KEY)
//! 2. Config file (.bookshelf/config.yaml)
//! 3. Defaults (~/.bookshelf/store.json, key "library")
//!
//! Config file discovery:
//! - Searches current directory and parents for .bookshelf/config.yaml
//! - `paths.home` is relative to the .bookshelf directory
//! - `paths.store` is relative to the config file's project root

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::LIBRARY_KEY;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Default store file name inside the home directory
pub const STORE_FILE: &str = "store.json";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Home directory (relative to .bookshelf/)
    pub home: Option<String>,
    /// Store file (relative to project root)
    pub store: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Key the library is saved under
    pub key: Option<String>,
}

/// Values taken from the environment
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub home: Option<PathBuf>,
    pub store: Option<PathBuf>,
    pub key: Option<String>,
}

impl EnvOverrides {
    /// Read BOOKSHELF_* variables
    pub fn from_env() -> Self {
        Self {
            home: std::env::var_os("BOOKSHELF_HOME").map(PathBuf::from),
            store: std::env::var_os("BOOKSHELF_STORE").map(PathBuf::from),
            key: std::env::var("BOOKSHELF_KEY").ok(),
        }
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Bookshelf home directory
    pub home: PathBuf,
    /// Path to the key-value store document
    pub store: PathBuf,
    /// Key the library is stored under
    pub key: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".bookshelf").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to a base directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Combine config file, environment and defaults
fn resolve(
    config: Option<(&Path, &ConfigFile)>,
    env: &EnvOverrides,
    default_home: PathBuf,
) -> ResolvedConfig {
    let (home, store, key) = if let Some((config_path, file)) = config {
        // .bookshelf/ and its parent (the project root)
        let bookshelf_dir = config_path.parent().unwrap_or(Path::new("."));
        let base_dir = bookshelf_dir.parent().unwrap_or(Path::new("."));

        let home = env
            .home
            .clone()
            .or_else(|| {
                file.paths
                    .home
                    .as_deref()
                    .map(|h| resolve_path(bookshelf_dir, h))
            })
            .unwrap_or(default_home);

        let store = env
            .store
            .clone()
            .or_else(|| file.paths.store.as_deref().map(|s| resolve_path(base_dir, s)))
            .unwrap_or_else(|| home.join(STORE_FILE));

        let key = env
            .key
            .clone()
            .or_else(|| file.storage.as_ref().and_then(|s| s.key.clone()))
            .unwrap_or_else(|| LIBRARY_KEY.to_string());

        (home, store, key)
    } else {
        let home = env.home.clone().unwrap_or(default_home);
        let store = env.store.clone().unwrap_or_else(|| home.join(STORE_FILE));
        let key = env.key.clone().unwrap_or_else(|| LIBRARY_KEY.to_string());
        (home, store, key)
    };

    ResolvedConfig {
        home,
        store,
        key,
        config_file: config.map(|(p, _)| p.to_path_buf()),
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".bookshelf");

    let env = EnvOverrides::from_env();

    let resolved = match find_config_file() {
        Some(path) => {
            let file = load_config_file(&path)?;
            resolve(Some((&path, &file)), &env, default_home)
        }
        None => resolve(None, &env, default_home),
    };

    tracing::debug!(store = %resolved.store.display(), key = %resolved.key, "Configuration resolved");
    Ok(resolved)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
