//! # Singleton: configuration manager
//!
//! One process-wide [`ConfigurationManager`], created lazily on first access.
//! Settings start from built-in defaults and are overlaid with a TOML file
//! when `DESIGN_PATTERNS_CONFIG` names one.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use lazy_static::lazy_static;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{info, warn};

pub const CONFIG_ENV_VAR: &str = "DESIGN_PATTERNS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to convert TOML to JSON: {0}")]
    Convert(#[from] serde_json::Error),
}

static INITIALIZATIONS: AtomicUsize = AtomicUsize::new(0);

lazy_static! {
    static ref INSTANCE: ConfigurationManager = ConfigurationManager::load();
}

pub fn default_settings() -> Map<String, Value> {
    let mut settings = Map::new();
    settings.insert("api_key".to_string(), json!("dummy_api_key_123"));
    settings.insert("database_url".to_string(), json!("localhost:5432"));
    settings.insert("feature_flag_x".to_string(), json!(true));
    settings
}

/// Parses `content` as a TOML table and writes its top-level keys over
/// `settings`.
pub fn merge_toml(settings: &mut Map<String, Value>, content: &str) -> Result<(), ConfigError> {
    let table: toml::Table = toml::from_str(content)?;
    if let Value::Object(overrides) = serde_json::to_value(table)? {
        settings.extend(overrides);
    }
    Ok(())
}

pub fn load_settings(path: Option<&Path>) -> Result<Map<String, Value>, ConfigError> {
    let mut settings = default_settings();
    if let Some(path) = path {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        merge_toml(&mut settings, &content)?;
        info!(path = %path.display(), "merged configuration file");
    }
    Ok(settings)
}

#[derive(Debug)]
pub struct ConfigurationManager {
    settings: RwLock<Map<String, Value>>,
}

impl ConfigurationManager {
    /// Every call returns the same instance.
    pub fn instance() -> &'static ConfigurationManager {
        &INSTANCE
    }

    /// How many times the singleton has been built. Stays at 1 once
    /// `instance` has been called.
    pub fn initialization_count() -> usize {
        INITIALIZATIONS.load(Ordering::SeqCst)
    }

    fn load() -> Self {
        INITIALIZATIONS.fetch_add(1, Ordering::SeqCst);
        info!("loading configuration");

        let path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        let settings = load_settings(path.as_deref()).unwrap_or_else(|err| {
            warn!(error = %err, "falling back to default configuration");
            default_settings()
        });

        info!(keys = settings.len(), "configuration loaded");
        Self {
            settings: RwLock::new(settings),
        }
    }

    // A panic while holding the lock cannot leave the map half-written, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Map<String, Value>> {
        self.settings.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Map<String, Value>> {
        self.settings.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_setting(&self, key: &str) -> Option<Value> {
        self.read().get(key).cloned()
    }

    pub fn set_setting(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.write().insert(key.into(), value.into());
    }

    /// A copy; changing it does not affect the manager.
    pub fn all_settings(&self) -> Map<String, Value> {
        self.read().clone()
    }
}
