//! Configuration service implementation.
//!
//! Loads [`SpeckleConfig`] from `config.toml` and caches it.

use crate::paths::SpecklePaths;
use speckle_core::config::SpeckleConfig;
use speckle_core::{Result, SpeckleError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the node configuration.
///
/// A missing file yields the defaults. A file that exists but cannot be parsed
/// is an error; silently ignoring a broken config hides typos.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<SpeckleConfig>>>,
}

impl ConfigService {
    /// Creates a service for the default config file location.
    pub fn new_default() -> Result<Self> {
        let path = SpecklePaths::config_file().map_err(|e| SpeckleError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service for a custom path (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<SpeckleConfig> {
        if let Ok(read_lock) = self.config.read()
            && let Some(ref cached) = *read_lock
        {
            return Ok(cached.clone());
        }

        let loaded = Self::load(&self.path)?;

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Returns the path of the config file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<SpeckleConfig> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(SpeckleConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: SpeckleConfig = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}
