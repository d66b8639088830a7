//! Unified path management for Speckle configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/speckle/           # Config directory ($SPECKLE_CONFIG_DIR overrides)
//! ├── config.toml              # Node configuration
//! ├── accounts.json            # Stored accounts and tokens
//! └── nodes/                   # Saved node snapshots
//!     └── <node-id>.json
//! ```

use std::env;
use std::path::PathBuf;

/// Environment variable that replaces the platform config directory.
pub const CONFIG_DIR_ENV: &str = "SPECKLE_CONFIG_DIR";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for speckle.
pub struct SpecklePaths;

impl SpecklePaths {
    /// Returns the speckle configuration directory.
    ///
    /// `$SPECKLE_CONFIG_DIR` wins when set and non-empty; otherwise the
    /// platform config directory (XDG on Linux) with `speckle` appended.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        let override_dir = env::var_os(CONFIG_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::resolve_config_dir(override_dir)
    }

    fn resolve_config_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, PathError> {
        if let Some(dir) = override_dir {
            return Ok(dir);
        }
        dirs::config_dir()
            .map(|dir| dir.join("speckle"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the accounts file.
    ///
    /// # Security Note
    ///
    /// The file holds API tokens in plaintext and should be readable by the
    /// owner only (600 on Unix).
    pub fn accounts_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("accounts.json"))
    }

    /// Returns the directory holding saved node snapshots.
    pub fn nodes_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("nodes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let dir = SpecklePaths::resolve_config_dir(Some(PathBuf::from("/tmp/speckle-test"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/speckle-test"));
    }

    #[test]
    fn test_platform_dir_ends_with_speckle() {
        if let Ok(dir) = SpecklePaths::resolve_config_dir(None) {
            assert!(dir.ends_with("speckle"));
        }
    }

    #[test]
    fn test_files_live_under_config_dir() {
        let Ok(config_dir) = SpecklePaths::config_dir() else {
            return;
        };
        let accounts = SpecklePaths::accounts_file().unwrap();
        assert!(accounts.ends_with("accounts.json"));
        assert!(accounts.starts_with(&config_dir));

        let config = SpecklePaths::config_file().unwrap();
        assert!(config.ends_with("config.toml"));
        assert!(SpecklePaths::nodes_dir().unwrap().starts_with(&config_dir));
    }
}
