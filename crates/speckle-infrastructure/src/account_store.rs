//! JSON-file account store.
//!
//! Reads accounts from `~/.config/speckle/accounts.json`:
//!
//! ```json
//! {
//!   "accounts": [
//!     {
//!       "email": "ada@example.com",
//!       "server_name": "Hestia",
//!       "rest_api": "https://hestia.speckle.works/api/v1",
//!       "token": "...",
//!       "is_default": true
//!     }
//!   ]
//! }
//! ```

use crate::paths::SpecklePaths;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use speckle_core::account::{Account, AccountStore};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct AccountsFile {
    #[serde(default)]
    accounts: Vec<Account>,
}

/// Account store backed by a JSON file.
///
/// Read-only: the file is written by sign-in tooling, not by the node.
/// A missing file is an empty store, not an error.
#[derive(Debug, Clone)]
pub struct JsonAccountStore {
    path: PathBuf,
}

impl JsonAccountStore {
    /// Creates a store for the default accounts file.
    pub fn new_default() -> Result<Self> {
        let path = SpecklePaths::accounts_file()?;
        Ok(Self { path })
    }

    /// Creates a store with a custom path (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the accounts file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<AccountsFile> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AccountsFile::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }
}

#[async_trait]
impl AccountStore for JsonAccountStore {
    async fn default_account(&self) -> Result<Option<Account>> {
        let file = self.load().await?;
        Ok(file.accounts.into_iter().find(|a| a.is_default))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.load().await?.accounts)
    }
}
