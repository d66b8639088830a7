//! Session resolution.
//!
//! Decides which account a node talks to: a session restored with the node,
//! the stored default account, or one picked interactively.

use speckle_core::account::{Account, AccountPicker, AccountStore, Session};
use speckle_core::dispatch::{UiDispatcher, run_on_ui};
use speckle_core::{Result, SpeckleError};
use std::sync::Arc;

/// Message attached to the node when no account could be resolved.
pub const ACCOUNT_SELECTION_FAILED: &str = "Account selection failed";

/// Resolves the session a node lists streams with.
#[derive(Clone)]
pub struct SessionResolver {
    store: Arc<dyn AccountStore>,
    picker: Arc<dyn AccountPicker>,
    ui: Arc<dyn UiDispatcher>,
}

impl SessionResolver {
    pub fn new(
        store: Arc<dyn AccountStore>,
        picker: Arc<dyn AccountPicker>,
        ui: Arc<dyn UiDispatcher>,
    ) -> Self {
        Self { store, picker, ui }
    }

    /// Resolves a session.
    ///
    /// An `existing` session (a node reattached from saved state) is returned
    /// as-is without touching the store or the picker. Otherwise the default
    /// account is used, falling back to the interactive picker, which runs on
    /// the UI context while this task waits.
    ///
    /// # Errors
    ///
    /// [`SpeckleError::AuthFailure`] when the picker is dismissed or the UI
    /// context is gone. Store failures are never returned.
    pub async fn resolve(&self, existing: Option<Session>) -> Result<Session> {
        if let Some(session) = existing {
            tracing::debug!(server = %session.server_name, "Reusing bound session");
            return Ok(session);
        }

        if let Some(account) = self.default_account().await {
            tracing::debug!(email = %account.email, "Using default account");
            return Ok(account.into());
        }

        let candidates = match self.store.list_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::debug!(error = %e, "Could not list stored accounts");
                Vec::new()
            }
        };

        let picker = self.picker.clone();
        let picked = run_on_ui(self.ui.as_ref(), move || picker.pick(&candidates))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Account picker could not be shown");
                SpeckleError::auth_failure(ACCOUNT_SELECTION_FAILED)
            })?;

        match picked {
            Some(account) => {
                tracing::debug!(email = %account.email, "Account picked interactively");
                Ok(account.into())
            }
            None => Err(SpeckleError::auth_failure(ACCOUNT_SELECTION_FAILED)),
        }
    }

    /// Reads the default account; a failing store counts as "no default".
    async fn default_account(&self) -> Option<Account> {
        match self.store.default_account().await {
            Ok(account) => account,
            Err(e) => {
                tracing::debug!(error = %e, "Default account lookup failed, treating as unset");
                None
            }
        }
    }
}
