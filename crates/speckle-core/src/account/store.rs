//! Local account store trait.

use super::model::Account;
use anyhow::Result;
use async_trait::async_trait;

/// Read access to the accounts stored on this machine.
///
/// The session resolver only consumes these operations; writing accounts is
/// the job of whatever sign-in tooling populated the store.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Returns the default account.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Account))`: A default account is configured
    /// - `Ok(None)`: No default account is set
    /// - `Err(_)`: The store could not be read
    async fn default_account(&self) -> Result<Option<Account>>;

    /// Lists every stored account, in store order.
    async fn list_accounts(&self) -> Result<Vec<Account>>;
}
