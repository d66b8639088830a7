use anyhow::{Context, Result};
use colored::Colorize;
use speckle_core::account::AccountStore;
use speckle_infrastructure::JsonAccountStore;

/// Prints the accounts stored on this machine.
pub async fn list() -> Result<()> {
    let store = JsonAccountStore::new_default()?;
    let accounts = store
        .list_accounts()
        .await
        .with_context(|| format!("Failed to read accounts from {}", store.path().display()))?;

    if accounts.is_empty() {
        println!("No accounts in {}", store.path().display());
        return Ok(());
    }

    for account in accounts {
        let marker = if account.is_default { "*" } else { " " };
        println!(
            "{} {} {} {}",
            marker.green(),
            account.email.bold(),
            account.server_name,
            account.rest_api.as_str().dimmed()
        );
    }
    Ok(())
}
