//! Interactive account selection.

use super::model::Account;

/// Interactive account selection surface (the sign-in dialog).
///
/// `pick` blocks until the user closes the selection and must only be called
/// from the UI-affinity context; see [`crate::dispatch::UiDispatcher`].
pub trait AccountPicker: Send + Sync {
    /// Shows the candidates and returns the chosen account, or `None` when the
    /// user dismissed the selection.
    fn pick(&self, accounts: &[Account]) -> Option<Account>;
}
