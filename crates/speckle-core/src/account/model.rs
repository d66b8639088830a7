//! Account and session domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An account record kept in the local account store.
///
/// Each record pairs a Speckle server endpoint with the API token issued to
/// the user on that server. At most one record is expected to carry
/// `is_default = true`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Email the account is registered with
    pub email: String,
    /// Human-readable server name (e.g., "Speckle Hestia")
    pub server_name: String,
    /// REST API base URL (e.g., `https://hestia.speckle.works/api/v1`)
    pub rest_api: String,
    /// Bearer token for the REST API
    pub token: String,
    /// Whether this is the default account
    #[serde(default)]
    pub is_default: bool,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("email", &self.email)
            .field("server_name", &self.server_name)
            .field("rest_api", &self.rest_api)
            .field("token", &"<redacted>")
            .field("is_default", &self.is_default)
            .finish()
    }
}

/// Resolved credentials and endpoint used for a listing request.
///
/// A session is owned by exactly one node. It is rebuilt on every interactive
/// account selection and restored verbatim when a node is recreated from its
/// saved state.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub auth_token: String,
    pub endpoint_url: String,
    pub account_email: String,
    pub server_name: String,
}

impl From<Account> for Session {
    fn from(account: Account) -> Self {
        Self {
            auth_token: account.token,
            endpoint_url: account.rest_api,
            account_email: account.email,
            server_name: account.server_name,
        }
    }
}

// Tokens never reach logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("auth_token", &"<redacted>")
            .field("endpoint_url", &self.endpoint_url)
            .field("account_email", &self.account_email)
            .field("server_name", &self.server_name)
            .finish()
    }
}
