//! Secure token storage using the system keyring.
//!
//! Keeps the bearer token in the platform's native credential storage:
//! - Linux: Secret Service (GNOME Keyring, `KWallet`)
//! - macOS: Keychain
//! - Windows: Credential Manager

use keyring::Entry;
use planner_client::{StoreError, TokenStore};
use tracing::{debug, warn};

/// Service name used for keyring entries.
pub const SERVICE_NAME: &str = "planner";

/// Key the bearer token is stored under.
pub const TOKEN_KEY: &str = "planner.jwt";

/// Error type for credential operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Failed to access keyring.
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl From<CredentialError> for StoreError {
    fn from(err: CredentialError) -> Self {
        Self::new(err)
    }
}

/// Result type for credential operations.
pub type CredentialResult<T> = std::result::Result<T, CredentialError>;

/// Token store backed by one keyring entry.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service: String,
    key: String,
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new(SERVICE_NAME, TOKEN_KEY)
    }
}

impl KeyringTokenStore {
    /// Creates a store for a custom service and key.
    #[must_use]
    pub fn new(service: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            key: key.into(),
        }
    }

    fn entry(&self) -> CredentialResult<Entry> {
        Ok(Entry::new(&self.service, &self.key)?)
    }

    /// Reads the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the keyring operation fails.
    pub fn get_token(&self) -> CredentialResult<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => {
                debug!("No token found under {}", self.key);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Stores the token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the keyring operation fails.
    pub fn store_token(&self, token: &str) -> CredentialResult<()> {
        self.entry()?.set_password(token)?;
        debug!("Stored token under {}", self.key);
        Ok(())
    }

    /// Deletes the token. A missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the keyring operation fails (except for missing entries).
    pub fn delete_token(&self) -> CredentialResult<()> {
        match self.entry()?.delete_credential() {
            Ok(()) => {
                debug!("Deleted token under {}", self.key);
                Ok(())
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No token to delete under {}", self.key);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to delete token: {e}");
                Err(e.into())
            }
        }
    }
}

impl TokenStore for KeyringTokenStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.get_token()?)
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        Ok(self.store_token(token)?)
    }

    fn clear(&self) -> Result<(), StoreError> {
        Ok(self.delete_token()?)
    }
}
