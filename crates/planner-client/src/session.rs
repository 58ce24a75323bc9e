//! Bearer token persistence.
//!
//! The client never reaches for global state to find its token. A
//! [`Session`] wrapping some [`TokenStore`] is handed to the
//! [`ApiClient`](crate::ApiClient) at construction time.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Error raised by a token store backend.
#[derive(Debug, thiserror::Error)]
#[error("Token store error: {0}")]
pub struct StoreError(pub String);

impl StoreError {
    /// Wraps any displayable backend error.
    #[must_use]
    pub fn new(err: impl fmt::Display) -> Self {
        Self(err.to_string())
    }
}

/// Persistent storage for a single bearer token.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replaces the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn save(&self, token: &str) -> Result<(), StoreError>;

    /// Removes the stored token. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Process-local token store, useful for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Cheaply clonable handle to the token store in use.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    /// Creates a session backed by `store`.
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates a session from an already shared store.
    #[must_use]
    pub fn from_shared(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Creates a session with an in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// Returns the current token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn token(&self) -> Result<Option<String>, StoreError> {
        self.store.load()
    }

    /// Whether a token is currently stored. Read failures count as "no".
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.store.load(), Ok(Some(_)))
    }

    /// Stores a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save(&self, token: &str) -> Result<(), StoreError> {
        self.store.save(token)
    }

    /// Forgets the token (logout or invalidated session).
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.clear()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated());

        session.save("abc").unwrap();
        assert_eq!(session.token().unwrap().as_deref(), Some("abc"));
        assert!(session.is_authenticated());

        session.clear().unwrap();
        assert_eq!(session.token().unwrap(), None);
    }

    #[test]
    fn test_clear_empty_store_is_ok() {
        let store = MemoryTokenStore::new();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_clones_share_the_store() {
        let session = Session::new(MemoryTokenStore::with_token("t1"));
        let other = session.clone();
        other.clear().unwrap();
        assert!(!session.is_authenticated());
    }
}
