//! Bearer token persistence.
//!
//! Lifecycle: stored on login, attached to every request, removed on
//! logout or on any 401 response.

use std::sync::Arc;

use tracing::{debug, info};

use super::{Config, KeyValueStore, KeyringStore, LocalStore, TokenBackend};
use crate::error::StorageError;

pub const TOKEN_KEY: &str = "access_token";

/// Handle to the stored token. Cheap to clone; clones share the backing store.
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}

impl TokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Pick the backing store named by `auth.token_backend`.
    pub fn from_config(config: &Config) -> Result<Self, StorageError> {
        let store: Arc<dyn KeyValueStore> = match config.auth.token_backend {
            TokenBackend::File => Arc::new(LocalStore::open()?),
            TokenBackend::Keyring => Arc::new(KeyringStore::new()),
        };
        Ok(Self::new(store))
    }

    pub fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .store
            .get(TOKEN_KEY)?
            .filter(|token| !token.trim().is_empty()))
    }

    pub fn save(&self, token: &str) -> Result<(), StorageError> {
        self.store.set(TOKEN_KEY, token)?;
        info!("access token stored");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_KEY)?;
        debug!("access token removed");
        Ok(())
    }

    pub fn is_present(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }
}
