//! Route guard: protected content requires a stored token.
//!
//! Only presence is checked. Expiry is discovered by the next 401.

use crate::error::StorageError;
use crate::notify::Route;
use crate::storage::TokenStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Render protected content; carries the stored token
    Granted(String),
    /// Send the user elsewhere first
    Redirect(Route),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted(_))
    }
}

pub struct RouteGuard;

impl RouteGuard {
    pub fn check(tokens: &TokenStore) -> Result<Access, StorageError> {
        Ok(match tokens.token()? {
            Some(token) => Access::Granted(token),
            None => Access::Redirect(Route::Login),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn missing_token_redirects_to_login() {
        let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(RouteGuard::check(&tokens).unwrap(), Access::Redirect(Route::Login));
    }

    #[test]
    fn stored_token_grants_access() {
        let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
        tokens.save("abc").unwrap();
        let access = RouteGuard::check(&tokens).unwrap();
        assert!(access.is_granted());
        assert_eq!(access, Access::Granted("abc".into()));
    }
}
