//! Shared HTTP adapter state.
//!
//! Handlers receive the store through `actix_web::web::Data`, never a
//! process-wide singleton, so tests can build an isolated state per case.
//! The lock exists because actix-web dispatches handlers across worker
//! threads; the store itself is unsynchronised.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{Error, UserStore};

/// Dependency bundle for HTTP handlers.
#[derive(Debug, Default)]
pub struct HttpState {
    store: RwLock<UserStore>,
}

impl HttpState {
    /// State holding an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// State wrapping a pre-populated store, used by tests.
    pub fn with_store(store: UserStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    /// Acquire the store for reading.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, UserStore>, Error> {
        self.store
            .read()
            .map_err(|_| Error::internal("user store lock poisoned"))
    }

    /// Acquire the store for mutation.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, UserStore>, Error> {
        self.store
            .write()
            .map_err(|_| Error::internal("user store lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserDraft, UserId};

    #[test]
    fn fresh_state_assigns_one_as_the_first_identifier() {
        let state = HttpState::new();
        let id = state.write().expect("store writable").add(UserDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            age: None,
            bio: None,
        });
        assert_eq!(id, UserId::new(1));
    }
}
