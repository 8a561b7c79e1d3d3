//! In-memory user record store.
//!
//! The store owns an insertion-ordered collection of records plus the
//! monotonic identifier counter. It holds no locking itself; callers that
//! share it across threads wrap it in their own mutual exclusion (the HTTP
//! adapter uses an `RwLock` inside its state bundle).

use thiserror::Error;

use crate::domain::user::{User, UserDraft, UserId};

/// Failures the store can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("no user with id {0}")]
    NotFound(UserId),
}

/// Optional search criteria over the stored records.
///
/// Blank criteria are normalised to absent, matching how HTML forms submit
/// untouched query inputs. Both present criteria must match (AND).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    name: Option<String>,
    email: Option<String>,
}

impl SearchQuery {
    /// Build a query, folding lowercase and dropping blank criteria.
    pub fn new(name: Option<&str>, email: Option<&str>) -> Self {
        let normalise = |raw: Option<&str>| {
            raw.map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_lowercase)
        };
        Self {
            name: normalise(name),
            email: normalise(email),
        }
    }

    /// True when no criterion was provided, so every record matches.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    fn matches(&self, user: &User) -> bool {
        let name_matches = self
            .name
            .as_deref()
            .is_none_or(|needle| user.full_name().to_lowercase().contains(needle));
        let email_matches = self
            .email
            .as_deref()
            .is_none_or(|needle| user.email.to_lowercase().contains(needle));
        name_matches && email_matches
    }
}

/// Insertion-ordered in-memory record store.
#[derive(Debug)]
pub struct UserStore {
    users: Vec<User>,
    next_id: u64,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    /// Create an empty store; the first assigned identifier is 1.
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
        }
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[User] {
        &self.users
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True when no records are stored.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Look up a record by identifier.
    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Insert a validated draft under a fresh identifier and return it.
    ///
    /// Identifiers come from a counter that only ever advances, so deleting
    /// a record never frees its id for reuse.
    pub fn add(&mut self, draft: UserDraft) -> UserId {
        let id = UserId::new(self.next_id);
        self.next_id += 1;
        self.users.push(User::from_draft(id, draft));
        id
    }

    /// Replace every mutable field of the record with the given id.
    ///
    /// The identifier itself is untouched. Updating an absent id reports
    /// [`StoreError::NotFound`] and changes nothing.
    pub fn update(&mut self, id: UserId, draft: UserDraft) -> Result<(), StoreError> {
        let user = self
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *user = User::from_draft(id, draft);
        Ok(())
    }

    /// Remove the record with the given id. Absent ids are a no-op.
    pub fn delete(&mut self, id: UserId) {
        self.users.retain(|user| user.id != id);
    }

    /// Records matching the query, in insertion order. Read-only.
    pub fn search(&self, query: &SearchQuery) -> Vec<&User> {
        self.users.iter().filter(|user| query.matches(user)).collect()
    }
}
