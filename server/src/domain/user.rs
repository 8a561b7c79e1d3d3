//! User record types.

use std::fmt;
use std::num::ParseIntError;

use serde::Serialize;

/// Stable store-assigned user identifier.
///
/// Identifiers grow monotonically and are never reused, even after the
/// record they named is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Access the raw identifier value.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// The mutable field set of a user record.
///
/// A draft only exists once validation has accepted the raw input, so the
/// store can apply it without re-checking. Create inserts a draft under a
/// fresh id; update replaces every field of an existing record with one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: Option<u32>,
    pub bio: Option<String>,
}

/// A stored user record: the draft fields plus the store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: Option<u32>,
    pub bio: Option<String>,
}

impl User {
    /// Combine a draft with its identifier.
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        let UserDraft {
            first_name,
            last_name,
            email,
            age,
            bio,
        } = draft;
        Self {
            id,
            first_name,
            last_name,
            email,
            age,
            bio,
        }
    }

    /// The displayed "first last" name, also the haystack for name search.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
