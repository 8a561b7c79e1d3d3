//! Domain primitives and the record workflow.
//!
//! Purpose: keep the validator, the record store, and their types free of
//! any transport concern. Inbound adapters convert request payloads into
//! [`UserInput`], run [`validate`], and apply the resulting draft to a
//! [`UserStore`] they own.

pub mod error;
pub mod store;
pub mod user;
pub mod validation;

pub use self::error::{Error, ErrorCode};
pub use self::store::{SearchQuery, StoreError, UserStore};
pub use self::user::{User, UserDraft, UserId};
pub use self::validation::{FieldError, UserInput, validate};

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::not_found(err.to_string())
                .with_details(serde_json::json!({ "field": "id", "value": id.to_string() })),
        }
    }
}
