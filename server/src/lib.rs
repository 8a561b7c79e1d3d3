//! Roster: a server-rendered user-directory service.
//!
//! The domain layer holds the validator and the in-memory record store;
//! the HTTP adapter renders the directory pages and maps form submissions
//! onto store mutations.

pub mod domain;
pub mod inbound;
pub mod middleware;

pub use middleware::Trace;
