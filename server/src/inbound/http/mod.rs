//! HTTP inbound adapter rendering the user directory.

pub mod error;
pub mod health;
pub mod state;
pub mod users;
pub mod views;

pub use error::ApiResult;
