//! Core traits for the remote API and session persistence.

mod api;
mod store;

pub use api::{AuthApi, LOGIN_PATH, REFRESH_PATH};
pub use store::{SessionStore, TokenKey};
