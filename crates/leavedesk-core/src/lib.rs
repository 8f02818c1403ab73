//! leavedesk-core - Core types and traits for the LeaveDesk API client.
//!
//! The session client itself lives in `leavedesk-http`; this crate holds
//! everything it is generic over: the [`AuthApi`] seam to the remote server,
//! the [`SessionStore`] the token pair is persisted in, and the error
//! taxonomy every operation reports through.

pub mod credentials;
pub mod error;
pub mod memory;
pub mod models;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use memory::MemoryStore;
pub use tokens::{AccessToken, RefreshToken};
pub use traits::{AuthApi, SessionStore, TokenKey};
pub use types::{ApiRequest, ApiResponse, BaseUrl, LoginResponse, Method};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
