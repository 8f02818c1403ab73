//! leavedesk-http - HTTP session client for the LeaveDesk API.
//!
//! [`SessionClient`] owns the token lifecycle: it logs in, attaches the
//! access token to every request, and refreshes it once when the server
//! answers 401. [`HttpApi`] is the reqwest transport it talks through.
//!
//! # Example
//!
//! ```no_run
//! use leavedesk_core::{Credentials, MemoryStore};
//! use leavedesk_http::{ClientConfig, SessionClient};
//!
//! # async fn example() -> Result<(), leavedesk_core::Error> {
//! let config = ClientConfig::from_env()?;
//! let client = SessionClient::connect(&config, MemoryStore::new())?;
//!
//! client
//!     .login(&Credentials::new("alice@example.com", "hunter2"))
//!     .await?;
//!
//! for leave in client.leave_applications().await? {
//!     println!("{} {} -> {}", leave.username, leave.start_date, leave.status);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod config;
mod leave;
mod session;

pub use api::HttpApi;
pub use config::{BASE_URL_ENV, ClientConfig, TIMEOUT_ENV};
pub use session::SessionClient;
