//! Validated and wire-level value types.

mod base_url;
mod login;
mod request;

pub use base_url::{BaseUrl, DEFAULT_BASE_URL};
pub use login::{LoginResponse, RefreshRequest, RefreshResponse};
pub use request::{ApiRequest, ApiResponse, AUTHORIZATION, CONTENT_TYPE, Method};
