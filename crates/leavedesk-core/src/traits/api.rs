//! Remote API trait.

use async_trait::async_trait;

use crate::types::{ApiRequest, ApiResponse, LoginResponse};
use crate::{AccessToken, Credentials, RefreshToken, Result};

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/api/login/";

/// Path of the token refresh endpoint.
pub const REFRESH_PATH: &str = "/api/token/refresh/";

/// The remote LeaveDesk API as seen by the session client.
///
/// Two documented token endpoints plus a pass-through for every other
/// request. Implementations do no token bookkeeping of their own.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token pair.
    ///
    /// Fails with [`AuthError::Rejected`](crate::error::AuthError::Rejected)
    /// on any non-success status.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// Exchange a refresh token for a new access token.
    ///
    /// Fails with
    /// [`AuthError::RefreshFailed`](crate::error::AuthError::RefreshFailed)
    /// on any non-success status.
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<AccessToken>;

    /// Send `request` with `token` as its bearer credential.
    ///
    /// Non-success statuses are returned as responses, not errors; only
    /// transport failures are errors here.
    async fn send(&self, request: &ApiRequest, token: &AccessToken) -> Result<ApiResponse>;
}
