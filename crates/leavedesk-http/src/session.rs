//! Session client: token lifecycle and authenticated requests.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use leavedesk_core::error::{ApiError, AuthError};
use leavedesk_core::{
    AccessToken, ApiRequest, AuthApi, Credentials, LoginResponse, Result, SessionStore, TokenKey,
};

use crate::api::HttpApi;
use crate::config::ClientConfig;

/// A client holding at most one login session.
///
/// Every request goes out with the stored access token. When the server
/// answers 401 the client exchanges the refresh token for a new access
/// token and retries the request once; callers never see token expiry
/// unless the refresh itself is rejected.
///
/// # Thread Safety
///
/// Clients are cheap to clone (they use internal `Arc`) and are safe to
/// share across tasks. Concurrent requests that hit 401 together share a
/// single refresh.
pub struct SessionClient<A, S> {
    inner: Arc<ClientInner<A, S>>,
}

struct ClientInner<A, S> {
    api: A,
    store: S,
    refresh_lock: Mutex<()>,
}

impl<S: SessionStore> SessionClient<HttpApi, S> {
    /// Create a client that talks HTTP according to `config`.
    pub fn connect(config: &ClientConfig, store: S) -> Result<Self> {
        Ok(Self::new(HttpApi::new(config)?, store))
    }
}

impl<A: AuthApi, S: SessionStore> SessionClient<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                api,
                store,
                refresh_lock: Mutex::new(()),
            }),
        }
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// Log in and persist the returned token pair, replacing any prior session.
    ///
    /// On failure the stored session is left untouched.
    ///
    /// # Errors
    ///
    /// [`AuthError::Rejected`] if the server refuses the credentials.
    #[instrument(skip(self, credentials), fields(identifier = %credentials.identifier()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        info!("Logging in");

        let response = self.inner.api.login(credentials).await?;

        let _guard = self.inner.refresh_lock.lock().await;
        self.inner
            .store
            .save(&response.access_token(), &response.refresh_token())?;

        debug!("Session stored");
        Ok(response)
    }

    /// Drop the stored session.
    ///
    /// Waits for an in-flight refresh so its token cannot outlive the logout.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        info!("Logging out");
        let _guard = self.inner.refresh_lock.lock().await;
        self.inner.store.clear()
    }

    /// Returns true if an access token is stored.
    pub fn has_session(&self) -> Result<bool> {
        Ok(self.inner.store.get(TokenKey::Access)?.is_some())
    }

    /// Send `request` with the stored access token and decode the JSON reply.
    ///
    /// A 401 triggers at most one refresh followed by one retry. An empty
    /// success body decodes as `null`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NoSession`] if no access token is stored (nothing is
    ///   sent), or if a refresh is needed and no refresh token is stored.
    /// - [`AuthError::RefreshFailed`] if the refresh endpoint rejects the
    ///   refresh token; stored tokens are left as they were.
    /// - [`ApiError`] for any other non-success status, including a second
    ///   401 after a successful refresh.
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    pub async fn fetch_with_auth<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        let mut token = self
            .inner
            .store
            .access_token()?
            .ok_or(AuthError::NoSession)?;
        let mut refreshed = false;

        loop {
            let response = self.inner.api.send(request, &token).await?;

            if response.is_unauthorized() && !refreshed {
                debug!("Access token rejected");
                token = self.refresh_after(&token).await?;
                refreshed = true;
                continue;
            }

            if !response.is_success() {
                if response.is_unauthorized() {
                    warn!("Request still unauthorized after refresh");
                }
                return Err(ApiError::new(response.status, response.body).into());
            }

            return response.json();
        }
    }

    /// [`fetch_with_auth`](Self::fetch_with_auth) into an untyped JSON value.
    pub async fn fetch_json(&self, request: &ApiRequest) -> Result<serde_json::Value> {
        self.fetch_with_auth(request).await
    }

    /// Obtain an access token newer than `stale`.
    ///
    /// Serialized on `refresh_lock`, which `login` and `logout` also hold: a
    /// caller that waited while another request refreshed picks up that
    /// token instead of refreshing again.
    async fn refresh_after(&self, stale: &AccessToken) -> Result<AccessToken> {
        let _guard = self.inner.refresh_lock.lock().await;

        if let Some(current) = self.inner.store.access_token()? {
            if &current != stale {
                debug!("Using token from concurrent refresh");
                return Ok(current);
            }
        }

        let refresh_token = self
            .inner
            .store
            .refresh_token()?
            .ok_or(AuthError::NoSession)?;

        info!("Refreshing access token");
        let access = self.inner.api.refresh(&refresh_token).await?;

        // Another process sharing the store may have replaced the session.
        if self.inner.store.refresh_token()?.as_ref() != Some(&refresh_token) {
            warn!("Session changed during refresh, discarding token");
            return Err(AuthError::NoSession.into());
        }
        self.inner.store.set(TokenKey::Access, access.as_str())?;

        debug!("Access token refreshed");
        Ok(access)
    }
}

impl<A, S> Clone for SessionClient<A, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, S> std::fmt::Debug for SessionClient<A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
