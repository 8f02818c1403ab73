//! Session store trait.

use std::fmt;

use crate::{AccessToken, RefreshToken, Result};

/// Key of a persisted session entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    Access,
    Refresh,
}

impl TokenKey {
    /// The literal key the entry is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKey::Access => "access",
            TokenKey::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable key-value storage for the session's token pair.
///
/// Holds at most one session. Implementations must be safe to share between
/// concurrent requests; each call is individually atomic.
pub trait SessionStore: Send + Sync {
    /// Read an entry.
    fn get(&self, key: TokenKey) -> Result<Option<String>>;

    /// Write an entry, replacing any previous value.
    fn set(&self, key: TokenKey, value: &str) -> Result<()>;

    /// Delete a single entry.
    fn remove(&self, key: TokenKey) -> Result<()>;

    /// Delete every entry.
    fn clear(&self) -> Result<()>;

    /// The stored access token, if any.
    fn access_token(&self) -> Result<Option<AccessToken>> {
        Ok(self.get(TokenKey::Access)?.map(AccessToken::new))
    }

    /// The stored refresh token, if any.
    fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        Ok(self.get(TokenKey::Refresh)?.map(RefreshToken::new))
    }

    /// Replace both entries.
    fn save(&self, access: &AccessToken, refresh: &RefreshToken) -> Result<()> {
        self.set(TokenKey::Access, access.as_str())?;
        self.set(TokenKey::Refresh, refresh.as_str())
    }
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn get(&self, key: TokenKey) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: TokenKey, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: TokenKey) -> Result<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }

    fn save(&self, access: &AccessToken, refresh: &RefreshToken) -> Result<()> {
        (**self).save(access, refresh)
    }
}
