//! Token endpoint payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tokens::{AccessToken, RefreshToken};

/// Decoded body of a successful login.
///
/// Fields beyond the token pair are kept verbatim in `extra`, so the caller
/// sees the payload exactly as the server sent it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LoginResponse {
    pub fn access_token(&self) -> AccessToken {
        AccessToken::new(self.access.clone())
    }

    pub fn refresh_token(&self) -> RefreshToken {
        RefreshToken::new(self.refresh.clone())
    }
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

/// Request body for the refresh endpoint.
#[derive(Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Decoded body of a successful refresh.
#[derive(Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}
