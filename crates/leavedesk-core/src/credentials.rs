//! Login credentials type.

use std::fmt;

use serde::Serialize;

/// Login credentials for the LeaveDesk API.
///
/// The identifier may be an email address or a username; the server decides.
/// No format validation happens client-side.
///
/// # Security
///
/// The secret is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use leavedesk_core::Credentials;
///
/// let creds = Credentials::new("alice@example.com", "hunter2");
/// assert_eq!(creds.identifier(), "alice@example.com");
/// ```
#[derive(Clone)]
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// Returns the identifier (email or username).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the plaintext secret.
    ///
    /// Use this only when constructing the login request body.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Returns the JSON body sent to the login endpoint.
    ///
    /// The server expects the identifier under `username` even when it is
    /// an email address.
    pub fn login_body(&self) -> LoginRequest<'_> {
        LoginRequest {
            username: &self.identifier,
            password: &self.secret,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Request body for the login endpoint.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
