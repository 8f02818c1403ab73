//! The session's token pair.
//!
//! Both halves are opaque JWT strings issued by the login endpoint. Their
//! `Debug` output shows only the kind of token and its length.

use std::fmt;

macro_rules! session_token {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub fn new(token: impl Into<String>) -> Self {
                Self(token.into())
            }

            /// The raw token string, as sent on the wire.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(<{} bytes>)", stringify!($name), self.0.len())
            }
        }
    };
}

session_token! {
    /// Short-lived credential sent as `Authorization: Bearer <token>`.
    ///
    /// Expiry is never checked locally; a 401 from the server is the only
    /// signal that it has lapsed.
    AccessToken
}

session_token! {
    /// Longer-lived credential exchanged at the refresh endpoint for a new
    /// [`AccessToken`]. Refreshing does not rotate it.
    RefreshToken
}

impl AccessToken {
    /// The `Authorization` header value for this token.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}
