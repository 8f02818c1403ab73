//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// The local development server used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// A validated API base URL.
///
/// Request paths are appended verbatim, so `/api/leave/` against
/// `https://hr.example.com` becomes `https://hr.example.com/api/leave/`.
/// Base URLs must be absolute `http` or `https` URLs with a host.
///
/// # Example
///
/// ```
/// use leavedesk_core::BaseUrl;
///
/// let base = BaseUrl::new("https://hr.example.com/").unwrap();
/// assert_eq!(base.join("/api/login/"), "https://hr.example.com/api/login/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Parse and validate a base URL.
    ///
    /// # Errors
    ///
    /// [`InvalidInputError::BaseUrl`] if `s` is not absolute, has no host,
    /// uses a scheme other than `http` or `https`, or carries a query or
    /// fragment.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: String| InvalidInputError::BaseUrl {
            value: s.to_string(),
            reason,
        };

        let url = Url::parse(s).map_err(|e| invalid(e.to_string()))?;
        check(&url).map_err(|reason| invalid(reason.to_string()))?;
        Ok(Self(url))
    }

    /// Returns the full URL for a request path.
    pub fn join(&self, path: &str) -> String {
        // Url always renders a root path as "/", so trim before appending.
        let base = self.0.as_str().trim_end_matches('/');
        if path.is_empty() || path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

fn check(url: &Url) -> Result<(), &'static str> {
    if url.cannot_be_a_base() {
        return Err("must be an absolute URL");
    }
    if url.host_str().is_none() {
        return Err("must have a host");
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err("must use http or https");
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("must not carry a query or fragment");
    }
    Ok(())
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"))
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let base = BaseUrl::new("https://hr.example.com").unwrap();
        assert_eq!(base.host(), Some("hr.example.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let base = BaseUrl::new("http://127.0.0.1:8000").unwrap();
        assert_eq!(base.join("/api/leave/"), "http://127.0.0.1:8000/api/leave/");
    }

    #[test]
    fn default_is_local_dev_server() {
        assert_eq!(
            BaseUrl::default().join("/api/login/"),
            "http://localhost:8000/api/login/"
        );
    }

    #[test]
    fn normalizes_trailing_slash_in_join() {
        let base = BaseUrl::new("https://hr.example.com/").unwrap();
        assert_eq!(
            base.join("/api/token/refresh/"),
            "https://hr.example.com/api/token/refresh/"
        );
    }

    #[test]
    fn keeps_path_prefix() {
        let base = BaseUrl::new("https://example.com/leave").unwrap();
        assert_eq!(base.join("/api/leave/"), "https://example.com/leave/api/leave/");
        assert_eq!(base.join("api/leave/"), "https://example.com/leave/api/leave/");
    }

    #[test]
    fn accepts_plain_http_on_private_hosts() {
        let compose = BaseUrl::new("http://backend:8000").unwrap();
        assert_eq!(compose.join("/api/leave/"), "http://backend:8000/api/leave/");
        assert!(BaseUrl::new("http://10.0.0.5:8000").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(BaseUrl::new("ftp://hr.example.com").is_err());
        assert!(BaseUrl::new("file:///tmp/api").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(BaseUrl::new("/api/login/").is_err());
    }

    #[test]
    fn rejects_query() {
        assert!(BaseUrl::new("https://hr.example.com/?x=1").is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: BaseUrl = serde_json::from_str("\"https://hr.example.com\"").unwrap();
        assert_eq!(ok.host(), Some("hr.example.com"));
        assert!(serde_json::from_str::<BaseUrl>("\"ftp://hr.example.com\"").is_err());
    }
}
