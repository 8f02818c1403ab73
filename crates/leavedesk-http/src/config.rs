//! Client configuration.

use std::time::Duration;

use leavedesk_core::error::InvalidInputError;
use leavedesk_core::{BaseUrl, Result};

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "LEAVEDESK_API_BASE_URL";

/// Environment variable holding an optional request timeout in seconds.
pub const TIMEOUT_ENV: &str = "LEAVEDESK_API_TIMEOUT_SECS";

/// Settings for [`HttpApi`](crate::HttpApi).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every request path is appended to.
    pub base_url: BaseUrl,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Per-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(BaseUrl::default())
    }
}

impl ClientConfig {
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            user_agent: concat!("leavedesk/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// Unset or empty variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let set = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = match set(BASE_URL_ENV) {
            Some(url) => BaseUrl::new(url.trim())?,
            None => BaseUrl::default(),
        };

        let timeout = match set(TIMEOUT_ENV) {
            Some(secs) => {
                let secs: u64 = secs.trim().parse().map_err(|_| InvalidInputError::Other {
                    message: format!(
                        "{} must be a whole number of seconds, got '{}'",
                        TIMEOUT_ENV, secs
                    ),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            timeout,
            ..Self::new(base_url)
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_local_server_without_timeout() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url.join("/api/login/"), "http://localhost:8000/api/login/");
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("leavedesk/"));
    }

    #[test]
    fn reads_base_url_and_timeout() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://hr.example.com"),
            (TIMEOUT_ENV, "15"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.host(), Some("hr.example.com"));
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn accepts_plain_http_service_names() {
        let config =
            ClientConfig::from_lookup(lookup(&[(BASE_URL_ENV, "http://backend:8000")])).unwrap();
        assert_eq!(config.base_url.host(), Some("backend"));
    }

    #[test]
    fn empty_values_are_unset() {
        let config =
            ClientConfig::from_lookup(lookup(&[(BASE_URL_ENV, ""), (TIMEOUT_ENV, " ")])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ClientConfig::from_lookup(lookup(&[(BASE_URL_ENV, "hr.example.com")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")])).is_err());
    }
}
