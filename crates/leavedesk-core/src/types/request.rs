//! Request and response values exchanged with the API.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Result;
use crate::tokens::AccessToken;

/// Always `application/json`; callers cannot override it.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Always the bearer token; callers cannot override it.
pub const AUTHORIZATION: &str = "Authorization";

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request against a path relative to the configured base URL.
///
/// The body is carried pre-serialized. Caller headers are sent as given,
/// except that `Content-Type` and `Authorization` are always the client's.
///
/// # Example
///
/// ```
/// use leavedesk_core::{ApiRequest, Method};
///
/// let request = ApiRequest::post("/api/leave/42/approve/");
/// assert_eq!(request.method(), Method::Post);
/// assert!(request.body().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<String>,
    headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a body that is already serialized.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON body.
    pub fn with_json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_string(value)?;
        Ok(self.with_body(body))
    }

    /// Add a caller header. Repeated names are all sent.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Caller-supplied headers, as given.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The headers actually sent with `token`.
    ///
    /// Caller headers come first; the fixed `Content-Type` and
    /// `Authorization` headers are applied last and win on conflict.
    pub fn outgoing_headers(&self, token: &AccessToken) -> Vec<(String, String)> {
        let mut headers: Vec<(String, String)> = self
            .headers
            .iter()
            .filter(|(name, _)| !is_fixed_header(name))
            .cloned()
            .collect();
        headers.push((CONTENT_TYPE.to_string(), "application/json".to_string()));
        headers.push((AUTHORIZATION.to_string(), token.bearer()));
        headers
    }
}

fn is_fixed_header(name: &str) -> bool {
    name.eq_ignore_ascii_case(CONTENT_TYPE) || name.eq_ignore_ascii_case(AUTHORIZATION)
}

/// Raw status and body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Decode the body as JSON.
    ///
    /// An empty body decodes as `null`, so `()` and `Option<T>` accept
    /// bodiless responses such as 204.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let body = self.body.trim();
        let body = if body.is_empty() { "null" } else { body };
        Ok(serde_json::from_str(body)?)
    }
}
