//! reqwest-backed implementation of [`AuthApi`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use tracing::{debug, instrument, trace};

use leavedesk_core::error::{AuthError, Error, InvalidInputError, TransportError};
use leavedesk_core::traits::{LOGIN_PATH, REFRESH_PATH};
use leavedesk_core::types::{RefreshRequest, RefreshResponse};
use leavedesk_core::{
    AccessToken, ApiRequest, ApiResponse, AuthApi, BaseUrl, Credentials, LoginResponse, Method,
    RefreshToken, Result,
};

use crate::config::ClientConfig;

/// HTTP client for the LeaveDesk API.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: BaseUrl,
}

impl HttpApi {
    /// Create a client from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport_error)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Returns the base URL this client is configured for.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// POST a JSON body without credentials.
    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let url = self.base_url.join(path);
        debug!(%url, "unauthenticated POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        read_response(response).await
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    #[instrument(skip(self, credentials), fields(base_url = %self.base_url))]
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let response = self.post_json(LOGIN_PATH, &credentials.login_body()).await?;

        if !response.is_success() {
            return Err(AuthError::Rejected {
                status: response.status,
                body: response.body,
            }
            .into());
        }

        response.json()
    }

    #[instrument(skip(self, refresh_token), fields(base_url = %self.base_url))]
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<AccessToken> {
        let request = RefreshRequest {
            refresh: refresh_token.as_str(),
        };
        let response = self.post_json(REFRESH_PATH, &request).await?;

        if !response.is_success() {
            return Err(AuthError::RefreshFailed {
                status: response.status,
                body: response.body,
            }
            .into());
        }

        let refreshed: RefreshResponse = response.json()?;
        Ok(AccessToken::new(refreshed.access))
    }

    #[instrument(skip(self, request, token), fields(method = %request.method(), path = request.path()))]
    async fn send(&self, request: &ApiRequest, token: &AccessToken) -> Result<ApiResponse> {
        let url = self.base_url.join(request.path());
        debug!("authenticated request");

        let mut builder = self
            .client
            .request(reqwest_method(request.method()), &url)
            .headers(header_map(request, token)?);
        if let Some(body) = request.body() {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(transport_error)?;
        read_response(response).await
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn header_map(request: &ApiRequest, token: &AccessToken) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in request.outgoing_headers(token) {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| InvalidInputError::Header {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        // The value error never echoes the value, which may be a token.
        let header_value = HeaderValue::from_str(&value).map_err(|e| InvalidInputError::Header {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        headers.append(header_name, header_value);
    }
    Ok(headers)
}

async fn read_response(response: reqwest::Response) -> Result<ApiResponse> {
    let status = response.status().as_u16();
    let body = response.text().await.map_err(transport_error)?;
    trace!(status, bytes = body.len(), "response");
    Ok(ApiResponse::new(status, body))
}

/// Classify a reqwest failure as a transport error.
fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        TransportError::Timeout {
            message: err.to_string(),
        }
        .into()
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
        .into()
    } else if err.is_decode() {
        Error::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let config = ClientConfig::new(BaseUrl::new("https://hr.example.com").unwrap());
        let api = HttpApi::new(&config).unwrap();
        assert_eq!(api.base_url(), &config.base_url);
    }

    #[test]
    fn header_map_overrides_caller_authorization() {
        let request = ApiRequest::get("/api/leave/")
            .with_header("Authorization", "Bearer forged")
            .with_header("Accept-Language", "en");
        let headers = header_map(&request, &AccessToken::new("real")).unwrap();

        let auth: Vec<_> = headers.get_all("authorization").iter().collect();
        assert_eq!(auth, vec!["Bearer real"]);
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(headers["accept-language"], "en");
    }

    #[test]
    fn header_map_rejects_invalid_names() {
        let request = ApiRequest::get("/api/leave/").with_header("bad header", "x");
        let err = header_map(&request, &AccessToken::new("t")).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Header { .. })
        ));
    }
}
