//! Error types for the LeaveDesk client.
//!
//! This module provides a unified error type with explicit variants for
//! session, API, transport, decoding, storage, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for LeaveDesk operations.
///
/// Every non-success path of the client surfaces as one of these variants;
/// callers match on them to decide between "log in again", "show the server
/// message", and "try later".
#[derive(Debug, Error)]
pub enum Error {
    /// Session errors (missing tokens, rejected credentials, failed refresh).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A resource endpoint answered with a non-success status.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Network transport errors (connection, timeout, malformed exchange).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A success response whose body was not the expected JSON.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// The session store could not be read or written.
    #[error("session store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation errors (base URL, headers, form fields).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if the caller must log in again to recover.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            Error::Auth(AuthError::NoSession) | Error::Auth(AuthError::RefreshFailed { .. })
        )
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Auth(AuthError::Rejected { status, .. })
            | Error::Auth(AuthError::RefreshFailed { status, .. }) => Some(*status),
            Error::Api(api) => Some(api.status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode {
            message: err.to_string(),
        }
    }
}

/// Session and credential errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No access or refresh token is stored.
    #[error("no active session")]
    NoSession,

    /// The login endpoint rejected the credentials.
    #[error("login failed: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The refresh endpoint rejected the refresh token.
    #[error("token refresh failed: HTTP {status}: {body}")]
    RefreshFailed { status: u16, body: String },
}

/// A non-success response from a resource endpoint.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Response body text, verbatim.
    pub body: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check if the server reported the request as unauthenticated.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP exchange error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Session store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// The persisted session could not be parsed.
    #[error("corrupt session file {path}: {message}")]
    Corrupt { path: String, message: String },

    /// No location could be determined for the store.
    #[error("no session location: {message}")]
    Location { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Header name or value that cannot be sent.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// A form field failed validation.
    #[error("invalid {field}: {reason}")]
    Field { field: &'static str, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

impl InvalidInputError {
    pub(crate) fn field(field: &'static str, reason: impl Into<String>) -> Self {
        InvalidInputError::Field {
            field,
            reason: reason.into(),
        }
    }
}
